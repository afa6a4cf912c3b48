//! Calls into the FileMaker host

use fmbridge_core::{
    format_params, handle_script_result, pending_marker, BridgeError, Result, ValidationError,
};
use fmbridge_types::{BridgeConfig, CallRequest, CALLBACK_FIELD, LAYOUT_FIELD};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

use crate::dispatch::DispatchStyle;
use crate::host::{FileMakerHost, HostSlot};
use crate::quickbooks::QuickBooksRequest;

/// Handle for calling scripts on the host object held by a [`HostSlot`].
///
/// Cloning is cheap; clones share the slot.
#[derive(Debug, Clone)]
pub struct Bridge {
    slot: Arc<HostSlot>,
    config: BridgeConfig,
}

impl Bridge {
    /// Bridge over a slot with the given configuration
    pub fn new(slot: Arc<HostSlot>, config: BridgeConfig) -> Self {
        Self { slot, config }
    }

    pub fn slot(&self) -> &Arc<HostSlot> {
        &self.slot
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Fetch data asynchronously, starting with a fresh attempt budget
    pub async fn fetch(&self, request: CallRequest) -> Result<Value> {
        self.fetch_data(&request.build(), true).await
    }

    /// Run the fetch script with the given parameters.
    ///
    /// Waits for the host object if the handshake has not happened yet, up
    /// to the configured attempt budget.
    pub async fn fetch_data(&self, params: &Map<String, Value>, is_async: bool) -> Result<Value> {
        self.fetch_data_from_attempt(params, is_async, 0).await
    }

    /// Same as [`Bridge::fetch_data`] with part of the attempt budget already spent
    pub async fn fetch_data_from_attempt(
        &self,
        params: &Map<String, Value>,
        is_async: bool,
        attempt: u32,
    ) -> Result<Value> {
        let host = self.wait_for_host(attempt).await?;
        self.dispatch(host.as_ref(), params, is_async).await
    }

    /// Poll the slot until a callable host shows up or the budget runs out
    async fn wait_for_host(&self, mut attempt: u32) -> Result<Arc<dyn FileMakerHost>> {
        let interval = self.config.retry_interval();
        loop {
            if attempt >= self.config.max_attempts {
                return Err(BridgeError::timeout(attempt, interval));
            }
            if let Some(host) = self.slot.callable() {
                return Ok(host);
            }
            trace!(attempt, "FileMaker object not available yet, retrying");
            tokio::time::sleep(interval).await;
            attempt += 1;
        }
    }

    async fn dispatch(
        &self,
        host: &dyn FileMakerHost,
        params: &Map<String, Value>,
        is_async: bool,
    ) -> Result<Value> {
        let formatted = format_params(params);
        let param = serde_json::to_string(&formatted).map_err(|source| {
            error!("Error preparing FileMaker request: {}", source);
            BridgeError::Preparation { source }
        })?;

        let layout = formatted.get(LAYOUT_FIELD).and_then(Value::as_str);
        let callback = formatted.get(CALLBACK_FIELD).and_then(Value::as_str);
        let style = DispatchStyle::select(callback, is_async);
        debug!(?layout, ?callback, style = style.as_str(), "Dispatching FileMaker call");

        let script = self.config.fetch_script.as_str();
        match style {
            DispatchStyle::Deferred => {
                host.perform_script(script, &param).map_err(|err| {
                    error!("FileMaker script error: {}", err);
                    BridgeError::script(err)
                })?;
                Ok(pending_marker())
            }
            DispatchStyle::Awaited => {
                let result = host.perform_script_async(script, &param).await.map_err(|err| {
                    error!("FileMaker script error: {}", err);
                    BridgeError::script(err)
                })?;
                let value = read_script_result(result.as_deref())?;
                trace!(?layout, "FileMaker response received");
                Ok(value)
            }
            DispatchStyle::Direct => {
                let result = host.perform_script(script, &param).map_err(|err| {
                    error!("FileMaker script error: {}", err);
                    BridgeError::script(err)
                })?;
                read_script_result(result.as_deref())
            }
        }
    }

    /// Ask the host to start QuickBooks processing for a customer.
    ///
    /// This is fire and forget: it does not wait for the host object and
    /// resolves as soon as the script has been started.
    pub async fn initialize_quickbooks(
        &self,
        request: impl Into<QuickBooksRequest>,
    ) -> Result<Value> {
        let request = request.into();
        info!(
            customer_id = request.customer_id(),
            structured = matches!(request, QuickBooksRequest::Batch(_)),
            "QuickBooks initialization requested"
        );

        if request.customer_id().is_empty() {
            return Err(ValidationError::MissingCustomerId.into());
        }

        let host = self.slot.callable().ok_or(BridgeError::Unavailable)?;

        let payload = request.payload().map_err(|err| {
            error!("Error initializing QuickBooks: {}", err);
            BridgeError::quickbooks_init(err)
        })?;
        debug!(%payload, "Sending QuickBooks payload");

        host.perform_script(&self.config.quickbooks_script, &payload)
            .map_err(|err| {
                error!("Error initializing QuickBooks: {}", err);
                BridgeError::quickbooks_init(err)
            })?;

        Ok(json!({
            "status": "success",
            "message": "QuickBooks initialization requested"
        }))
    }
}

/// Normalize a script result, reporting an unreadable one as a script error
fn read_script_result(raw: Option<&str>) -> Result<Value> {
    handle_script_result(raw).map_err(|err| {
        if matches!(err, BridgeError::Parse(_)) {
            error!("FileMaker script error: {}", err);
        }
        err.into_script_failure()
    })
}
