use std::sync::Arc;

use tracing::{Instrument, debug, info_span, warn};

use super::registry::HandlerRegistry;
use crate::domain::{DispatchError, RequestMsg, RespMsg};

/// MsgDispatcher routes a decoded `RequestMsg` to its handler.
pub struct MsgDispatcher {
    registry: Arc<HandlerRegistry>,
}

impl MsgDispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Dispatch one message.
    ///
    /// Falls back to the registry's default handler provider when the msg
    /// type has no specific handler.
    pub async fn dispatch(&self, req: &RequestMsg) -> Result<Option<RespMsg>, DispatchError> {
        let msg_type = req.msg_type();
        let span = info_span!(
            "dispatch",
            msg_type = %msg_type,
            terminal_id = req.terminal_id(),
            flow_id = req.flow_id()
        );

        async move {
            let Some(handler) = self.registry.get_handler(msg_type) else {
                warn!(desc = msg_type.desc(), "no msg handler found");
                return Err(DispatchError::NoHandler(msg_type));
            };

            debug!(handler = handler.name(), "dispatching to msg handler");
            handler
                .handle_msg(req)
                .await
                .map_err(|source| DispatchError::Handler {
                    msg_type,
                    handler: handler.name().to_string(),
                    source,
                })
        }
        .instrument(span)
        .await
    }
}
