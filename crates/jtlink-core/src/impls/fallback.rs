//! LoggingFallbackHandler - 未登録 MsgType 用のフォールバック

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{HandlerError, MsgType, RequestMsg, RespMsg};
use crate::ports::{DefaultHandlerProvider, MsgHandler};

/// 受信したメッセージをログに残して破棄する。応答は返さない。
///
/// 特定の MsgType を担当しないので `supported_msg_types()` は空集合です
/// （一括登録には使えません）。
#[derive(Debug, Default)]
pub struct LoggingFallbackHandler;

impl LoggingFallbackHandler {
    pub fn new() -> Self {
        Self
    }

    /// 単一のインスタンスを毎回返す provider
    pub fn provider() -> Arc<dyn DefaultHandlerProvider> {
        let handler: Arc<dyn MsgHandler> = Arc::new(Self::new());
        Arc::new(move || Some(Arc::clone(&handler)))
    }
}

#[async_trait]
impl MsgHandler for LoggingFallbackHandler {
    fn supported_msg_types(&self) -> HashSet<MsgType> {
        HashSet::new()
    }

    async fn handle_msg(&self, req: &RequestMsg) -> Result<Option<RespMsg>, HandlerError> {
        warn!(
            msg_type = %req.msg_type(),
            desc = req.msg_type().desc(),
            terminal_id = req.terminal_id(),
            flow_id = req.flow_id(),
            body_len = req.body().len(),
            "no specific handler for msg type, message dropped"
        );
        Ok(None)
    }

    fn name(&self) -> &str {
        "LoggingFallbackHandler"
    }
}
