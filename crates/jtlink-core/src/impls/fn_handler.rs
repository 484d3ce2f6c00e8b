//! FnHandler - クロージャを MsgHandler に変換するアダプタ
//!
//! # 学習ポイント
//! - `Box<dyn Fn ...>` による型消去
//! - 名前と対応 MsgType を値として持つことで、struct を定義せずに登録できる

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;

use crate::domain::{HandlerError, MsgType, RequestMsg, RespMsg};
use crate::ports::MsgHandler;

type HandlerFn = dyn Fn(&RequestMsg) -> Result<Option<RespMsg>, HandlerError> + Send + Sync;

/// FnHandler は同期クロージャで処理する MsgHandler
///
/// # 使用例
/// ```ignore
/// let heartbeat = FnHandler::new("heartbeat", [MsgType::HEARTBEAT], |req| {
///     Ok(Some(req.reply(MsgType::PLATFORM_COMMON_REPLY, vec![])))
/// });
/// registry.register_supported(Arc::new(heartbeat))?;
/// ```
pub struct FnHandler {
    name: String,
    msg_types: HashSet<MsgType>,
    f: Box<HandlerFn>,
}

impl FnHandler {
    pub fn new<F>(name: impl Into<String>, msg_types: impl IntoIterator<Item = MsgType>, f: F) -> Self
    where
        F: Fn(&RequestMsg) -> Result<Option<RespMsg>, HandlerError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            msg_types: msg_types.into_iter().collect(),
            f: Box::new(f),
        }
    }

    /// 何もせず応答も返さないハンドラ
    pub fn noop(name: impl Into<String>, msg_types: impl IntoIterator<Item = MsgType>) -> Self {
        Self::new(name, msg_types, |_| Ok(None))
    }
}

impl fmt::Debug for FnHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("name", &self.name)
            .field("msg_types", &self.msg_types)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MsgHandler for FnHandler {
    fn supported_msg_types(&self) -> HashSet<MsgType> {
        self.msg_types.clone()
    }

    async fn handle_msg(&self, req: &RequestMsg) -> Result<Option<RespMsg>, HandlerError> {
        (self.f)(req)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
