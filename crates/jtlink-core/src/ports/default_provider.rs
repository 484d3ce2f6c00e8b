//! DefaultHandlerProvider port - 未登録の MsgType 向けのフォールバック
//!
//! 引数なしで `Option<Arc<dyn MsgHandler>>` を返すファクトリです。
//! クロージャはそのまま provider として使えます。

use std::sync::Arc;

use super::MsgHandler;

/// DefaultHandlerProvider はフォールバックハンドラを供給する
///
/// # 使用例
/// ```ignore
/// let fallback: Arc<dyn MsgHandler> = Arc::new(LoggingFallbackHandler::new());
/// registry.set_default_handler_provider(Some(Arc::new(move || Some(fallback.clone()))));
/// ```
///
/// 呼び出しはルックアップのたびに発生するので、軽量で非ブロッキングであること。
pub trait DefaultHandlerProvider: Send + Sync {
    fn provide(&self) -> Option<Arc<dyn MsgHandler>>;
}

impl<F> DefaultHandlerProvider for F
where
    F: Fn() -> Option<Arc<dyn MsgHandler>> + Send + Sync,
{
    fn provide(&self) -> Option<Arc<dyn MsgHandler>> {
        self()
    }
}
