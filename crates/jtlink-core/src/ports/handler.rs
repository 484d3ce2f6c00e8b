//! MsgHandler port - メッセージ種別ごとのビジネスロジック
//!
//! # 学習ポイント
//! - Object-safe な async trait（async_trait）
//! - デフォルト実装での `type_name::<Self>()` による識別子
//! - `Arc<dyn MsgHandler>` で複数の MsgType から同じハンドラを共有

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{HandlerError, MsgType, RequestMsg, RespMsg};

/// MsgHandler は 1 つ以上の MsgType を処理する
///
/// # 使用例
/// ```ignore
/// struct LocationHandler;
///
/// #[async_trait]
/// impl MsgHandler for LocationHandler {
///     fn supported_msg_types(&self) -> HashSet<MsgType> {
///         HashSet::from([MsgType::LOCATION_UPLOAD, MsgType::BATCH_LOCATION_UPLOAD])
///     }
///
///     async fn handle_msg(&self, req: &RequestMsg) -> Result<Option<RespMsg>, HandlerError> {
///         Ok(Some(req.reply(MsgType::PLATFORM_COMMON_REPLY, vec![])))
///     }
/// }
/// ```
#[async_trait]
pub trait MsgHandler: Send + Sync {
    /// このハンドラが担当する MsgType の集合
    ///
    /// 一括登録（`register_supported`）では空集合は設定エラーになります。
    fn supported_msg_types(&self) -> HashSet<MsgType>;

    /// メッセージを処理し、必要なら応答を返す
    async fn handle_msg(&self, req: &RequestMsg) -> Result<Option<RespMsg>, HandlerError>;

    /// ログに出すハンドラの識別名
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
