//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FnHandler**: クロージャを MsgHandler として登録するためのアダプタ
//! - **LoggingFallbackHandler**: 未登録 MsgType をログに残して破棄するフォールバック
//!
//! 実際のビジネスハンドラ（位置情報の保存など）はサーバ側のクレートに置きます。

pub mod fallback;
pub mod fn_handler;

pub use self::fallback::LoggingFallbackHandler;
pub use self::fn_handler::FnHandler;
