//! Ports - 抽象化レイヤー
//!
//! レジストリが外部（ビジネスハンドラ、フォールバックの供給元）に
//! 要求するインターフェースを定義します。
//!
//! - **MsgHandler**: MsgType ごとのビジネスロジック
//! - **DefaultHandlerProvider**: 未登録 MsgType 向けのフォールバック供給

pub mod default_provider;
pub mod handler;

pub use self::default_provider::DefaultHandlerProvider;
pub use self::handler::MsgHandler;
