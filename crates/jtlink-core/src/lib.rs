//! jtlink-core
//!
//! JT/T 808 サーバのメッセージルーティング（MsgType → MsgHandler）。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（MsgType, RequestMsg, RespMsg, errors）
//! - **ports**: 抽象化レイヤー（MsgHandler, DefaultHandlerProvider）
//! - **app**: アプリケーションロジック（HandlerRegistry, MsgDispatcher, RegistryBuilder, config, status）
//! - **impls**: 実装（FnHandler, LoggingFallbackHandler）
//!
//! バイト列のデコード、セッション管理、各メッセージのビジネスロジックは
//! このクレートの外側の責務です。

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{HandlerRegistry, MsgDispatcher, RegistryBuilder};
pub use domain::{MsgType, RequestMsg, RespMsg};
pub use ports::{DefaultHandlerProvider, MsgHandler};
