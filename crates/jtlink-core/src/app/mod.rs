//! App - アプリケーション層
//!
//! ports を組み合わせてルーティングのロジックを実装します。
//!
//! # 主要コンポーネント
//! - **HandlerRegistry**: MsgType → MsgHandler の対応表とフォールバック
//! - **HandlerMappings**: 対応表の読み取り専用スナップショット
//! - **MsgDispatcher**: デコード済みメッセージをハンドラへ振り分け
//! - **RegistryBuilder**: 起動時の登録と検証
//! - **RegistryConfig**: JSON 設定
//! - **RegistryStatus**: 診断用のシリアライズ可能なビュー

pub mod builder;
pub mod config;
pub mod dispatcher;
pub mod mappings;
pub mod registry;
pub mod status;

// 主要な型を再エクスポート
pub use self::builder::RegistryBuilder;
pub use self::config::{FallbackMode, RegistryConfig};
pub use self::dispatcher::MsgDispatcher;
pub use self::mappings::HandlerMappings;
pub use self::registry::{HandlerRegistry, RegisterOutcome};
pub use self::status::{MsgTypeStatus, RegistryStatus};
