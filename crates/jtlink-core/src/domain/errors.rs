//! Errors - エラー型と分類
//!
//! - 設定エラー（RegistryError, BuildError, ConfigError）: 起動時に即座に返す
//! - 実行時エラー（HandlerError, DispatchError）: メッセージ単位で返す
//!
//! 登録の衝突と未登録 ID の検索はエラーではありません。

use super::MsgType;

/// RegistryError は HandlerRegistry への登録エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("MsgHandler::supported_msg_types() of handler '{handler}' is empty")]
    NoSupportedMsgTypes { handler: String },
}

/// HandlerError はビジネスハンドラが返すエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// メッセージの内容が受け付けられない
    #[error("message rejected: {0}")]
    Rejected(String),

    #[error("{0}")]
    Other(String),
}

/// DispatchError はディスパッチ時のエラー
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no handler found for msg_type={0}")]
    NoHandler(MsgType),

    #[error("handler '{handler}' failed for msg_type={msg_type}")]
    Handler {
        msg_type: MsgType,
        handler: String,
        #[source]
        source: HandlerError,
    },
}

/// ConfigError は設定ファイル読み込みのエラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry config")]
    Parse(#[from] serde_json::Error),
}

/// BuildError は RegistryBuilder::build() の起動時検証エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(
        "Missing msg types: [{}]. These msg types were expected but have no handler.",
        join_msg_types(.0)
    )]
    MissingMsgTypes(Vec<MsgType>),
}

fn join_msg_types(msg_types: &[MsgType]) -> String {
    msg_types
        .iter()
        .map(MsgType::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn dispatch_error_exposes_handler_source() {
        let err = DispatchError::Handler {
            msg_type: MsgType::TERMINAL_AUTH,
            handler: "AuthHandler".to_string(),
            source: HandlerError::Rejected("bad token".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "handler 'AuthHandler' failed for msg_type=0x0102"
        );
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("message rejected: bad token"));
    }

    #[test]
    fn missing_msg_types_lists_hex_ids() {
        let err = BuildError::MissingMsgTypes(vec![MsgType::HEARTBEAT, MsgType::TERMINAL_AUTH]);
        assert!(err.to_string().starts_with("Missing msg types: [0x0002, 0x0102]."));
    }
}
