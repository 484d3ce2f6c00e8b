//! RegistryConfig - 起動時のレジストリ設定
//!
//! JSON で書かれた設定を読み込みます。全フィールドが省略可能です。
//!
//! ```json
//! {
//!   "force_override": false,
//!   "fallback": "log_and_drop",
//!   "expected_msg_types": ["0x0100", "0x0102", "0x0200"]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ConfigError, MsgType};

/// 未登録 MsgType をどう扱うか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// フォールバックなし（get_handler は None）
    #[default]
    None,
    /// LoggingFallbackHandler でログに残して破棄
    LogAndDrop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// RegistryBuilder 経由の登録で使う force_override
    pub force_override: bool,
    pub fallback: FallbackMode,
    /// build() 時に専用ハンドラの存在を要求する MsgType
    pub expected_msg_types: Vec<MsgType>,
}

impl RegistryConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = RegistryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert!(!config.force_override);
        assert_eq!(config.fallback, FallbackMode::None);
    }

    #[test]
    fn parses_all_fields() {
        let config = RegistryConfig::from_json_str(
            r#"{
                "force_override": true,
                "fallback": "log_and_drop",
                "expected_msg_types": ["0x0100", "0102"]
            }"#,
        )
        .unwrap();

        assert!(config.force_override);
        assert_eq!(config.fallback, FallbackMode::LogAndDrop);
        assert_eq!(
            config.expected_msg_types,
            vec![MsgType::TERMINAL_REGISTER, MsgType::TERMINAL_AUTH]
        );
    }

    #[test]
    fn rejects_unknown_fields_and_bad_ids() {
        assert!(matches!(
            RegistryConfig::from_json_str(r#"{"forceOverride": true}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RegistryConfig::from_json_str(r#"{"expected_msg_types": ["0xGG"]}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RegistryConfig::from_json_str(r#"{"expected_msg_types": ["0x+1"]}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RegistryConfig::from_json_file("/nonexistent/jtlink/registry.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/jtlink/registry.json"));
    }
}
