//! RegistryBuilder - 起動時のハンドラ登録とワイヤリング
//!
//! RegistryConfig の force_override / fallback / expected_msg_types を
//! そのまま HandlerRegistry の初期状態に反映します。

use std::sync::Arc;

use super::config::{FallbackMode, RegistryConfig};
use super::registry::HandlerRegistry;
use crate::domain::{BuildError, MsgType, RegistryError};
use crate::impls::LoggingFallbackHandler;
use crate::ports::{DefaultHandlerProvider, MsgHandler};

/// RegistryBuilder は HandlerRegistry を構築
///
/// # 使用例
/// ```ignore
/// let registry = RegistryBuilder::from_config(&config)
///     .handler(Arc::new(LocationHandler))?
///     .handler(Arc::new(TerminalHandler))?
///     .expect_msg_types(&[MsgType::LOCATION_UPLOAD, MsgType::TERMINAL_AUTH])
///     .build()?;
/// ```
///
/// expect_msg_types() の検証では、フォールバックは専用ハンドラとして数えない。
/// 期待した MsgType が個別に登録されていなければ build() が失敗する。
pub struct RegistryBuilder {
    registry: HandlerRegistry,
    force_override: bool,
    expected_msg_types: Option<Vec<MsgType>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
            force_override: false,
            expected_msg_types: None,
        }
    }

    /// RegistryConfig の内容で初期化
    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut builder = Self::new().force_override(config.force_override);
        if config.fallback == FallbackMode::LogAndDrop {
            builder = builder.default_handler_provider(LoggingFallbackHandler::provider());
        }
        if !config.expected_msg_types.is_empty() {
            builder = builder.expect_msg_types(&config.expected_msg_types);
        }
        builder
    }

    /// 以降の登録で使う force_override
    pub fn force_override(mut self, force_override: bool) -> Self {
        self.force_override = force_override;
        self
    }

    /// Handler を supported_msg_types() の全 MsgType に登録
    pub fn handler(self, handler: Arc<dyn MsgHandler>) -> Result<Self, RegistryError> {
        self.registry
            .register_handler_for_supported(handler, self.force_override)?;
        Ok(self)
    }

    /// Handler を指定の MsgType に登録
    pub fn handler_for(self, msg_type: MsgType, handler: Arc<dyn MsgHandler>) -> Self {
        self.registry
            .register_handler(msg_type, handler, self.force_override);
        self
    }

    pub fn default_handler_provider(self, provider: Arc<dyn DefaultHandlerProvider>) -> Self {
        self.registry.set_default_handler_provider(Some(provider));
        self
    }

    /// 専用ハンドラが必須の MsgType を設定
    pub fn expect_msg_types(mut self, msg_types: &[MsgType]) -> Self {
        self.expected_msg_types = Some(msg_types.to_vec());
        self
    }

    /// 検証して HandlerRegistry を返す
    ///
    /// フォールバックは「専用ハンドラ」に数えません。
    pub fn build(self) -> Result<HandlerRegistry, BuildError> {
        if let Some(expected) = &self.expected_msg_types {
            let mut missing: Vec<MsgType> = expected
                .iter()
                .copied()
                .filter(|msg_type| !self.registry.contains(*msg_type))
                .collect();
            if !missing.is_empty() {
                missing.sort_unstable();
                missing.dedup();
                return Err(BuildError::MissingMsgTypes(missing));
            }
        }
        Ok(self.registry)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
