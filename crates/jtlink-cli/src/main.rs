use async_trait::async_trait;
use clap::Parser;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jtlink_core::app::{RegistryBuilder, RegistryConfig, RegistryStatus};
use jtlink_core::domain::{BuildError, ConfigError, HandlerError};
use jtlink_core::impls::FnHandler;
use jtlink_core::{HandlerRegistry, MsgDispatcher, MsgHandler, MsgType, RequestMsg, RespMsg};

/// 端末の登録・認証・ログアウト
struct TerminalHandler;

#[async_trait]
impl MsgHandler for TerminalHandler {
    fn supported_msg_types(&self) -> HashSet<MsgType> {
        HashSet::from([
            MsgType::TERMINAL_REGISTER,
            MsgType::TERMINAL_AUTH,
            MsgType::TERMINAL_LOGOUT,
        ])
    }

    async fn handle_msg(&self, req: &RequestMsg) -> Result<Option<RespMsg>, HandlerError> {
        match req.msg_type() {
            MsgType::TERMINAL_REGISTER => {
                // result=0 (success) + auth code
                let mut body = vec![0u8];
                body.extend_from_slice(req.terminal_id().as_bytes());
                Ok(Some(req.reply(MsgType::REGISTER_REPLY, body)))
            }
            MsgType::TERMINAL_AUTH if req.body().is_empty() => {
                Err(HandlerError::Rejected("empty auth code".to_string()))
            }
            _ => Ok(Some(common_reply(req))),
        }
    }

    fn name(&self) -> &str {
        "TerminalHandler"
    }
}

/// 位置情報のアップロード（件数を数えるだけ）
struct LocationHandler {
    received: AtomicU64,
}

#[async_trait]
impl MsgHandler for LocationHandler {
    fn supported_msg_types(&self) -> HashSet<MsgType> {
        HashSet::from([MsgType::LOCATION_UPLOAD, MsgType::BATCH_LOCATION_UPLOAD])
    }

    async fn handle_msg(&self, req: &RequestMsg) -> Result<Option<RespMsg>, HandlerError> {
        let total = self.received.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            terminal_id = req.terminal_id(),
            bytes = req.body().len(),
            total,
            "location received"
        );
        Ok(Some(common_reply(req)))
    }

    fn name(&self) -> &str {
        "LocationHandler"
    }
}

/// 0x8001: 応答流水番号 + 応答 ID + 結果(0=成功)
fn common_reply(req: &RequestMsg) -> RespMsg {
    let mut body = Vec::with_capacity(5);
    body.extend_from_slice(&req.flow_id().to_be_bytes());
    body.extend_from_slice(&req.msg_type().id().to_be_bytes());
    body.push(0);
    req.reply(MsgType::PLATFORM_COMMON_REPLY, body)
}

#[derive(Parser, Debug)]
#[command(name = "jtlink", version)]
#[command(about = "Wire a JT/T 808 handler registry and dispatch sample messages", long_about = None)]
struct Cli {
    /// Registry config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&Path>) -> Result<RegistryConfig, ConfigError> {
    match path {
        Some(path) => RegistryConfig::from_json_file(path),
        None => Ok(RegistryConfig::default()),
    }
}

/// 起動時のワイヤリング：設定 → 組み込みハンドラ → プラグイン
fn build_registry(config: &RegistryConfig) -> Result<HandlerRegistry, BuildError> {
    let heartbeat = FnHandler::new("HeartbeatHandler", [MsgType::HEARTBEAT], |req| {
        Ok(Some(common_reply(req)))
    });

    let registry = RegistryBuilder::from_config(config)
        .handler(Arc::new(TerminalHandler))?
        .handler(Arc::new(LocationHandler {
            received: AtomicU64::new(0),
        }))?
        .handler(Arc::new(heartbeat))?
        .build()?;

    // 別の初期化処理からの登録。既存の 0x0200 とは衝突する
    let plugin = FnHandler::new(
        "PluginLocationHandler",
        [MsgType::LOCATION_UPLOAD, MsgType::MULTIMEDIA_EVENT],
        |req| Ok(Some(common_reply(req))),
    );
    registry.register_supported(Arc::new(plugin))?;

    Ok(registry)
}

fn sample_messages() -> Vec<RequestMsg> {
    let phone = "013912345678";
    vec![
        RequestMsg::new(MsgType::TERMINAL_REGISTER, phone, 1, vec![0x00, 0x2C]),
        RequestMsg::new(MsgType::TERMINAL_AUTH, phone, 2, phone.as_bytes().to_vec()),
        RequestMsg::new(MsgType::HEARTBEAT, phone, 3, vec![]),
        RequestMsg::new(MsgType::LOCATION_UPLOAD, phone, 4, vec![0; 28]),
        RequestMsg::new(MsgType::MULTIMEDIA_EVENT, phone, 5, vec![0; 8]),
        RequestMsg::new(MsgType::TERMINAL_AUTH, phone, 6, vec![]),
        RequestMsg::new(MsgType::new(0x0F01), phone, 7, vec![0xAA]),
    ]
}

#[derive(Serialize)]
struct Report {
    registry: RegistryStatus,
    dispatched: usize,
    failed: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load registry config");
            return ExitCode::FAILURE;
        }
    };

    let registry = match build_registry(&config) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            error!(error = %e, "failed to build handler registry");
            return ExitCode::FAILURE;
        }
    };
    info!(mappings = registry.len(), "handler registry ready");

    let dispatcher = MsgDispatcher::new(Arc::clone(&registry));
    let mut dispatched = 0;
    let mut failed = 0;
    for req in sample_messages() {
        match dispatcher.dispatch(&req).await {
            Ok(Some(resp)) => {
                dispatched += 1;
                println!(
                    "{} flow={} -> {} ({} bytes)",
                    req.msg_type(),
                    req.flow_id(),
                    resp.msg_type(),
                    resp.body().len()
                );
            }
            Ok(None) => {
                dispatched += 1;
                println!("{} flow={} -> (no reply)", req.msg_type(), req.flow_id());
            }
            Err(e) => {
                failed += 1;
                println!("{} flow={} -> error: {e}", req.msg_type(), req.flow_id());
            }
        }
    }

    let report = Report {
        registry: RegistryStatus::from_registry(&registry),
        dispatched,
        failed,
    };
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "failed to serialize report");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for entry in &report.registry.msg_types {
            println!("{} {:<24} {}", entry.msg_type, entry.desc, entry.handler);
        }
        println!(
            "dispatched={} failed={} fallback={}",
            report.dispatched, report.failed, report.registry.has_default_handler_provider
        );
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_registration_keeps_builtin_location_handler() {
        let registry = build_registry(&RegistryConfig::default()).unwrap();

        let location = registry.get_handler(MsgType::LOCATION_UPLOAD).unwrap();
        assert_eq!(location.name(), "LocationHandler");
        let multimedia = registry.get_handler(MsgType::MULTIMEDIA_EVENT).unwrap();
        assert_eq!(multimedia.name(), "PluginLocationHandler");
        assert!(registry.get_handler(MsgType::new(0x0F01)).is_none());
    }

    #[test]
    fn plugin_registration_ignores_builder_force_override() {
        let config = RegistryConfig::from_json_str(r#"{"force_override": true}"#).unwrap();
        let registry = build_registry(&config).unwrap();

        // the plugin registers outside the builder, so it never forces
        let location = registry.get_handler(MsgType::LOCATION_UPLOAD).unwrap();
        assert_eq!(location.name(), "LocationHandler");
    }

    #[test]
    fn expected_types_are_checked_at_startup() {
        let config =
            RegistryConfig::from_json_str(r#"{"expected_msg_types": ["0x0801"]}"#).unwrap();
        let err = build_registry(&config).unwrap_err();
        assert_eq!(err, BuildError::MissingMsgTypes(vec![MsgType::MULTIMEDIA_DATA_UPLOAD]));
    }

    #[test]
    fn cli_accepts_long_and_equals_forms() {
        let cli = Cli::try_parse_from(["jtlink", "--config=config/registry.json", "--json"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("config/registry.json")));
        assert!(cli.json);

        let cli = Cli::try_parse_from(["jtlink", "-c", "registry.json"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("registry.json")));
        assert!(!cli.json);
    }

    #[test]
    fn cli_help_and_unknown_flags() {
        let help = Cli::try_parse_from(["jtlink", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);

        let unknown = Cli::try_parse_from(["jtlink", "--bogus"]).unwrap_err();
        assert_eq!(unknown.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn common_reply_encodes_flow_and_msg_id() {
        let req = RequestMsg::new(MsgType::HEARTBEAT, "013912345678", 0x0102, vec![]);
        let resp = common_reply(&req);
        assert_eq!(resp.msg_type(), MsgType::PLATFORM_COMMON_REPLY);
        assert_eq!(resp.body(), &[0x01, 0x02, 0x00, 0x02, 0x00]);
    }
}
