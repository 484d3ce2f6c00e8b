use serde::{Deserialize, Serialize};

use super::registry::HandlerRegistry;
use crate::domain::MsgType;

/// Serializable view of a registry, for diagnostics endpoints and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStatus {
    pub mapping_count: usize,
    pub has_default_handler_provider: bool,
    /// Sorted by msg type id.
    pub msg_types: Vec<MsgTypeStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTypeStatus {
    pub msg_type: MsgType,
    pub desc: String,
    pub handler: String,
}

impl RegistryStatus {
    pub fn from_registry(registry: &HandlerRegistry) -> Self {
        let mut msg_types: Vec<MsgTypeStatus> = registry
            .handler_mappings()
            .iter()
            .map(|(msg_type, handler)| MsgTypeStatus {
                msg_type,
                desc: msg_type.desc().to_string(),
                handler: handler.name().to_string(),
            })
            .collect();
        msg_types.sort_by_key(|status| status.msg_type);

        Self {
            mapping_count: msg_types.len(),
            has_default_handler_provider: registry.has_default_handler_provider(),
            msg_types,
        }
    }
}
