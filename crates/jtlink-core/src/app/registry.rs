//! Handler registry (msg_type -> handler) for the dispatch path.
//!
//! Conflict policy when a msg type is registered twice:
//!
//! | existing | force_override | result | event |
//! |---|---|---|---|
//! | none | - | inserted | debug |
//! | some | true | replaced | warn |
//! | some | false | skipped | info |
//!
//! A conflict is never an error.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info, warn};

use super::mappings::HandlerMappings;
use crate::domain::{MsgType, RegistryError};
use crate::ports::{DefaultHandlerProvider, MsgHandler};

/// Which policy branch a single registration took.
#[derive(Clone)]
pub enum RegisterOutcome {
    Inserted,
    Replaced { previous: Arc<dyn MsgHandler> },
    Skipped { existing: Arc<dyn MsgHandler> },
}

impl RegisterOutcome {
    /// Whether the new handler ended up in the mapping.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Skipped { .. })
    }
}

impl fmt::Debug for RegisterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inserted => f.write_str("Inserted"),
            Self::Replaced { previous } => f
                .debug_struct("Replaced")
                .field("previous", &previous.name())
                .finish(),
            Self::Skipped { existing } => f
                .debug_struct("Skipped")
                .field("existing", &existing.name())
                .finish(),
        }
    }
}

/// Registry of handlers (msg_type -> handler) with an optional fallback.
///
/// Built during server initialization, then used read-mostly. Every method
/// takes `&self`, so the registry can be shared as `Arc<HandlerRegistry>`
/// between initializers and the dispatch path.
pub struct HandlerRegistry {
    mapping: DashMap<MsgType, Arc<dyn MsgHandler>>,
    default_provider: ArcSwapOption<Arc<dyn DefaultHandlerProvider>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            mapping: DashMap::new(),
            default_provider: ArcSwapOption::empty(),
        }
    }

    /// Register `handler` for `msg_type` and report which policy branch fired.
    ///
    /// The lookup and the write happen under the same shard lock, so two
    /// concurrent registrations of one msg type can never both see it absent.
    pub fn try_register_handler(
        &self,
        msg_type: MsgType,
        handler: Arc<dyn MsgHandler>,
        force_override: bool,
    ) -> RegisterOutcome {
        let outcome = match self.mapping.entry(msg_type) {
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&handler));
                RegisterOutcome::Inserted
            }
            Entry::Occupied(mut entry) if force_override => RegisterOutcome::Replaced {
                previous: entry.insert(Arc::clone(&handler)),
            },
            Entry::Occupied(entry) => RegisterOutcome::Skipped {
                existing: Arc::clone(entry.get()),
            },
        };

        // shard lock is released here
        match &outcome {
            RegisterOutcome::Inserted => {
                debug!(msg_type = %msg_type, handler = handler.name(), "msg handler registered");
            }
            RegisterOutcome::Replaced { previous } => {
                warn!(
                    msg_type = %msg_type,
                    previous = previous.name(),
                    handler = handler.name(),
                    policy = "replaced",
                    "duplicate msg type, the existing msg handler is replaced"
                );
            }
            RegisterOutcome::Skipped { existing } => {
                info!(
                    msg_type = %msg_type,
                    previous = existing.name(),
                    handler = handler.name(),
                    policy = "skipped",
                    "duplicate msg type, the msg handler registration is skipped"
                );
            }
        }

        outcome
    }

    /// Register `handler` for `msg_type`.
    ///
    /// A conflict is resolved by `force_override` and never fails.
    pub fn register_handler(
        &self,
        msg_type: MsgType,
        handler: Arc<dyn MsgHandler>,
        force_override: bool,
    ) -> &Self {
        self.try_register_handler(msg_type, handler, force_override);
        self
    }

    /// `register_handler(msg_type, handler, false)`
    pub fn register(&self, msg_type: MsgType, handler: Arc<dyn MsgHandler>) -> &Self {
        self.register_handler(msg_type, handler, false)
    }

    /// Register `handler` for every msg type it declares.
    ///
    /// Fails before touching the mapping if the declared set is empty.
    /// Each msg type is resolved on its own: a skipped type does not stop the
    /// remaining ones from being registered.
    pub fn register_handler_for_supported(
        &self,
        handler: Arc<dyn MsgHandler>,
        force_override: bool,
    ) -> Result<&Self, RegistryError> {
        let mut msg_types: Vec<MsgType> = handler.supported_msg_types().into_iter().collect();
        if msg_types.is_empty() {
            return Err(RegistryError::NoSupportedMsgTypes {
                handler: handler.name().to_string(),
            });
        }
        msg_types.sort_unstable();

        for msg_type in msg_types {
            self.register_handler(msg_type, Arc::clone(&handler), force_override);
        }
        Ok(self)
    }

    /// `register_handler_for_supported(handler, false)`
    pub fn register_supported(&self, handler: Arc<dyn MsgHandler>) -> Result<&Self, RegistryError> {
        self.register_handler_for_supported(handler, false)
    }

    /// Resolve `msg_type` to its handler, or to the fallback.
    ///
    /// Returns `None` when nothing is registered and either no provider is
    /// configured or the provider yields nothing.
    pub fn get_handler(&self, msg_type: MsgType) -> Option<Arc<dyn MsgHandler>> {
        self.get_registered_handler(msg_type)
            .or_else(|| self.default_handler())
    }

    /// Resolve `msg_type` without falling back.
    pub fn get_registered_handler(&self, msg_type: MsgType) -> Option<Arc<dyn MsgHandler>> {
        self.mapping.get(&msg_type).map(|entry| Arc::clone(entry.value()))
    }

    fn default_handler(&self) -> Option<Arc<dyn MsgHandler>> {
        let provider = self.default_provider.load_full()?;
        (**provider).provide()
    }

    /// Read-only snapshot of the current associations.
    pub fn handler_mappings(&self) -> HandlerMappings {
        self.mapping
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect()
    }

    /// Replace the fallback provider. `None` disables the fallback.
    pub fn set_default_handler_provider(&self, provider: Option<Arc<dyn DefaultHandlerProvider>>) {
        self.default_provider.store(provider.map(Arc::new));
    }

    pub fn has_default_handler_provider(&self) -> bool {
        self.default_provider.load().is_some()
    }

    pub fn contains(&self, msg_type: MsgType) -> bool {
        self.mapping.contains_key(&msg_type)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("msg_types", &self.handler_mappings().msg_types())
            .field("has_default_handler_provider", &self.has_default_handler_provider())
            .finish()
    }
}
