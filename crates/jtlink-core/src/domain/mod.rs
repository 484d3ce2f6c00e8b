//! Domain model (msg types, decoded messages, errors).

pub mod errors;
pub mod message;
pub mod msg_type;

pub use self::errors::{BuildError, ConfigError, DispatchError, HandlerError, RegistryError};
pub use self::message::{RequestMsg, RespMsg};
pub use self::msg_type::{MsgType, ParseMsgTypeError};
