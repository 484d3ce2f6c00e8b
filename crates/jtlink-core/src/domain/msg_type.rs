//! MsgType - JT/T 808 のメッセージ ID
//!
//! ルーティングのキーとなる 16 bit のメッセージ ID です。
//! 既知の ID は関連定数として定義し、`desc()` で説明を引けるようにします。
//!
//! # 表記
//! - Display: `0x0200`（4 桁の 16 進、大文字）
//! - FromStr: `0x0200` / `0X0200` / `0200` を受け付ける
//! - serde: Display と同じ文字列表現

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// MsgType はメッセージ種別の識別子
///
/// `Eq + Hash + Ord` を持つので HashMap/BTreeMap のキーにそのまま使えます。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MsgType(u16);

impl MsgType {
    pub const TERMINAL_COMMON_REPLY: MsgType = MsgType(0x0001);
    pub const HEARTBEAT: MsgType = MsgType(0x0002);
    pub const TERMINAL_LOGOUT: MsgType = MsgType(0x0003);
    pub const TERMINAL_REGISTER: MsgType = MsgType(0x0100);
    pub const TERMINAL_AUTH: MsgType = MsgType(0x0102);
    pub const LOCATION_UPLOAD: MsgType = MsgType(0x0200);
    pub const BATCH_LOCATION_UPLOAD: MsgType = MsgType(0x0704);
    pub const MULTIMEDIA_EVENT: MsgType = MsgType(0x0800);
    pub const MULTIMEDIA_DATA_UPLOAD: MsgType = MsgType(0x0801);
    pub const PLATFORM_COMMON_REPLY: MsgType = MsgType(0x8001);
    pub const REGISTER_REPLY: MsgType = MsgType(0x8100);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u16 {
        self.0
    }

    /// 既知の ID なら説明を返す。未知の ID は `"unknown"`。
    pub fn desc(self) -> &'static str {
        match self {
            Self::TERMINAL_COMMON_REPLY => "terminal common reply",
            Self::HEARTBEAT => "heartbeat",
            Self::TERMINAL_LOGOUT => "terminal logout",
            Self::TERMINAL_REGISTER => "terminal register",
            Self::TERMINAL_AUTH => "terminal auth",
            Self::LOCATION_UPLOAD => "location upload",
            Self::BATCH_LOCATION_UPLOAD => "batch location upload",
            Self::MULTIMEDIA_EVENT => "multimedia event",
            Self::MULTIMEDIA_DATA_UPLOAD => "multimedia data upload",
            Self::PLATFORM_COMMON_REPLY => "platform common reply",
            Self::REGISTER_REPLY => "register reply",
            _ => "unknown",
        }
    }

    /// 端末 → プラットフォーム方向のメッセージか（最上位ビットが 0）
    pub const fn is_uplink(self) -> bool {
        self.0 & 0x8000 == 0
    }
}

impl From<u16> for MsgType {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<MsgType> for u16 {
    fn from(msg_type: MsgType) -> Self {
        msg_type.0
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// MsgType のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid msg type {input:?}: expected a 16-bit hex id such as 0x0200")]
pub struct ParseMsgTypeError {
    input: String,
}

impl FromStr for MsgType {
    type Err = ParseMsgTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        // from_str_radix alone would also take a leading '+'
        if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseMsgTypeError {
                input: s.to_string(),
            });
        }

        u16::from_str_radix(digits, 16)
            .map(MsgType)
            .map_err(|_| ParseMsgTypeError {
                input: s.to_string(),
            })
    }
}

impl Serialize for MsgType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MsgType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
