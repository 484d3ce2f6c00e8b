use serde::{Deserialize, Serialize};

use super::MsgType;

/// デコード済みの受信メッセージ。
///
/// バイト列のデコードはこのクレートの外側の責務で、
/// ここでは「ヘッダの必要な部分 + ボディ」だけを運びます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMsg {
    msg_type: MsgType,
    terminal_id: String,
    flow_id: u16,
    body: Vec<u8>,
}

impl RequestMsg {
    pub fn new(
        msg_type: MsgType,
        terminal_id: impl Into<String>,
        flow_id: u16,
        body: Vec<u8>,
    ) -> Self {
        Self {
            msg_type,
            terminal_id: terminal_id.into(),
            flow_id,
            body,
        }
    }

    pub fn msg_type(&self) -> MsgType {
        self.msg_type
    }

    /// 端末の識別子（JT/T 808 では端末の電話番号）
    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }

    pub fn flow_id(&self) -> u16 {
        self.flow_id
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// このリクエストへの応答を作る。端末 ID と流水番号は引き継ぐ。
    pub fn reply(&self, msg_type: MsgType, body: Vec<u8>) -> RespMsg {
        RespMsg {
            msg_type,
            terminal_id: self.terminal_id.clone(),
            flow_id: self.flow_id,
            body,
        }
    }
}

/// ハンドラが返す応答メッセージ（エンコード前）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespMsg {
    msg_type: MsgType,
    terminal_id: String,
    flow_id: u16,
    body: Vec<u8>,
}

impl RespMsg {
    pub fn msg_type(&self) -> MsgType {
        self.msg_type
    }

    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }

    pub fn flow_id(&self) -> u16 {
        self.flow_id
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
