//! Protocol module - line-delimited JSON messages between clients and a room
//!
//! Every message is one JSON object on one line, discriminated by `type`.

use serde::{Deserialize, Serialize};

use tetris_arena_room::{RoomError, TickReport};
use tetris_arena_types::Command;

// ============== Client -> Host Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join {
        user_name: String,
        /// Role tag; the host assigns one when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        who: Option<String>,
    },
    Input {
        user_name: String,
        command: Command,
    },
    Leave {
        user_name: String,
    },
}

// ============== Host -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMessage,
    UnknownPlayer,
    DuplicatePlayer,
    RoomFull,
    RoomFinished,
    EngineFault,
}

impl From<&RoomError> for ErrorCode {
    fn from(err: &RoomError) -> Self {
        match err {
            RoomError::UnknownPlayer(_) => Self::UnknownPlayer,
            RoomError::DuplicatePlayer(_) => Self::DuplicatePlayer,
            RoomError::RoomFull { .. } => Self::RoomFull,
            RoomError::Finished => Self::RoomFinished,
            RoomError::Engine(_) => Self::EngineFault,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Joined { user_name: String, who: String },
    Left { user_name: String },
    Tick(TickReport),
    Error { code: ErrorCode, message: String },
}

impl ServerMessage {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }
}

impl From<&RoomError> for ServerMessage {
    fn from(err: &RoomError) -> Self {
        Self::error(ErrorCode::from(err), err.to_string())
    }
}

pub fn parse_message(json: &str) -> Result<ClientMessage, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a message followed by a newline.
pub fn encode_line(msg: &ServerMessage) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = serde_json::to_vec(msg)?;
    buf.push(b'\n');
    Ok(buf)
}
