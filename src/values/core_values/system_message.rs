//! `Value::SystemMessage` (spec §3: "an internal sentinel (only kind:
//! `defer`) used by operator definitions to request the evaluator to
//! retry with a lower-precedence operator of the same sign").

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemMessage {
    Defer { sign: String },
}

impl SystemMessage {
    pub fn defer(sign: impl Into<String>) -> Self {
        SystemMessage::Defer { sign: sign.into() }
    }
}

impl fmt::Display for SystemMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemMessage::Defer { sign } => write!(f, "<defer '{sign}'>"),
        }
    }
}
