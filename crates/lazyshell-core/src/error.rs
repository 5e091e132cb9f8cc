use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShellError {
    #[error("index out of range: {index} (length {len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("unhashable type: '{type_name}'")]
    Unhashable { type_name: &'static str },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("unsupported operand type(s) for {op}: '{left}' and '{right}'")]
    UnsupportedOperand {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("{0} from empty collection")]
    EmptyCollection(&'static str),

    #[error("invalid slice: {0}")]
    InvalidSlice(String),

    #[error("refusing to realize {len} elements (limit {limit})")]
    RealizeLimit { limit: usize, len: usize },

    #[error("cannot repeat a sequence of length {len} {times} times")]
    RepeatOverflow { len: usize, times: i64 },
}

impl ShellError {
    pub fn index(index: i64, len: usize) -> Self {
        ShellError::IndexOutOfRange { index, len }
    }

    pub fn unhashable(type_name: &'static str) -> Self {
        ShellError::Unhashable { type_name }
    }

    pub fn key_not_found(key: &Value) -> Self {
        ShellError::KeyNotFound(key.to_string())
    }

    pub fn unsupported(op: &'static str, left: &'static str, right: &'static str) -> Self {
        ShellError::UnsupportedOperand { op, left, right }
    }

    pub fn element_not_found(element: &Value) -> Self {
        ShellError::ElementNotFound(element.to_string())
    }

    pub fn empty(op: &'static str) -> Self {
        ShellError::EmptyCollection(op)
    }

    pub fn invalid_slice(message: impl Into<String>) -> Self {
        ShellError::InvalidSlice(message.into())
    }

    pub fn realize_limit(limit: usize, len: usize) -> Self {
        ShellError::RealizeLimit { limit, len }
    }

    pub fn repeat_overflow(len: usize, times: i64) -> Self {
        ShellError::RepeatOverflow { len, times }
    }
}
