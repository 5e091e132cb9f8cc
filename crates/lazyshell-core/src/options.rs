use std::env;

use crate::error::ShellError;

pub const REALIZE_LIMIT_VAR: &str = "LAZYSHELL_REALIZE_LIMIT";

fn env_count(name: &str) -> Option<usize> {
    let Ok(value) = env::var(name) else {
        return None;
    };
    value.trim().parse::<usize>().ok().filter(|count| *count > 0)
}

pub fn realize_limit_from_env() -> Option<usize> {
    env_count(REALIZE_LIMIT_VAR)
}

/// Options carried by a mutable sequence cell and inherited by every cell
/// derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    /// Largest view a laziness-breaking operation may realize. `None` means
    /// unlimited.
    pub realize_limit: Option<usize>,
}

impl ViewOptions {
    pub fn unlimited() -> Self {
        Self {
            realize_limit: None,
        }
    }

    pub fn with_realize_limit(limit: usize) -> Self {
        Self {
            realize_limit: Some(limit),
        }
    }

    pub fn check_realize(&self, len: usize) -> Result<(), ShellError> {
        match self.realize_limit {
            Some(limit) if len > limit => Err(ShellError::realize_limit(limit, len)),
            _ => Ok(()),
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            realize_limit: realize_limit_from_env(),
        }
    }
}
