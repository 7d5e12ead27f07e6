//! Input that asks for a duration adjustment

use serde::{Deserialize, Serialize};

/// How an increment/decrement was requested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum Trigger {
    #[default]
    Click,
    Key { key: String },
}

impl Trigger {
    /// Clicks always count; key presses only for the arrow keys.
    ///
    /// Either arrow works on either button, matching a focused button that
    /// reacts to any vertical arrow.
    pub fn is_accepted(&self) -> bool {
        match self {
            Trigger::Click => true,
            Trigger::Key { key } => key == "ArrowUp" || key == "ArrowDown",
        }
    }
}
