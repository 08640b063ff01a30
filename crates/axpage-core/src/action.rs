//! Action records for page-object operations.
//!
//! Every semantic action a page object performs is recorded as an
//! [`ActionLog`] entry in the page's ring buffer, so a failing test can show
//! what the page did leading up to the failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The result of executing a page action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionResult {
    /// The action completed successfully.
    Success,
    /// The action failed with the given error message.
    Failure(String),
}

/// Types of semantic actions a page object performs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionType {
    /// Tapped the element named by the locator.
    Tap {
        /// Display form of the locator that was tapped.
        locator: String,
    },

    /// Swiped across an element.
    Swipe {
        /// Display form of the locator that was swiped.
        locator: String,
    },

    /// Selected a contextual row action by name.
    SelectAction {
        /// The action button's name (e.g. "Delete").
        action: String,
    },

    /// Waited for an element to become visible.
    WaitFor {
        /// Display form of the locator that was awaited.
        locator: String,
        /// The wait budget in milliseconds.
        timeout_ms: u64,
    },

    /// Read text off an element for an assertion.
    ReadText {
        /// Display form of the locator that was read.
        locator: String,
    },
}

impl ActionType {
    /// Short, static name for this action type, used in tracing metadata.
    pub fn name(&self) -> &'static str {
        match self {
            ActionType::Tap { .. } => "tap",
            ActionType::Swipe { .. } => "swipe",
            ActionType::SelectAction { .. } => "select_action",
            ActionType::WaitFor { .. } => "wait_for",
            ActionType::ReadText { .. } => "read_text",
        }
    }
}

/// A logged page action with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    /// Unique identifier for this log entry.
    pub id: Uuid,

    /// When the action was executed.
    pub timestamp: DateTime<Utc>,

    /// The action that was performed.
    pub action: ActionType,

    /// The result of the action.
    pub result: ActionResult,

    /// How long the action took in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ActionLog {
    /// Creates a new log entry with a fresh UUID and the current timestamp.
    pub fn new(action: ActionType, result: ActionResult, duration_ms: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action,
            result,
            duration_ms,
        }
    }
}
