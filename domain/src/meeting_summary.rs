//! The structured summary extracted from a meeting transcript.
//!
//! Both LLM providers are constrained by the same JSON schema
//! ([`MeetingSummary::json_schema`]) so that their outputs deserialize into
//! the same types regardless of which provider produced them.

use crate::error::{Error, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Best-effort priority of an action item, when the transcript implies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A single action item captured from the meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionItem {
    /// What needs to be done.
    pub task: String,
    /// Person responsible, if mentioned.
    #[serde(default)]
    pub owner: Option<String>,
    /// Due date exactly as mentioned in the transcript, if any. Never normalized.
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Structured summary of one meeting. List fields always serialize as arrays,
/// never as null, so clients can iterate without null checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MeetingSummary {
    /// Short meeting overview.
    pub meeting_summary: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

impl MeetingSummary {
    /// Checks the invariants deserialization alone cannot express: the
    /// overview and every action item task must be non-empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.meeting_summary.is_empty() {
            return Err(Error::validation(ValidationErrorKind::Invalid(
                "meeting_summary must not be empty".to_string(),
            )));
        }
        for item in &self.action_items {
            if item.task.is_empty() {
                return Err(Error::validation(ValidationErrorKind::Invalid(
                    "action item task must not be empty".to_string(),
                )));
            }
        }
        Ok(())
    }

    /// The JSON schema sent to both providers: as Claude's forced tool
    /// `input_schema` and as OpenAI's `response_format` schema.
    pub fn json_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "meeting_summary": {"type": "string"},
                "participants": {
                    "type": "array",
                    "items": {"type": "string"},
                },
                "decisions": {
                    "type": "array",
                    "items": {"type": "string"},
                },
                "action_items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "task": {"type": "string"},
                            "owner": {"type": ["string", "null"]},
                            "due_date": {"type": ["string", "null"]},
                            "priority": {
                                "type": ["string", "null"],
                                "enum": ["low", "medium", "high", null],
                            },
                        },
                        "required": ["task"],
                        "additionalProperties": false,
                    },
                },
            },
            "required": ["meeting_summary", "participants", "decisions", "action_items"],
            "additionalProperties": false,
        })
    }
}
