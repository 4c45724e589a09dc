//! Action types returned by the AI collaborator, and the defensive parser
//! that turns its free-text replies into them.
//!
//! The collaborator is a best-effort text generator: replies may be wrapped
//! in markdown fences, padded with prose, truncated, or not JSON at all.
//! Parsing therefore never fails — every degenerate input becomes a friendly
//! fallback message with an empty action list, and unknown action tags are
//! skipped element-wise rather than rejecting the whole reply.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::geometry::WidgetKind;

/// A widget descriptor produced by the collaborator: kind plus a (possibly
/// partial) payload in the kind's binding schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub data: Value,
}

/// A dashboard mutation requested by the collaborator. Closed union: any
/// other tag is ignored at the parse boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Add one or more new widgets.
    Add { widgets: Vec<WidgetDescriptor> },
    /// Patch an existing widget's payload.
    Modify {
        #[serde(rename = "widgetId")]
        widget_id: String,
        data: Value,
    },
    /// Delete a widget, addressed by id or by kind (first match).
    Delete {
        #[serde(rename = "widgetId", default, skip_serializing_if = "Option::is_none")]
        widget_id: Option<String>,
        #[serde(rename = "widgetType", default, skip_serializing_if = "Option::is_none")]
        widget_type: Option<String>,
    },
    /// Set a single payload field on a widget.
    UpdateValue {
        #[serde(rename = "widgetId")]
        widget_id: String,
        field: String,
        value: Value,
    },
}

/// A parsed conversational reply: user-facing message plus actions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub message: String,
    pub actions: Vec<Action>,
}

/// Fallback shown when the collaborator's reply cannot be parsed.
pub const FALLBACK_MESSAGE: &str =
    "I understood your request! Try: 'Add a KPI card' or 'Delete the table'";

impl ChatReply {
    /// The no-op fallback reply.
    #[must_use]
    pub fn fallback() -> Self {
        Self { message: FALLBACK_MESSAGE.into(), actions: Vec::new() }
    }
}

/// Strip markdown fences and slice `raw` to the outermost `open`..`close`
/// pair, if present.
fn extract_json<'a>(raw: &'a str, open: char, close: char) -> Option<&'a str> {
    let cleaned = raw.trim();
    let start = cleaned.find(open)?;
    let end = cleaned.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&cleaned[start..=end])
}

/// Parse a conversational reply (`{message, actions}`). Degenerate input —
/// no JSON, wrong shape, truncated — degrades to [`ChatReply::fallback`];
/// unknown action tags are dropped individually.
#[must_use]
pub fn parse_reply(raw: &str) -> ChatReply {
    let defenced = raw.replace("```json", "").replace("```", "");
    let Some(sliced) = extract_json(&defenced, '{', '}') else {
        warn!("ai reply contained no JSON object");
        return ChatReply::fallback();
    };
    let Ok(parsed) = serde_json::from_str::<Value>(sliced) else {
        warn!("ai reply JSON did not parse");
        return ChatReply::fallback();
    };
    let Some(message) = parsed.get("message").and_then(Value::as_str) else {
        warn!("ai reply missing message field");
        return ChatReply::fallback();
    };
    let actions = match parsed.get("actions") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match serde_json::from_value::<Action>(item.clone()) {
                Ok(action) => Some(action),
                Err(e) => {
                    warn!(error = %e, "skipping unrecognized ai action");
                    None
                }
            })
            .collect(),
        // A malformed actions field means the whole reply shape is suspect.
        Some(_) => {
            warn!("ai reply actions field is not an array");
            return ChatReply::fallback();
        }
    };
    ChatReply { message: message.to_string(), actions }
}

/// Parse a generation reply: a bare JSON array of widget descriptors.
/// Returns an empty list on any failure; malformed elements are skipped.
#[must_use]
pub fn parse_widget_descriptors(raw: &str) -> Vec<WidgetDescriptor> {
    let defenced = raw.replace("```json", "").replace("```", "");
    let Some(sliced) = extract_json(&defenced, '[', ']') else {
        warn!("ai generation reply contained no JSON array");
        return Vec::new();
    };
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(sliced) else {
        warn!("ai generation reply JSON did not parse");
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<WidgetDescriptor>(item) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!(error = %e, "skipping malformed widget descriptor");
                None
            }
        })
        .collect()
}
