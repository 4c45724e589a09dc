//! AI boundary — collaborator replies translated into canvas commands.
//!
//! DESIGN
//! ======
//! The collaborator receives a free-text instruction plus a serialized
//! summary of the current widgets and answers with either a widget-descriptor
//! array (generation) or a `{message, actions}` object (conversation). This
//! module owns the consumer side: resolving symbolic `SEARCH_FOR_<term>`
//! widget references against the live dashboard, and applying each validated
//! action through the canvas command layer. Collaborator failures never
//! cross this boundary — callers receive a fallback reply instead.


pub mod actions;
pub mod client;

use tracing::{info, warn};
use uuid::Uuid;

use crate::binding::WidgetPayload;
use crate::canvas::Canvas;
use crate::geometry::{Widget, WidgetId, WidgetKind};
pub use actions::{Action, ChatReply, WidgetDescriptor, parse_reply, parse_widget_descriptors};
pub use client::{AiError, GeminiClient, GeminiConfig, TextCompletion, build_chat_prompt};

/// Prefix of a symbolic widget reference the collaborator may return in
/// place of a concrete id.
const SEARCH_PREFIX: &str = "search_for_";

/// One applied mutation, reported back to the caller for display/broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum AppliedAction {
    Added(WidgetId),
    Modified(WidgetId),
    Deleted(WidgetId),
}

/// Resolve a widget reference: a concrete id parses directly; a
/// `SEARCH_FOR_<term>` token matches case-insensitively against widget kind
/// or title in a single pass over stored order (first match wins).
#[must_use]
pub fn resolve_widget_ref(reference: &str, widgets: &[Widget]) -> Option<WidgetId> {
    if let Ok(id) = Uuid::parse_str(reference) {
        return widgets.iter().find(|w| w.id == id).map(|w| w.id);
    }
    let lowered = reference.to_ascii_lowercase();
    let term = lowered.strip_prefix(SEARCH_PREFIX).unwrap_or(&lowered);

    widgets
        .iter()
        .find(|w| {
            w.kind.as_str() == term
                || WidgetPayload::hydrate(w.kind, &w.data)
                    .title()
                    .to_ascii_lowercase()
                    .contains(term)
        })
        .map(|w| w.id)
}

/// Apply a batch of collaborator actions to the canvas. Unresolvable
/// references and unknown kinds are skipped with a warning; the rest apply
/// in order. Returns the mutations that actually happened.
pub fn apply_actions(canvas: &mut Canvas, actions: &[Action]) -> Vec<AppliedAction> {
    let mut applied = Vec::new();
    for action in actions {
        match action {
            Action::Add { widgets } => {
                for descriptor in widgets {
                    let id = canvas.add_with_data(descriptor.kind, descriptor.data.clone());
                    applied.push(AppliedAction::Added(id));
                }
            }
            Action::Modify { widget_id, data } => {
                let Some(id) = resolve_widget_ref(widget_id, canvas.widgets()) else {
                    warn!(reference = %widget_id, "ai modify: widget not found");
                    continue;
                };
                if canvas.merge_data(&id, data) {
                    applied.push(AppliedAction::Modified(id));
                }
            }
            Action::Delete { widget_id, widget_type } => {
                let resolved = match (widget_id, widget_type) {
                    (Some(reference), _) => resolve_widget_ref(reference, canvas.widgets()),
                    (None, Some(kind_name)) => WidgetKind::parse(kind_name).and_then(|kind| {
                        // Exactly the first match of that kind is removed.
                        canvas.widgets().iter().find(|w| w.kind == kind).map(|w| w.id)
                    }),
                    (None, None) => None,
                };
                let Some(id) = resolved else {
                    warn!("ai delete: no matching widget");
                    continue;
                };
                if canvas.delete(&id) {
                    applied.push(AppliedAction::Deleted(id));
                }
            }
            Action::UpdateValue { widget_id, field, value } => {
                let Some(id) = resolve_widget_ref(widget_id, canvas.widgets()) else {
                    warn!(reference = %widget_id, "ai update_value: widget not found");
                    continue;
                };
                let mut patch = serde_json::Map::new();
                patch.insert(field.clone(), value.clone());
                if canvas.merge_data(&id, &serde_json::Value::Object(patch)) {
                    applied.push(AppliedAction::Modified(id));
                }
            }
        }
    }
    info!(requested = actions.len(), applied = applied.len(), "ai actions applied");
    applied
}

/// Run one conversational exchange: build the prompt from the instruction
/// and current dashboard, call the collaborator, and parse its reply.
/// Collaborator failures degrade to the fallback reply.
pub async fn chat(
    client: &dyn TextCompletion,
    canvas: &Canvas,
    instruction: &str,
    history: &[(String, String)],
) -> ChatReply {
    let prompt = build_chat_prompt(instruction, canvas.widgets(), history);
    match client.complete(&prompt).await {
        Ok(text) => parse_reply(&text),
        Err(e) => {
            warn!(error = %e, "ai chat failed; returning fallback");
            ChatReply::fallback()
        }
    }
}
