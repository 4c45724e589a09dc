//! Widget data binding: per-kind editable state hydrated from, and emitted
//! back to, the opaque `data` payload on a widget.
//!
//! Every variant implements the same contract:
//!
//! - **Hydration** — each recognized field of a persisted payload overrides
//!   the variant's built-in default; unrecognized or absent fields keep the
//!   default. Partial-override merge, never full replacement, so payloads
//!   written by older or newer schemas still load.
//! - **Emission** — on any edit the variant assembles its *entire* state into
//!   one payload snapshot; the consumer replaces the stored `data` wholesale.
//!
//! Hydration is defensive throughout: absent, null, wrong-typed, or empty
//! persisted data degrades to the variant's defaults rather than failing.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod chart;
pub mod kpi;
pub mod table;
pub mod text;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::WidgetKind;
pub use chart::ChartState;
pub use kpi::KpiState;
pub use table::TableState;
pub use text::TextState;

/// One point in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: f64,
    /// Per-point annotation. Either a non-empty trimmed string or absent;
    /// never stored as an empty string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value, comment: None }
    }

    /// Set or clear the comment, applying the normalization invariant:
    /// a trimmed non-empty string is stored, anything else removes the field.
    pub fn set_comment(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.comment = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
    }
}

/// Editable state for any widget kind, dispatched by kind tag.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetPayload {
    Kpi(KpiState),
    Chart(ChartState),
    Table(TableState),
    Text(TextState),
}

impl WidgetPayload {
    /// Hydrate the state for `kind` from a persisted payload.
    #[must_use]
    pub fn hydrate(kind: WidgetKind, data: &Value) -> Self {
        match kind {
            WidgetKind::Kpi => Self::Kpi(KpiState::hydrate(data)),
            WidgetKind::Bar | WidgetKind::Line | WidgetKind::Trend | WidgetKind::Pie => {
                Self::Chart(ChartState::hydrate(kind, data))
            }
            WidgetKind::Table => Self::Table(TableState::hydrate(data)),
            WidgetKind::Text => Self::Text(TextState::hydrate(data)),
        }
    }

    /// The default state for `kind`, equivalent to hydrating an empty payload.
    #[must_use]
    pub fn default_for(kind: WidgetKind) -> Self {
        Self::hydrate(kind, &Value::Null)
    }

    /// Emit the whole-snapshot payload for this state.
    #[must_use]
    pub fn emit(&self) -> Value {
        match self {
            Self::Kpi(s) => s.emit(),
            Self::Chart(s) => s.emit(),
            Self::Table(s) => s.emit(),
            Self::Text(s) => s.emit(),
        }
    }

    /// The widget title, used in AI dashboard summaries.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Kpi(s) => &s.title,
            Self::Chart(s) => &s.title,
            Self::Table(s) => &s.title,
            Self::Text(_) => "Text",
        }
    }
}

// ── Defensive payload accessors ─────────────────────────────────

/// Read a string field, falling back to `default` when absent or wrong-typed.
#[must_use]
pub(crate) fn str_field(data: &Value, key: &str, default: &str) -> String {
    data.get(key).and_then(Value::as_str).unwrap_or(default).to_string()
}

/// Read a numeric field, coercing integers, falling back to `default`.
#[must_use]
pub(crate) fn f64_field(data: &Value, key: &str, default: f64) -> f64 {
    data.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Read a boolean field, falling back to `default`.
#[must_use]
pub(crate) fn bool_field(data: &Value, key: &str, default: bool) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Hydrate a series from a payload field. Non-array, empty, or malformed
/// input returns `default`; individual malformed points are skipped.
#[must_use]
pub(crate) fn series_field(data: &Value, key: &str, default: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let Some(items) = data.get(key).and_then(Value::as_array) else {
        return default.to_vec();
    };
    if items.is_empty() {
        return default.to_vec();
    }
    let points: Vec<SeriesPoint> = items
        .iter()
        .filter_map(|item| {
            let name = item.get("name").and_then(Value::as_str)?;
            let value = item.get("value").and_then(Value::as_f64)?;
            let mut point = SeriesPoint::new(name, value);
            if let Some(comment) = item.get("comment").and_then(Value::as_str) {
                point.set_comment(comment);
            }
            Some(point)
        })
        .collect();
    if points.is_empty() { default.to_vec() } else { points }
}

/// Hydrate a color palette from a payload field. Non-array or empty input
/// returns `default`; non-string entries are skipped.
#[must_use]
pub(crate) fn colors_field(data: &Value, key: &str, default: &[&str]) -> Vec<String> {
    let fallback = || default.iter().map(|c| (*c).to_string()).collect::<Vec<_>>();
    let Some(items) = data.get(key).and_then(Value::as_array) else {
        return fallback();
    };
    let colors: Vec<String> =
        items.iter().filter_map(Value::as_str).map(ToString::to_string).collect();
    if colors.is_empty() { fallback() } else { colors }
}
