//! Chart state shared by the bar, line, trend, and pie variants.
//!
//! The variants differ only in their default title, series, palette, and
//! display settings; the editable state and payload schema are identical.
//! Rendering is delegated to the host charting layer.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use serde_json::{Value, json};

use super::{SeriesPoint, bool_field, colors_field, f64_field, series_field, str_field};
use crate::geometry::WidgetKind;

/// Display settings toggled from the chart settings dialog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSettings {
    pub show_grid: bool,
    pub show_legend: bool,
    pub show_tooltip: bool,
    pub animation_duration_ms: f64,
}

/// Editable state of a chart widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub title: String,
    pub series: Vec<SeriesPoint>,
    /// Palette indexed by data-point position with modulo wraparound.
    pub colors: Vec<String>,
    pub settings: ChartSettings,
}

fn default_series(kind: WidgetKind) -> Vec<SeriesPoint> {
    let points: &[(&str, f64)] = match kind {
        WidgetKind::Line => &[
            ("Jan", 400.0),
            ("Feb", 300.0),
            ("Mar", 600.0),
            ("Apr", 800.0),
            ("May", 500.0),
            ("Jun", 700.0),
        ],
        WidgetKind::Trend => &[
            ("Week 1", 400.0),
            ("Week 2", 600.0),
            ("Week 3", 500.0),
            ("Week 4", 800.0),
            ("Week 5", 700.0),
            ("Week 6", 900.0),
        ],
        WidgetKind::Pie => &[
            ("Category A", 400.0),
            ("Category B", 300.0),
            ("Category C", 300.0),
            ("Category D", 200.0),
        ],
        _ => &[
            ("Product A", 400.0),
            ("Product B", 300.0),
            ("Product C", 600.0),
            ("Product D", 800.0),
            ("Product E", 500.0),
        ],
    };
    points.iter().map(|(name, value)| SeriesPoint::new(*name, *value)).collect()
}

fn default_palette(kind: WidgetKind) -> &'static [&'static str] {
    match kind {
        WidgetKind::Line => &["#3b82f6", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#06b6d4"],
        WidgetKind::Trend => &["#f59e0b", "#fb923c", "#f97316", "#ea580c", "#dc2626", "#b91c1c"],
        WidgetKind::Pie => &["#3b82f6", "#8b5cf6", "#ec4899", "#f59e0b"],
        _ => &["#8b5cf6", "#a855f7", "#9333ea", "#7c3aed", "#6d28d9"],
    }
}

fn default_title(kind: WidgetKind) -> &'static str {
    match kind {
        WidgetKind::Line => "Line Chart",
        WidgetKind::Trend => "Trend Chart",
        WidgetKind::Pie => "Pie Chart",
        _ => "Bar Chart",
    }
}

impl ChartState {
    /// Built-in defaults for a chart of `kind`.
    #[must_use]
    pub fn default_for(kind: WidgetKind) -> Self {
        Self {
            title: default_title(kind).into(),
            series: default_series(kind),
            colors: default_palette(kind).iter().map(|c| (*c).to_string()).collect(),
            settings: ChartSettings {
                // Pies legend instead of grid; the rest grid instead of legend.
                show_grid: kind != WidgetKind::Pie,
                show_legend: kind == WidgetKind::Pie,
                show_tooltip: true,
                animation_duration_ms: 800.0,
            },
        }
    }

    /// Hydrate from a persisted payload; unrecognized fields keep defaults.
    #[must_use]
    pub fn hydrate(kind: WidgetKind, data: &Value) -> Self {
        let defaults = Self::default_for(kind);
        let settings = data.get("settings").cloned().unwrap_or(Value::Null);
        Self {
            title: str_field(data, "title", &defaults.title),
            series: series_field(data, "data", &defaults.series),
            colors: colors_field(data, "colors", default_palette(kind)),
            settings: ChartSettings {
                show_grid: bool_field(&settings, "showGrid", defaults.settings.show_grid),
                show_legend: bool_field(&settings, "showLegend", defaults.settings.show_legend),
                show_tooltip: bool_field(&settings, "showTooltip", defaults.settings.show_tooltip),
                animation_duration_ms: f64_field(
                    &settings,
                    "animationDuration",
                    defaults.settings.animation_duration_ms,
                ),
            },
        }
    }

    /// Emit the whole-snapshot payload.
    #[must_use]
    pub fn emit(&self) -> Value {
        json!({
            "title": self.title,
            "data": self.series,
            "colors": self.colors,
            "settings": {
                "showGrid": self.settings.show_grid,
                "showLegend": self.settings.show_legend,
                "showTooltip": self.settings.show_tooltip,
                "animationDuration": self.settings.animation_duration_ms,
            },
        })
    }

    /// Palette color for data point `index`, wrapping when the palette is
    /// shorter than the series. An emptied-out palette yields the base blue.
    #[must_use]
    pub fn color_at(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return "#3b82f6";
        }
        &self.colors[index % self.colors.len()]
    }

    /// Attach, replace, or clear the annotation on point `index`.
    /// Returns false when the index is out of range.
    pub fn set_comment(&mut self, index: usize, raw: &str) -> bool {
        let Some(point) = self.series.get_mut(index) else {
            return false;
        };
        point.set_comment(raw);
        true
    }
}
