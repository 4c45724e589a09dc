//! Geometry model: widget records, their kinds, and per-kind size limits.
//!
//! This module defines the persisted data types that describe what is on the
//! canvas (`Widget`, `WidgetKind`, `Project`) and the rectangle math the
//! placement engine and gesture controllers share (`Rect`). The `data` payload
//! on a widget is deliberately opaque here: only the matching `binding`
//! variant ever interprets it.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a widget.
pub type WidgetId = Uuid;

/// Unique identifier for a project.
pub type ProjectId = Uuid;

/// The kind of a dashboard widget. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Single-number KPI card with a trend indicator.
    Kpi,
    /// Bar chart over a named series.
    Bar,
    /// Line chart over a named series.
    Line,
    /// Area/trend chart over a named series.
    Trend,
    /// Pie chart over a named series.
    Pie,
    /// Editable rectangular table; first row renders as the header.
    Table,
    /// Free-form rich-text box.
    Text,
}

impl WidgetKind {
    /// All kinds, in the order the add menu presents them.
    pub const ALL: [Self; 7] =
        [Self::Kpi, Self::Bar, Self::Line, Self::Trend, Self::Pie, Self::Table, Self::Text];

    /// Whether this kind carries a `{name, value}` series payload.
    #[must_use]
    pub fn is_chart(self) -> bool {
        matches!(self, Self::Bar | Self::Line | Self::Trend | Self::Pie)
    }

    /// Default width and height assigned at creation.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Kpi => (300.0, 180.0),
            Self::Bar | Self::Line | Self::Trend | Self::Pie => (500.0, 350.0),
            Self::Table => (700.0, 500.0),
            Self::Text => (300.0, 200.0),
        }
    }

    /// Resize clamp range for this kind. Max width is capped further by the
    /// canvas usable width at resize time.
    #[must_use]
    pub fn size_limits(self) -> SizeLimits {
        match self {
            Self::Kpi => SizeLimits { min_width: 250.0, min_height: 150.0, max_height: 600.0 },
            Self::Bar | Self::Line | Self::Trend | Self::Pie => {
                SizeLimits { min_width: 400.0, min_height: 250.0, max_height: 800.0 }
            }
            Self::Table => SizeLimits { min_width: 500.0, min_height: 300.0, max_height: 1000.0 },
            Self::Text => SizeLimits { min_width: 200.0, min_height: 100.0, max_height: 1200.0 },
        }
    }

    /// Case-insensitive parse from a wire name (`"kpi"`, `"bar"`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "kpi" => Some(Self::Kpi),
            "bar" => Some(Self::Bar),
            "line" => Some(Self::Line),
            "trend" => Some(Self::Trend),
            "pie" => Some(Self::Pie),
            "table" => Some(Self::Table),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// The lowercase wire name for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kpi => "kpi",
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Trend => "trend",
            Self::Pie => "pie",
            Self::Table => "table",
            Self::Text => "text",
        }
    }
}

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-kind resize clamp bounds, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

/// An axis-aligned rectangle in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Grow the rectangle by `margin` on all four sides.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// AABB overlap test. Two rects do not overlap iff one is entirely to the
    /// left, right, above, or below the other; overlap is the negation.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.x + self.width <= other.x
            || other.x + other.width <= self.x
            || self.y + self.height <= other.y
            || other.y + other.height <= self.y)
    }
}

/// A dashboard widget as stored in a project and on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    /// Unique identifier, stable for the widget's lifetime.
    pub id: WidgetId,
    /// Widget kind; determines the shape of `data`.
    pub kind: WidgetKind,
    /// Left edge in canvas pixels. Never negative.
    pub x: f64,
    /// Top edge in canvas pixels. Never negative.
    pub y: f64,
    /// Width in canvas pixels, within the kind's clamp range.
    pub width: f64,
    /// Height in canvas pixels, within the kind's clamp range.
    pub height: f64,
    /// Creation-time ordinal used for placement tie-breaking; not
    /// authoritative once the widget has moved.
    pub grid_position: usize,
    /// Opaque per-kind payload. The canvas never inspects it.
    pub data: serde_json::Value,
}

impl Widget {
    /// The widget's bounding rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A named, independently-persisted collection of widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// User-editable display name; uniqueness is not enforced.
    pub name: String,
    pub widgets: Vec<Widget>,
}

impl Project {
    /// Create an empty project with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), widgets: Vec::new() }
    }

    /// Look up a widget by id.
    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == *id)
    }

    /// Mutable lookup by id.
    pub fn widget_mut(&mut self, id: &WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == *id)
    }

    /// Bounding rectangles of every widget, in list order.
    #[must_use]
    pub fn rects(&self) -> Vec<Rect> {
        self.widgets.iter().map(Widget::rect).collect()
    }
}
