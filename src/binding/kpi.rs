//! KPI card state: a headline number with unit, trend indicator, and colors.

#[cfg(test)]
#[path = "kpi_test.rs"]
mod kpi_test;

use serde_json::{Value, json};

use super::str_field;

/// Direction of the KPI trend indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
    #[default]
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// Parse a persisted trend token; anything unrecognized is `Up`.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "down" => Self::Down,
            "neutral" => Self::Neutral,
            _ => Self::Up,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        }
    }
}

/// Editable state of a KPI card.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiState {
    pub title: String,
    pub value: String,
    pub unit: String,
    pub trend: Trend,
    pub trend_value: String,
    pub bg_color: String,
    pub text_color: String,
    pub accent_color: String,
}

impl Default for KpiState {
    fn default() -> Self {
        Self {
            title: "Total Revenue".into(),
            value: "124.5".into(),
            unit: "K".into(),
            trend: Trend::Up,
            trend_value: "12.5".into(),
            bg_color: "rgba(59, 130, 246, 0.2)".into(),
            text_color: "#ffffff".into(),
            accent_color: "#3b82f6".into(),
        }
    }
}

impl KpiState {
    /// Hydrate from a persisted payload; unrecognized fields keep defaults.
    #[must_use]
    pub fn hydrate(data: &Value) -> Self {
        let defaults = Self::default();
        Self {
            title: str_field(data, "title", &defaults.title),
            value: str_field(data, "value", &defaults.value),
            unit: str_field(data, "unit", &defaults.unit),
            trend: data
                .get("trend")
                .and_then(Value::as_str)
                .map_or(defaults.trend, Trend::parse),
            trend_value: str_field(data, "trendValue", &defaults.trend_value),
            bg_color: str_field(data, "bgColor", &defaults.bg_color),
            text_color: str_field(data, "textColor", &defaults.text_color),
            accent_color: str_field(data, "accentColor", &defaults.accent_color),
        }
    }

    /// Emit the whole-snapshot payload.
    #[must_use]
    pub fn emit(&self) -> Value {
        json!({
            "title": self.title,
            "value": self.value,
            "unit": self.unit,
            "trend": self.trend.as_str(),
            "trendValue": self.trend_value,
            "bgColor": self.bg_color,
            "textColor": self.text_color,
            "accentColor": self.accent_color,
        })
    }
}
