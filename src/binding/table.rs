//! Table state: a rectangular cell matrix with styling overlays.
//!
//! The first row is the header by rendering convention only; the schema does
//! not distinguish it. Malformed or missing persisted rows always normalize
//! to a fixed default 4×4 matrix — never an empty or ragged grid.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::str_field;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
}

impl Cell {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// Styling overlays keyed by row index, column index, or `"row-col"` cell
/// coordinate. Absent keys mean "use the table-level style."
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableOverlays {
    pub row_colors: BTreeMap<String, String>,
    pub column_colors: BTreeMap<String, String>,
    pub cell_colors: BTreeMap<String, String>,
    pub row_text_colors: BTreeMap<String, String>,
    pub column_text_colors: BTreeMap<String, String>,
    pub cell_text_colors: BTreeMap<String, String>,
    pub row_bold: BTreeMap<String, bool>,
    pub column_bold: BTreeMap<String, bool>,
    pub cell_bold: BTreeMap<String, bool>,
    pub row_text_sizes: BTreeMap<String, f64>,
    pub column_text_sizes: BTreeMap<String, f64>,
    pub cell_text_sizes: BTreeMap<String, f64>,
}

/// Editable state of a table widget.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub title: String,
    /// Rectangular matrix; row 0 renders as the header.
    pub rows: Vec<Vec<Cell>>,
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    pub header_bg_color: String,
    pub row_bg_color: String,
    pub alternate_row_color: String,
    pub text_color: String,
    pub border_color: String,
    pub overlays: TableOverlays,
}

fn default_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![Cell::new("Product"), Cell::new("Q1"), Cell::new("Q2"), Cell::new("Q3")],
        vec![Cell::new("Widget A"), Cell::new("120"), Cell::new("135"), Cell::new("150")],
        vec![Cell::new("Widget B"), Cell::new("95"), Cell::new("110"), Cell::new("125")],
        vec![Cell::new("Widget C"), Cell::new("80"), Cell::new("90"), Cell::new("100")],
    ]
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            title: "Data Table".into(),
            rows: default_rows(),
            column_widths: vec![180.0, 120.0, 120.0, 120.0],
            row_heights: vec![44.0; 4],
            header_bg_color: "#3b82f6".into(),
            row_bg_color: "rgba(255, 255, 255, 0.05)".into(),
            alternate_row_color: "rgba(255, 255, 255, 0.02)".into(),
            text_color: "#ffffff".into(),
            border_color: "rgba(255, 255, 255, 0.1)".into(),
            overlays: TableOverlays::default(),
        }
    }
}

/// Normalize a persisted `rows` value. Anything that is not a non-empty
/// array falls back to the default matrix; cells coerce scalars to strings.
fn normalize_rows(value: Option<&Value>) -> Vec<Vec<Cell>> {
    let Some(rows) = value.and_then(Value::as_array) else {
        return default_rows();
    };
    if rows.is_empty() {
        return default_rows();
    }
    rows.iter()
        .map(|row| {
            let Some(cells) = row.as_array() else {
                return vec![Cell::new("")];
            };
            cells
                .iter()
                .map(|cell| match cell {
                    Value::Object(map) => {
                        Cell::new(map.get("value").map(json_to_text).unwrap_or_default())
                    }
                    other => Cell::new(json_to_text(other)),
                })
                .collect()
        })
        .collect()
}

/// Render a scalar JSON value as cell text; null becomes empty.
fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn string_map(data: &Value, key: &str) -> BTreeMap<String, String> {
    data.get(key)
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn bool_map(data: &Value, key: &str) -> BTreeMap<String, bool> {
    data.get(key)
        .and_then(Value::as_object)
        .map(|map| map.iter().filter_map(|(k, v)| v.as_bool().map(|b| (k.clone(), b))).collect())
        .unwrap_or_default()
}

fn f64_map(data: &Value, key: &str) -> BTreeMap<String, f64> {
    data.get(key)
        .and_then(Value::as_object)
        .map(|map| map.iter().filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n))).collect())
        .unwrap_or_default()
}

fn f64_list(data: &Value, key: &str, default: &[f64]) -> Vec<f64> {
    let Some(items) = data.get(key).and_then(Value::as_array) else {
        return default.to_vec();
    };
    let list: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
    if list.is_empty() { default.to_vec() } else { list }
}

impl TableState {
    /// Hydrate from a persisted payload; unrecognized fields keep defaults.
    #[must_use]
    pub fn hydrate(data: &Value) -> Self {
        let defaults = Self::default();
        let rows = normalize_rows(data.get("rows"));
        // Fallback sizing tracks the actual matrix so the grid stays rectangular
        // even when only `rows` survived persistence.
        let fallback_widths = if rows == defaults.rows {
            defaults.column_widths.clone()
        } else {
            vec![120.0; rows.first().map_or(1, Vec::len)]
        };
        let fallback_heights = vec![44.0; rows.len()];
        Self {
            title: str_field(data, "title", &defaults.title),
            column_widths: f64_list(data, "columnWidths", &fallback_widths),
            row_heights: f64_list(data, "rowHeights", &fallback_heights),
            rows,
            header_bg_color: str_field(data, "headerBgColor", &defaults.header_bg_color),
            row_bg_color: str_field(data, "rowBgColor", &defaults.row_bg_color),
            alternate_row_color: str_field(data, "alternateRowColor", &defaults.alternate_row_color),
            text_color: str_field(data, "textColor", &defaults.text_color),
            border_color: str_field(data, "borderColor", &defaults.border_color),
            overlays: TableOverlays {
                row_colors: string_map(data, "customRowColors"),
                column_colors: string_map(data, "customColumnColors"),
                cell_colors: string_map(data, "customCellColors"),
                row_text_colors: string_map(data, "customRowTextColors"),
                column_text_colors: string_map(data, "customColumnTextColors"),
                cell_text_colors: string_map(data, "customCellTextColors"),
                row_bold: bool_map(data, "customRowBold"),
                column_bold: bool_map(data, "customColumnBold"),
                cell_bold: bool_map(data, "customCellBold"),
                row_text_sizes: f64_map(data, "customRowTextSizes"),
                column_text_sizes: f64_map(data, "customColumnTextSizes"),
                cell_text_sizes: f64_map(data, "customCellTextSizes"),
            },
        }
    }

    /// Emit the whole-snapshot payload.
    #[must_use]
    pub fn emit(&self) -> Value {
        json!({
            "title": self.title,
            "rows": self.rows,
            "columnWidths": self.column_widths,
            "rowHeights": self.row_heights,
            "headerBgColor": self.header_bg_color,
            "rowBgColor": self.row_bg_color,
            "alternateRowColor": self.alternate_row_color,
            "textColor": self.text_color,
            "borderColor": self.border_color,
            "customRowColors": self.overlays.row_colors,
            "customColumnColors": self.overlays.column_colors,
            "customCellColors": self.overlays.cell_colors,
            "customRowTextColors": self.overlays.row_text_colors,
            "customColumnTextColors": self.overlays.column_text_colors,
            "customCellTextColors": self.overlays.cell_text_colors,
            "customRowBold": self.overlays.row_bold,
            "customColumnBold": self.overlays.column_bold,
            "customCellBold": self.overlays.cell_bold,
            "customRowTextSizes": self.overlays.row_text_sizes,
            "customColumnTextSizes": self.overlays.column_text_sizes,
            "customCellTextSizes": self.overlays.cell_text_sizes,
        })
    }

    /// Number of columns, from the header row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Set a cell's text. Returns false when out of range.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                cell.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Append an empty row matching the current column count.
    pub fn add_row(&mut self) {
        let cols = self.column_count().max(1);
        self.rows.push(vec![Cell::new(""); cols]);
        self.row_heights.push(44.0);
    }

    /// Append an empty column to every row.
    pub fn add_column(&mut self) {
        for row in &mut self.rows {
            row.push(Cell::new(""));
        }
        self.column_widths.push(120.0);
    }

    /// Remove a row. The header row and the last remaining row are kept.
    pub fn remove_row(&mut self, row: usize) -> bool {
        if row == 0 || row >= self.rows.len() || self.rows.len() <= 1 {
            return false;
        }
        self.rows.remove(row);
        if row < self.row_heights.len() {
            self.row_heights.remove(row);
        }
        true
    }

    /// Remove a column from every row; the last column is kept.
    pub fn remove_column(&mut self, col: usize) -> bool {
        if col >= self.column_count() || self.column_count() <= 1 {
            return false;
        }
        for row in &mut self.rows {
            if col < row.len() {
                row.remove(col);
            }
        }
        if col < self.column_widths.len() {
            self.column_widths.remove(col);
        }
        true
    }
}
