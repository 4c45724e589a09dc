#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Defaults and normalization
// =============================================================

#[test]
fn default_matrix_is_four_by_four() {
    let state = TableState::default();
    assert_eq!(state.rows.len(), 4);
    assert_eq!(state.column_count(), 4);
    assert_eq!(state.rows[0][0].value, "Product");
    assert_eq!(state.rows[0][3].value, "Q3");
    assert_eq!(state.column_widths, vec![180.0, 120.0, 120.0, 120.0]);
    assert_eq!(state.row_heights, vec![44.0; 4]);
}

#[test]
fn missing_rows_fall_back_to_default_matrix() {
    let state = TableState::hydrate(&json!({ "title": "Sales" }));
    assert_eq!(state.title, "Sales");
    assert_eq!(state.rows, TableState::default().rows);
}

#[test]
fn empty_rows_array_falls_back() {
    let state = TableState::hydrate(&json!({ "rows": [] }));
    assert_eq!(state.rows, TableState::default().rows);
}

#[test]
fn non_array_rows_fall_back() {
    let state = TableState::hydrate(&json!({ "rows": "nope" }));
    assert_eq!(state.rows, TableState::default().rows);
}

#[test]
fn scalar_cells_coerce_to_strings() {
    let state = TableState::hydrate(&json!({ "rows": [["h"], [42], [null]] }));
    assert_eq!(state.rows[1][0].value, "42");
    assert_eq!(state.rows[2][0].value, "");
}

#[test]
fn object_cells_read_value_key() {
    let state = TableState::hydrate(&json!({ "rows": [
        [{ "value": "Name" }, { "value": "Count" }],
        [{ "value": "A" }, { "other": "ignored" }],
    ]}));
    assert_eq!(state.rows[0][0].value, "Name");
    assert_eq!(state.rows[1][1].value, "");
}

#[test]
fn non_array_row_becomes_single_empty_cell() {
    let state = TableState::hydrate(&json!({ "rows": [["a", "b"], "broken"] }));
    assert_eq!(state.rows[1], vec![Cell::new("")]);
}

#[test]
fn custom_rows_get_matching_fallback_sizing() {
    let state = TableState::hydrate(&json!({ "rows": [["a", "b", "c"], ["1", "2", "3"]] }));
    assert_eq!(state.column_widths, vec![120.0; 3]);
    assert_eq!(state.row_heights, vec![44.0; 2]);
}

#[test]
fn hydrate_emit_is_idempotent() {
    let first = TableState::default().emit();
    let second = TableState::hydrate(&first).emit();
    assert_eq!(first, second);
}

// =============================================================
// Overlays
// =============================================================

#[test]
fn overlays_hydrate_by_key_shape() {
    let state = TableState::hydrate(&json!({
        "customRowColors": { "1": "#101010" },
        "customCellBold": { "2-3": true },
        "customColumnTextSizes": { "0": 18 },
    }));
    assert_eq!(state.overlays.row_colors.get("1").map(String::as_str), Some("#101010"));
    assert_eq!(state.overlays.cell_bold.get("2-3"), Some(&true));
    assert_eq!(state.overlays.column_text_sizes.get("0"), Some(&18.0));
}

#[test]
fn overlay_wrong_typed_entries_are_skipped() {
    let state = TableState::hydrate(&json!({
        "customRowColors": { "1": "#101010", "2": 5 },
    }));
    assert_eq!(state.overlays.row_colors.len(), 1);
}

#[test]
fn overlays_survive_emit_roundtrip() {
    let mut state = TableState::default();
    state.overlays.cell_colors.insert("1-2".into(), "#abcdef".into());
    state.overlays.row_bold.insert("0".into(), true);
    assert_eq!(TableState::hydrate(&state.emit()), state);
}

// =============================================================
// Structural edits
// =============================================================

#[test]
fn set_cell_in_range() {
    let mut state = TableState::default();
    assert!(state.set_cell(1, 2, "999"));
    assert_eq!(state.rows[1][2].value, "999");
}

#[test]
fn set_cell_out_of_range_rejected() {
    let mut state = TableState::default();
    assert!(!state.set_cell(10, 0, "x"));
    assert!(!state.set_cell(0, 10, "x"));
}

#[test]
fn add_row_matches_column_count() {
    let mut state = TableState::default();
    state.add_row();
    assert_eq!(state.rows.len(), 5);
    assert_eq!(state.rows[4].len(), 4);
    assert_eq!(state.row_heights.len(), 5);
}

#[test]
fn add_column_extends_every_row() {
    let mut state = TableState::default();
    state.add_column();
    assert_eq!(state.column_count(), 5);
    assert!(state.rows.iter().all(|r| r.len() == 5));
    assert_eq!(state.column_widths.len(), 5);
}

#[test]
fn remove_row_keeps_header() {
    let mut state = TableState::default();
    assert!(!state.remove_row(0));
    assert!(state.remove_row(2));
    assert_eq!(state.rows.len(), 3);
    assert_eq!(state.row_heights.len(), 3);
}

#[test]
fn remove_last_column_rejected() {
    let mut state = TableState::default();
    assert!(state.remove_column(3));
    assert!(state.remove_column(2));
    assert!(state.remove_column(1));
    assert!(!state.remove_column(0));
    assert_eq!(state.column_count(), 1);
}

#[test]
fn remove_column_updates_widths() {
    let mut state = TableState::default();
    assert!(state.remove_column(0));
    assert_eq!(state.column_widths, vec![120.0, 120.0, 120.0]);
}
