#![allow(clippy::float_cmp)]

use serde_json::{Value, json};

use super::*;

// =============================================================
// SeriesPoint comment normalization
// =============================================================

#[test]
fn comment_stores_trimmed_text() {
    let mut p = SeriesPoint::new("Jan", 400.0);
    p.set_comment("  strong month  ");
    assert_eq!(p.comment.as_deref(), Some("strong month"));
}

#[test]
fn whitespace_comment_clears_field() {
    let mut p = SeriesPoint::new("Jan", 400.0);
    p.set_comment("note");
    p.set_comment("   \t ");
    assert_eq!(p.comment, None);
}

#[test]
fn empty_comment_clears_field() {
    let mut p = SeriesPoint::new("Jan", 400.0);
    p.set_comment("note");
    p.set_comment("");
    assert_eq!(p.comment, None);
}

#[test]
fn absent_comment_is_omitted_from_payload() {
    let p = SeriesPoint::new("Jan", 400.0);
    let v = serde_json::to_value(&p).unwrap();
    assert!(v.get("comment").is_none());
}

#[test]
fn present_comment_serializes() {
    let mut p = SeriesPoint::new("Jan", 400.0);
    p.set_comment("ok");
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["comment"], "ok");
}

// =============================================================
// Hydration idempotence across every kind
// =============================================================

#[test]
fn hydrate_emit_is_idempotent_for_all_kinds() {
    use crate::geometry::WidgetKind;
    for kind in WidgetKind::ALL {
        let first = WidgetPayload::default_for(kind).emit();
        let second = WidgetPayload::hydrate(kind, &first).emit();
        assert_eq!(first, second, "{kind:?} payload drifted across a hydrate/emit cycle");
    }
}

#[test]
fn hydrate_tolerates_garbage_payloads() {
    use crate::geometry::WidgetKind;
    let garbage = [json!(null), json!(42), json!("nope"), json!([1, 2, 3]), json!({})];
    for kind in WidgetKind::ALL {
        for data in &garbage {
            let state = WidgetPayload::hydrate(kind, data);
            assert_eq!(state, WidgetPayload::default_for(kind));
        }
    }
}

#[test]
fn title_dispatch() {
    use crate::geometry::WidgetKind;
    assert_eq!(WidgetPayload::default_for(WidgetKind::Kpi).title(), "Total Revenue");
    assert_eq!(WidgetPayload::default_for(WidgetKind::Pie).title(), "Pie Chart");
    assert_eq!(WidgetPayload::default_for(WidgetKind::Text).title(), "Text");
}

// =============================================================
// Defensive field accessors
// =============================================================

#[test]
fn str_field_falls_back_on_wrong_type() {
    let data = json!({ "title": 42 });
    assert_eq!(str_field(&data, "title", "fallback"), "fallback");
}

#[test]
fn f64_field_coerces_integers() {
    let data = json!({ "n": 7 });
    assert_eq!(f64_field(&data, "n", 0.0), 7.0);
}

#[test]
fn bool_field_falls_back_on_absent() {
    assert!(bool_field(&Value::Null, "flag", true));
}

#[test]
fn series_field_skips_malformed_points() {
    let default = vec![SeriesPoint::new("D", 1.0)];
    let data = json!({ "data": [
        { "name": "ok", "value": 3.0 },
        { "name": "no value" },
        { "value": 5.0 },
        "scalar",
        { "name": "annotated", "value": 4.0, "comment": "  hi " },
    ]});
    let series = series_field(&data, "data", &default);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].name, "ok");
    assert_eq!(series[1].comment.as_deref(), Some("hi"));
}

#[test]
fn series_field_all_malformed_restores_default() {
    let default = vec![SeriesPoint::new("D", 1.0)];
    let data = json!({ "data": ["a", "b"] });
    assert_eq!(series_field(&data, "data", &default), default);
}

#[test]
fn series_field_empty_array_restores_default() {
    let default = vec![SeriesPoint::new("D", 1.0)];
    let data = json!({ "data": [] });
    assert_eq!(series_field(&data, "data", &default), default);
}

#[test]
fn colors_field_skips_non_strings() {
    let data = json!({ "colors": ["#111111", 3, "#222222"] });
    assert_eq!(colors_field(&data, "colors", &["#999999"]), vec!["#111111", "#222222"]);
}

#[test]
fn colors_field_empty_restores_default() {
    let data = json!({ "colors": [] });
    assert_eq!(colors_field(&data, "colors", &["#999999"]), vec!["#999999"]);
}
