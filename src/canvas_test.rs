#![allow(clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::consts::PLACEMENT_PADDING;
use crate::project::{MemoryStorage, ProjectStore};

fn canvas() -> Canvas {
    Canvas::new(ProjectStore::load(Box::new(MemoryStorage::new())))
}

// =============================================================
// Add
// =============================================================

#[test]
fn first_kpi_lands_in_first_cell_at_default_size() {
    let mut c = canvas();
    let id = c.add(WidgetKind::Kpi);
    let w = c.widget(&id).unwrap();
    assert_eq!((w.x, w.y), (20.0, 20.0));
    assert_eq!((w.width, w.height), (300.0, 180.0));
    assert_eq!(w.grid_position, 0);
}

#[test]
fn second_kpi_lands_in_second_column() {
    let mut c = canvas();
    c.add(WidgetKind::Kpi);
    let second = c.add(WidgetKind::Kpi);
    let w = c.widget(&second).unwrap();
    assert_eq!((w.x, w.y), (350.0, 20.0));
    assert_eq!(w.grid_position, 1);
}

#[test]
fn add_normalizes_default_payload() {
    let mut c = canvas();
    let id = c.add(WidgetKind::Kpi);
    let w = c.widget(&id).unwrap();
    assert_eq!(w.data["title"], "Total Revenue");
    assert_eq!(w.data["trend"], "up");
}

#[test]
fn add_with_partial_data_lands_schema_complete() {
    let mut c = canvas();
    let id = c.add_with_data(WidgetKind::Kpi, json!({ "title": "Signups" }));
    let w = c.widget(&id).unwrap();
    assert_eq!(w.data["title"], "Signups");
    // Fields the descriptor omitted are present with kind defaults.
    assert_eq!(w.data["value"], "124.5");
    assert_eq!(w.data["accentColor"], "#3b82f6");
}

#[test]
fn added_widgets_never_overlap() {
    let mut c = canvas();
    for kind in [WidgetKind::Kpi, WidgetKind::Table, WidgetKind::Bar, WidgetKind::Text] {
        c.add(kind);
    }
    let rects: Vec<_> = c.widgets().iter().map(crate::geometry::Widget::rect).collect();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(!a.expand(PLACEMENT_PADDING).intersects(&b.expand(PLACEMENT_PADDING)));
        }
    }
}

// =============================================================
// Delete / duplicate
// =============================================================

#[test]
fn delete_leaves_survivors_untouched() {
    let mut c = canvas();
    let first = c.add(WidgetKind::Kpi);
    let second = c.add(WidgetKind::Kpi);
    assert!(c.delete(&first));
    assert_eq!(c.widgets().len(), 1);
    let survivor = c.widget(&second).unwrap();
    assert_eq!((survivor.x, survivor.y), (350.0, 20.0));
}

#[test]
fn delete_unknown_id_is_refused() {
    let mut c = canvas();
    c.add(WidgetKind::Kpi);
    assert!(!c.delete(&Uuid::new_v4()));
    assert_eq!(c.widgets().len(), 1);
}

#[test]
fn duplicate_copies_payload_with_fresh_identity() {
    let mut c = canvas();
    let source = c.add(WidgetKind::Kpi);
    c.merge_data(&source, &json!({ "title": "Original" }));
    let clone = c.duplicate(&source).unwrap();

    assert_ne!(clone, source);
    let (s, d) = (c.widget(&source).unwrap(), c.widget(&clone).unwrap());
    assert_eq!(s.data, d.data);
    assert_eq!((s.width, s.height), (d.width, d.height));
    assert_ne!((s.x, s.y), (d.x, d.y));
    assert_eq!(d.grid_position, 1);
}

#[test]
fn duplicate_payload_is_independent() {
    let mut c = canvas();
    let source = c.add(WidgetKind::Kpi);
    let clone = c.duplicate(&source).unwrap();
    c.merge_data(&clone, &json!({ "title": "Changed" }));
    assert_eq!(c.widget(&source).unwrap().data["title"], "Total Revenue");
}

#[test]
fn duplicate_unknown_id_returns_none() {
    let mut c = canvas();
    assert!(c.duplicate(&Uuid::new_v4()).is_none());
}

// =============================================================
// Geometry updates
// =============================================================

#[test]
fn update_position_clamps_to_origin() {
    let mut c = canvas();
    let id = c.add(WidgetKind::Kpi);
    assert!(c.update_position(&id, -10.0, -10.0));
    let w = c.widget(&id).unwrap();
    assert_eq!((w.x, w.y), (0.0, 0.0));
}

#[test]
fn update_size_reclamps_to_limits() {
    let mut c = canvas();
    let id = c.add(WidgetKind::Table);
    assert!(c.update_size(&id, 50.0, 5000.0));
    let w = c.widget(&id).unwrap();
    assert_eq!(w.width, 500.0);
    assert_eq!(w.height, 1000.0);
}

#[test]
fn update_size_caps_width_at_usable_width() {
    let mut c = canvas();
    c.set_usable_width(800.0);
    let id = c.add(WidgetKind::Table);
    assert!(c.update_size(&id, 2000.0, 500.0));
    assert_eq!(c.widget(&id).unwrap().width, 800.0);
}

#[test]
fn usable_width_floor_is_zero() {
    let mut c = canvas();
    c.set_usable_width(-50.0);
    assert_eq!(c.usable_width(), 0.0);
}

// =============================================================
// Payload updates
// =============================================================

#[test]
fn update_data_replaces_wholesale() {
    let mut c = canvas();
    let id = c.add(WidgetKind::Text);
    assert!(c.update_data(&id, json!({ "content": "hi", "bgColor": "#111111" })));
    assert_eq!(c.widget(&id).unwrap().data["content"], "hi");
}

#[test]
fn merge_data_sets_and_removes_keys() {
    let mut c = canvas();
    let id = c.add(WidgetKind::Kpi);
    assert!(c.merge_data(&id, &json!({ "value": "200", "unit": null })));
    let data = &c.widget(&id).unwrap().data;
    assert_eq!(data["value"], "200");
    assert!(data.get("unit").is_none());
    // Untouched keys survive.
    assert_eq!(data["title"], "Total Revenue");
}

#[test]
fn merge_data_rejects_non_object_patch() {
    let mut c = canvas();
    let id = c.add(WidgetKind::Kpi);
    assert!(!c.merge_data(&id, &json!("scalar")));
    assert!(!c.merge_data(&id, &json!([1, 2])));
}

#[test]
fn merge_data_unknown_id_is_refused() {
    let mut c = canvas();
    assert!(!c.merge_data(&Uuid::new_v4(), &json!({ "a": 1 })));
}
