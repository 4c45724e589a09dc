//! Canvas container: the rendered surface's command layer.
//!
//! Owns the project store and the live usable width, renders one absolutely
//! positioned element per widget in the active project, and dispatches the
//! structural commands (add / delete / duplicate) plus the geometry and data
//! updates the gesture controllers and bindings produce. Every mutation is
//! applied against the live widget list and flushed to storage immediately;
//! nothing operates on a captured snapshot.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::binding::WidgetPayload;
use crate::consts::DEFAULT_USABLE_WIDTH;
use crate::geometry::{Widget, WidgetId, WidgetKind};
use crate::placement::find_next_position;
use crate::project::ProjectStore;

/// The canvas: active project's widget surface plus viewport tracking.
pub struct Canvas {
    /// Backing store; project-level operations go through this directly.
    pub store: ProjectStore,
    usable_width: f64,
}

impl Canvas {
    #[must_use]
    pub fn new(store: ProjectStore) -> Self {
        Self { store, usable_width: DEFAULT_USABLE_WIDTH }
    }

    /// Current usable canvas width, the upper bound for widget widths.
    #[must_use]
    pub fn usable_width(&self) -> f64 {
        self.usable_width
    }

    /// Recompute the usable width on viewport resize.
    pub fn set_usable_width(&mut self, width: f64) {
        self.usable_width = width.max(0.0);
    }

    /// Widgets of the active project, in stored order.
    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.store.active_project().widgets
    }

    /// Look up a widget in the active project.
    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.store.active_project().widget(id)
    }

    /// Add a widget of `kind` with its default payload. Returns the new id.
    pub fn add(&mut self, kind: WidgetKind) -> WidgetId {
        self.add_with_data(kind, WidgetPayload::default_for(kind).emit())
    }

    /// Add a widget of `kind` hydrated from `data` (the AI-initiated add
    /// path). The payload is normalized through the kind's binding so that
    /// partial descriptors land schema-complete.
    pub fn add_with_data(&mut self, kind: WidgetKind, data: Value) -> WidgetId {
        let (width, height) = kind.default_size();
        let payload = WidgetPayload::hydrate(kind, &data).emit();

        let project = self.store.active_project_mut();
        let (x, y) = find_next_position(width, height, &project.rects());
        let widget = Widget {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width,
            height,
            grid_position: project.widgets.len(),
            data: payload,
        };
        let id = widget.id;
        project.widgets.push(widget);
        info!(%id, kind = kind.as_str(), x, y, "canvas: widget added");
        self.store.flush();
        id
    }

    /// Delete a widget by id. Survivors keep their ids and positions; there
    /// is no re-layout. Returns false when the id is unknown.
    pub fn delete(&mut self, id: &WidgetId) -> bool {
        let project = self.store.active_project_mut();
        let Some(idx) = project.widgets.iter().position(|w| w.id == *id) else {
            return false;
        };
        project.widgets.remove(idx);
        info!(%id, "canvas: widget deleted");
        self.store.flush();
        true
    }

    /// Duplicate a widget: fresh id, deep-copied payload, freshly computed
    /// non-colliding position, fresh ordinal. Returns the clone's id, or
    /// `None` when the source id is unknown.
    pub fn duplicate(&mut self, id: &WidgetId) -> Option<WidgetId> {
        let project = self.store.active_project_mut();
        let source = project.widget(id)?.clone();
        let (x, y) = find_next_position(source.width, source.height, &project.rects());
        let clone = Widget {
            id: Uuid::new_v4(),
            kind: source.kind,
            x,
            y,
            width: source.width,
            height: source.height,
            grid_position: project.widgets.len(),
            data: source.data,
        };
        let clone_id = clone.id;
        project.widgets.push(clone);
        info!(source = %id, clone = %clone_id, "canvas: widget duplicated");
        self.store.flush();
        Some(clone_id)
    }

    /// Move a widget (drag path). Position is clamped to `>= 0` per axis.
    /// Returns false when the id is unknown.
    pub fn update_position(&mut self, id: &WidgetId, x: f64, y: f64) -> bool {
        let project = self.store.active_project_mut();
        let Some(widget) = project.widget_mut(id) else {
            return false;
        };
        widget.x = x.max(0.0);
        widget.y = y.max(0.0);
        self.store.flush();
        true
    }

    /// Resize a widget (resize path). Size is re-clamped to the kind's
    /// limits and the current usable width. Returns false when unknown.
    pub fn update_size(&mut self, id: &WidgetId, width: f64, height: f64) -> bool {
        let usable = self.usable_width;
        let project = self.store.active_project_mut();
        let Some(widget) = project.widget_mut(id) else {
            return false;
        };
        let limits = widget.kind.size_limits();
        widget.width = width.clamp(limits.min_width, usable.max(limits.min_width));
        widget.height = height.clamp(limits.min_height, limits.max_height);
        self.store.flush();
        true
    }

    /// Replace a widget's payload wholesale (binding emission path).
    /// Returns false when the id is unknown.
    pub fn update_data(&mut self, id: &WidgetId, data: Value) -> bool {
        let project = self.store.active_project_mut();
        let Some(widget) = project.widget_mut(id) else {
            return false;
        };
        widget.data = data;
        self.store.flush();
        true
    }

    /// Merge a partial patch into a widget's payload: present keys are set,
    /// null keys are removed (the AI modify path). Returns false when the id
    /// is unknown or the patch is not an object.
    pub fn merge_data(&mut self, id: &WidgetId, patch: &Value) -> bool {
        let Some(incoming) = patch.as_object() else {
            return false;
        };
        let project = self.store.active_project_mut();
        let Some(widget) = project.widget_mut(id) else {
            return false;
        };
        if !widget.data.is_object() {
            widget.data = serde_json::json!({});
        }
        if let Some(existing) = widget.data.as_object_mut() {
            for (key, value) in incoming {
                if value.is_null() {
                    existing.remove(key);
                } else {
                    existing.insert(key.clone(), value.clone());
                }
            }
        }
        self.store.flush();
        true
    }
}
