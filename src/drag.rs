//! Drag gesture state machine for a single widget.
//!
//! Translates pointer-down/move/up into rectangle translation. The host wires
//! document-global move/up listeners for the duration of a drag and tears
//! them down on the global up event, so a drag survives the pointer leaving
//! the widget's bounds.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::geometry::Point;

/// What the pointer-down landed on inside the widget's element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The dedicated drag-handle strip along the widget's top edge.
    HandleStrip,
    /// The widget body outside any interactive sub-control.
    Body,
    /// A descendant button, input, select, or table cell. Never starts a drag.
    Control,
}

/// Internal state for the drag machine.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dragging {
        /// Pointer offset from the widget's top-left corner at grab time.
        grab_offset: Point,
    },
}

/// Per-widget drag controller: `Idle → Dragging → Idle`.
#[derive(Debug, Clone, Copy)]
pub struct DragController {
    state: State,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Pointer-down on the widget. Returns `true` if a drag started.
    ///
    /// A drag starts only from the handle strip or the body, only while no
    /// inline edit is active, and only for a single click — `click_count >= 2`
    /// is the title-edit gesture and must not be misread as a drag.
    pub fn pointer_down(
        &mut self,
        pointer: Point,
        widget_pos: Point,
        target: DragTarget,
        editing: bool,
        click_count: u8,
    ) -> bool {
        if target == DragTarget::Control || editing || click_count >= 2 {
            return false;
        }
        self.state = State::Dragging {
            grab_offset: Point::new(pointer.x - widget_pos.x, pointer.y - widget_pos.y),
        };
        true
    }

    /// Pointer-move. Returns the new widget position while dragging, clamped
    /// to `>= 0` on both axes; `None` while idle.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<(f64, f64)> {
        let State::Dragging { grab_offset } = self.state else {
            return None;
        };
        let x = (pointer.x - grab_offset.x).max(0.0);
        let y = (pointer.y - grab_offset.y).max(0.0);
        Some((x, y))
    }

    /// Global pointer-up: end the drag wherever the pointer is.
    pub fn pointer_up(&mut self) {
        self.state = State::Idle;
    }
}
