//! Resize gesture state machine for a single widget.
//!
//! Eight handles per widget: four corners and four edges. Dragging a handle
//! resizes along the axes its direction token names, clamped per kind. As in
//! the shipped UI, the 'n' and 'w' handles change only the size, never the
//! position, so resizing from the top/left grows the widget downward and
//! rightward instead of anchoring the dragged edge. That asymmetry is pinned
//! by tests pending product confirmation.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::geometry::{Point, SizeLimits};

/// Anchor position of a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Horizontal response: `1` grows width with +dx ('e'), `-1` with -dx
    /// ('w'), `0` leaves width untouched.
    #[must_use]
    pub fn x_sign(self) -> f64 {
        match self {
            Self::E | Self::Ne | Self::Se => 1.0,
            Self::W | Self::Nw | Self::Sw => -1.0,
            Self::N | Self::S => 0.0,
        }
    }

    /// Vertical response: `1` grows height with +dy ('s'), `-1` with -dy
    /// ('n'), `0` leaves height untouched.
    #[must_use]
    pub fn y_sign(self) -> f64 {
        match self {
            Self::S | Self::Se | Self::Sw => 1.0,
            Self::N | Self::Ne | Self::Nw => -1.0,
            Self::E | Self::W => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Resizing { anchor: ResizeAnchor, start_pointer: Point, start_width: f64, start_height: f64 },
}

/// Per-widget resize controller: `Idle → Resizing → Idle`.
///
/// Independent of the drag controller; handles and the drag strip are
/// spatially disjoint so both machines are never active at once.
#[derive(Debug, Clone, Copy)]
pub struct ResizeController {
    state: State,
    /// Handle currently under the pointer. Cosmetic highlight only.
    pub hovered: Option<ResizeAnchor>,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeController {
    #[must_use]
    pub fn new() -> Self {
        Self { state: State::Idle, hovered: None }
    }

    /// Whether a resize is in progress.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self.state, State::Resizing { .. })
    }

    /// Pointer-down on a handle: record the direction token, the pointer's
    /// start coordinates, and the widget's start size.
    pub fn pointer_down(&mut self, anchor: ResizeAnchor, pointer: Point, width: f64, height: f64) {
        self.state =
            State::Resizing { anchor, start_pointer: pointer, start_width: width, start_height: height };
    }

    /// Pointer-move. Returns the new `(width, height)` while resizing, with
    /// width clamped to `[min_width, usable_width]` and height to
    /// `[min_height, max_height]`; `None` while idle.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        limits: SizeLimits,
        usable_width: f64,
    ) -> Option<(f64, f64)> {
        let State::Resizing { anchor, start_pointer, start_width, start_height } = self.state else {
            return None;
        };
        let dx = pointer.x - start_pointer.x;
        let dy = pointer.y - start_pointer.y;

        let mut width = start_width;
        let mut height = start_height;

        if anchor.x_sign() != 0.0 {
            let max_width = usable_width.max(limits.min_width);
            width = (start_width + anchor.x_sign() * dx).clamp(limits.min_width, max_width);
        }
        if anchor.y_sign() != 0.0 {
            height = (start_height + anchor.y_sign() * dy).clamp(limits.min_height, limits.max_height);
        }

        Some((width, height))
    }

    /// Global pointer-up: end the resize and clear any hover highlight.
    pub fn pointer_up(&mut self) {
        self.state = State::Idle;
        self.hovered = None;
    }
}
