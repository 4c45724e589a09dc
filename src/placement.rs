//! Collision-aware auto-placement for newly created widgets.
//!
//! Scans a fixed 3-column virtual grid row-major and returns the first cell
//! whose padded rectangle (at the *requested* widget size) does not intersect
//! any existing padded widget rect. Grid spacing is fixed but occupancy
//! testing uses the actual requested size, so oversized widgets can still
//! land in a grid slot when nothing collides — loose packing, not strict
//! grid layout. When every cell within the row bound is occupied the engine
//! falls back to a stacked position that may overlap.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::consts::{
    GRID_CELL_HEIGHT, GRID_CELL_WIDTH, GRID_COLUMNS, GRID_GAP_X, GRID_GAP_Y, GRID_MAX_ROWS,
    GRID_START_X, GRID_START_Y, PLACEMENT_PADDING, STACK_FALLBACK_STEP,
};
use crate::geometry::Rect;

/// Find a non-overlapping position for a new `width`×`height` widget.
///
/// Returns the top-left corner of the first free grid cell in row-major
/// order, or the stacked fallback `(START_X, START_Y + n*100)` when no cell
/// within the row bound is free.
#[must_use]
pub fn find_next_position(width: f64, height: f64, existing: &[Rect]) -> (f64, f64) {
    let padded: Vec<Rect> = existing.iter().map(|r| r.expand(PLACEMENT_PADDING)).collect();

    for row in 0..GRID_MAX_ROWS {
        for col in 0..GRID_COLUMNS {
            let x = GRID_START_X + col as f64 * (GRID_CELL_WIDTH + GRID_GAP_X);
            let y = GRID_START_Y + row as f64 * (GRID_CELL_HEIGHT + GRID_GAP_Y);
            let candidate = Rect::new(x, y, width, height).expand(PLACEMENT_PADDING);
            if !padded.iter().any(|r| candidate.intersects(r)) {
                return (x, y);
            }
        }
    }

    // Escape hatch: stacked placement below the grid origin. May overlap.
    (GRID_START_X, GRID_START_Y + existing.len() as f64 * STACK_FALLBACK_STEP)
}
