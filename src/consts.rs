//! Shared numeric constants for the dashboard canvas.

// ── Placement grid ──────────────────────────────────────────────

/// Number of columns in the virtual placement grid.
pub const GRID_COLUMNS: usize = 3;

/// Maximum rows scanned before falling back to stacked placement.
pub const GRID_MAX_ROWS: usize = 50;

/// Left edge of the first grid column, in canvas pixels.
pub const GRID_START_X: f64 = 20.0;

/// Top edge of the first grid row, in canvas pixels.
pub const GRID_START_Y: f64 = 20.0;

/// Horizontal pitch of a grid cell (exclusive of gap).
pub const GRID_CELL_WIDTH: f64 = 300.0;

/// Vertical pitch of a grid cell (exclusive of gap).
pub const GRID_CELL_HEIGHT: f64 = 300.0;

/// Horizontal gap between grid cells.
pub const GRID_GAP_X: f64 = 30.0;

/// Vertical gap between grid cells.
pub const GRID_GAP_Y: f64 = 30.0;

/// Margin added to both the candidate and existing rects in occupancy tests.
pub const PLACEMENT_PADDING: f64 = 10.0;

/// Vertical step of the stacked fallback position when the grid is exhausted.
pub const STACK_FALLBACK_STEP: f64 = 100.0;

// ── Canvas ──────────────────────────────────────────────────────

/// Usable canvas width assumed before the host reports a real viewport.
pub const DEFAULT_USABLE_WIDTH: f64 = 1200.0;
