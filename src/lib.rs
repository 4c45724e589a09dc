//! Free-form widget canvas core for the DashGen dashboard builder.
//!
//! This crate owns the geometry and interaction model of a dashboard canvas:
//! widget rectangles, collision-aware auto-placement for new widgets, the
//! drag and resize gesture state machines, the data-binding contract between
//! a widget's editable state and its persisted payload, and the multi-project
//! store the canvas flushes to after every mutation. The host UI layer is
//! responsible only for wiring pointer events to the controllers and
//! rendering the resulting geometry; chart drawing and rich-text editing are
//! delegated to host collaborators behind capability traits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Widget/project records, kinds, size limits, rect math |
//! | [`placement`] | Collision-aware auto-placement for new widgets |
//! | [`drag`] | Drag gesture state machine |
//! | [`resize`] | Resize gesture state machine and handle anchors |
//! | [`binding`] | Per-kind payload hydration and whole-snapshot emission |
//! | [`canvas`] | Canvas container: structural commands + geometry updates |
//! | [`project`] | Multi-project persistence over a keyed storage backend |
//! | [`ai`] | Collaborator reply parsing and action translation |
//! | [`consts`] | Shared numeric constants (grid, clamps, viewport) |

pub mod ai;
pub mod binding;
pub mod canvas;
pub mod consts;
pub mod drag;
pub mod geometry;
pub mod placement;
pub mod project;
pub mod resize;
