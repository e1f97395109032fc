//! Parallax History — selection snapshots, bounded undo/redo, match patching
//!
//! One history per single-side graph plus one for the combined graph. The
//! super graph has none: its selection follows the combined view.

pub mod history;
pub mod patching;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

pub use history::{HistoryEvent, SelectionHistory, DEFAULT_CAPACITY};
pub use snapshot::{SelectionSnapshot, SnapshotEvent};
