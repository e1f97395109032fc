//! Match-edit notifications consumed from the matching subsystem

use crate::model::{Address, FunctionMatch};
use serde::{Deserialize, Serialize};

/// Whether a basic-block match was added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEventKind {
    Added,
    Removed,
}

/// A user edit to the match set: one basic-block match added to or removed
/// from the function pair identified by `function`. Adding merges two
/// previously unmatched view nodes into one matched pair; removing splits
/// them again. The view graphs are rebuilt by the caller before this event is
/// delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub kind: MatchEventKind,
    pub function: FunctionMatch,
    pub primary_block: Address,
    pub secondary_block: Address,
}

impl MatchEvent {
    pub fn added(
        function: FunctionMatch,
        primary_block: Address,
        secondary_block: Address,
    ) -> Self {
        MatchEvent {
            kind: MatchEventKind::Added,
            function,
            primary_block,
            secondary_block,
        }
    }

    pub fn removed(
        function: FunctionMatch,
        primary_block: Address,
        secondary_block: Address,
    ) -> Self {
        MatchEvent {
            kind: MatchEventKind::Removed,
            function,
            primary_block,
            secondary_block,
        }
    }
}
