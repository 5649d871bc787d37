//! Linking error types.

use std::fmt;

/// The five kinds of block a session stores until linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    RouteDescriptors,
    Routes,
    DayTypeSets,
    HourBlocks,
    Legends,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::RouteDescriptors,
        BlockKind::Routes,
        BlockKind::DayTypeSets,
        BlockKind::HourBlocks,
        BlockKind::Legends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::RouteDescriptors => "route descriptors",
            BlockKind::Routes => "routes",
            BlockKind::DayTypeSets => "day-type sets",
            BlockKind::HourBlocks => "hour blocks",
            BlockKind::Legends => "legends",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while linking ingested blocks into the schedule tree.
///
/// All of these mean the blocks were ingested in a different shape or order
/// than the dump's structure requires. The session is consumed either way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// A block was needed but its store had nothing left
    #[error("ordering violated: no {store} left to link")]
    QueueUnderflow { store: BlockKind },

    /// A handle was issued by a different session
    #[error("handle for {store} belongs to another session")]
    ForeignHandle { store: BlockKind },

    /// A handle was used twice
    #[error("{store} block #{index} was already linked")]
    HandleConsumed { store: BlockKind, index: usize },

    /// A plan level has a different number of children than its blocks need
    #[error("link plan gives {planned} {store} entries where the blocks need {expected}")]
    PlanShapeMismatch {
        store: BlockKind,
        expected: usize,
        planned: usize,
    },

    /// Blocks were ingested but never linked
    #[error("{count} {store} block(s) were ingested but never linked")]
    LeftoverBlocks { store: BlockKind, count: usize },
}

impl LinkError {
    /// The store the error concerns.
    pub fn store(&self) -> BlockKind {
        match self {
            LinkError::QueueUnderflow { store }
            | LinkError::ForeignHandle { store }
            | LinkError::HandleConsumed { store, .. }
            | LinkError::PlanShapeMismatch { store, .. }
            | LinkError::LeftoverBlocks { store, .. } => *store,
        }
    }
}
