//! Per-kind block stores and the handles that address them.
//!
//! A store is a FIFO queue that also remembers slot positions: linking in
//! dump order pops from the front, linking from a plan takes slots by
//! handle. Either way every block leaves its store exactly once.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::{BlockKind, LinkError};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(0);

/// Identifies the session a handle was issued by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn next() -> Self {
        SessionId(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }
}

/// Opaque reference to one ingested block.
///
/// Returned by every `ingest_*` call on a session and redeemable exactly once
/// through a link plan of the same session.
pub struct Handle<T> {
    session: SessionId,
    index: usize,
    _block: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Position of the block within its store, in ingestion order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session && self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}#{})", self.session.0, self.index)
    }
}

/// Blocks of one kind, in ingestion order.
#[derive(Debug)]
pub(crate) struct BlockStore<T> {
    session: SessionId,
    kind: BlockKind,
    slots: Vec<Option<T>>,
    /// Slots before this index have all been taken.
    front: usize,
}

impl<T> BlockStore<T> {
    pub(crate) fn new(session: SessionId, kind: BlockKind) -> Self {
        Self {
            session,
            kind,
            slots: Vec::new(),
            front: 0,
        }
    }

    pub(crate) fn push(&mut self, block: T) -> Handle<T> {
        let index = self.slots.len();
        self.slots.push(Some(block));
        Handle {
            session: self.session,
            index,
            _block: PhantomData,
        }
    }

    /// Take the oldest block not yet linked.
    pub(crate) fn pop_front(&mut self) -> Result<T, LinkError> {
        while let Some(slot) = self.slots.get_mut(self.front) {
            self.front += 1;
            if let Some(block) = slot.take() {
                return Ok(block);
            }
        }
        Err(LinkError::QueueUnderflow { store: self.kind })
    }

    /// Take the block a handle refers to.
    pub(crate) fn take(&mut self, handle: Handle<T>) -> Result<T, LinkError> {
        if handle.session != self.session {
            return Err(LinkError::ForeignHandle { store: self.kind });
        }
        self.slots
            .get_mut(handle.index)
            .and_then(Option::take)
            .ok_or(LinkError::HandleConsumed {
                store: self.kind,
                index: handle.index,
            })
    }

    /// Number of blocks not yet linked.
    pub(crate) fn remaining(&self) -> usize {
        self.slots[self.front.min(self.slots.len())..]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}
