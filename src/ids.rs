use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for auto-incrementing object IDs (starts at 1, 0 is reserved).
static OBJECT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Player identifier, index-based for efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

/// Unique identifier for a game object in the arena.
///
/// Relations between permanents (enchanted-by, control-stealing auras) are
/// expressed as `ObjectId` lookups rather than references, so attached
/// effects never own their host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u64);

impl PlayerId {
    /// Create a player ID from a seat index.
    pub fn from_index(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ObjectId {
    /// Create a new object ID with auto-incrementing counter.
    pub fn new() -> Self {
        Self(OBJECT_ID_COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Create an object ID from a specific value (for when you need explicit control).
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }
}
