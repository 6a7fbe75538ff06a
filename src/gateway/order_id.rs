//! Order ID allocation
//!
//! The allocator is the only piece of state shared between concurrent
//! requests. It hands out IDs through a single atomic increment, so every
//! caller gets a distinct value and a call that starts after another one
//! returned always gets a larger value.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::core_types::{OrderId, UNSET_ORDER_ID};

/// Process-wide monotonic order ID source.
///
/// The counter is never exposed; `next()` is the only way to read it.
#[derive(Debug)]
pub struct OrderIdAllocator {
    next: AtomicU64,
}

impl OrderIdAllocator {
    /// Allocator whose first ID is `1`.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Allocator whose first ID is `start`.
    ///
    /// # Panics
    /// If `start` is `0`, the unset sentinel.
    pub fn starting_at(start: OrderId) -> Self {
        assert_ne!(start, UNSET_ORDER_ID, "order id 0 is reserved as unset");
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Issue the next order ID.
    ///
    /// # Panics
    /// When the 64-bit ID space is exhausted. The counter would otherwise
    /// wrap to the unset sentinel and start reissuing old IDs, which is
    /// unrecoverable for the process.
    pub fn next(&self) -> OrderId {
        // After u64::MAX is issued the stored value wraps to 0 and stays
        // there, so every later call fails instead of reissuing an ID.
        match self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| {
                (id != UNSET_ORDER_ID).then(|| id.wrapping_add(1))
            }) {
            Ok(id) => id,
            Err(_) => panic!("order id space exhausted"),
        }
    }
}

impl Default for OrderIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
