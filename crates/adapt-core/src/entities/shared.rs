//! Shared entity handles

use parking_lot::RwLock;
use std::sync::Arc;

/// A shared, in-place-mutable handle to a cached entity.
///
/// The handle for a given id is allocated exactly once; cache updates write
/// through it rather than replacing it, so references held outside the
/// cache observe updates. Handle identity (`Arc::ptr_eq`) therefore doubles
/// as entity identity.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap a value in a fresh shared handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}
