// pricehound/src/pipeline/context_data.rs

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable state for one pipeline run.
///
/// Every handler receives a clone of the same `ContextData`, so writes made by
/// one step are visible to the next. Cloning is cheap (an `Arc` bump).
///
/// IMPORTANT: guards returned by `read`/`write` are blocking `parking_lot`
/// guards and MUST be dropped before any `.await` point.
#[derive(Debug)]
pub struct ContextData<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> ContextData<T> {
  pub fn new(data: T) -> Self {
    ContextData(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
    self.0.try_read()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
    self.0.try_write()
  }

  /// Reads one value out of the context and releases the lock immediately.
  /// Handy right before an `.await`.
  pub fn with_read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
    f(&*self.0.read())
  }

  /// Applies a mutation under a short-lived write lock.
  pub fn with_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    f(&mut *self.0.write())
  }
}

impl<T: Send + Sync + 'static> Clone for ContextData<T> {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for ContextData<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
