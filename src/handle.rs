//! Single-owner lifecycle for a native SoundTouch instance.
//!
//! An [`OwnedHandle`] calls the native create entry point exactly once when
//! it is acquired and the native destroy entry point at most once, either
//! from [`OwnedHandle::dispose`] or from `Drop`, whichever runs first.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::ffi::{NativeApi, SoundTouchHandle};

/// Exclusive owner of one native instance.
///
/// The handle is non-zero while the native instance is live and zero
/// afterwards. Every native call made through [`with`](Self::with) holds the
/// instance lock, so a concurrent [`dispose`](Self::dispose) waits for it and
/// a call can never observe a handle that is being destroyed.
pub struct OwnedHandle {
    handle: Mutex<SoundTouchHandle>,
    api: Arc<dyn NativeApi>,
}

impl OwnedHandle {
    /// Create a native instance through `api` and take ownership of it.
    ///
    /// Fails with [`Error::CreateFailed`] if the native call returns a null
    /// handle; nothing is destroyed in that case.
    pub fn acquire(api: Arc<dyn NativeApi>) -> Result<Self> {
        let handle = api.create();
        if !handle.is_valid() {
            tracing::warn!("native create returned a null handle");
            return Err(Error::CreateFailed);
        }
        tracing::debug!(handle = handle.as_raw(), "created native instance");

        Ok(Self {
            handle: Mutex::new(handle),
            api,
        })
    }

    /// Current raw token; zero once disposed.
    pub fn raw(&self) -> u64 {
        self.handle.lock().as_raw()
    }

    /// Check if the native instance is still owned.
    pub fn is_live(&self) -> bool {
        self.handle.lock().is_valid()
    }

    /// Run `f` against the live handle while holding the instance lock.
    pub fn with<R>(&self, f: impl FnOnce(&dyn NativeApi, SoundTouchHandle) -> R) -> Result<R> {
        let guard = self.handle.lock();
        if !guard.is_valid() {
            return Err(Error::AlreadyDisposed);
        }
        Ok(f(self.api.as_ref(), *guard))
    }

    /// Release the native instance.
    ///
    /// Safe to call any number of times, from any thread. Returns `true` if
    /// this call destroyed the instance, `false` if it was already released.
    pub fn dispose(&self) -> bool {
        self.release().is_some()
    }

    fn release(&self) -> Option<SoundTouchHandle> {
        let mut guard = self.handle.lock();
        if !guard.is_valid() {
            return None;
        }
        // Cleared before the call so a panicking destroy is never retried.
        let handle = std::mem::replace(&mut *guard, SoundTouchHandle::invalid());
        unsafe {
            self.api.destroy(handle);
        }
        Some(handle)
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.release() {
            tracing::debug!(
                handle = handle.as_raw(),
                "released native instance on drop without explicit dispose"
            );
        }
    }
}

impl fmt::Debug for OwnedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedHandle")
            .field("handle", &self.raw())
            .finish()
    }
}
