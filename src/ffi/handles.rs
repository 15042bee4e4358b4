//! Handle type for opaque references to native SoundTouch instances.
//!
//! The native API hands out `void*` pointers; they are carried as a `u64`
//! token so the safe layer never dereferences them.

use std::os::raw::c_void;

/// Opaque handle to a native SoundTouch instance.
///
/// A zero value means "no instance".
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoundTouchHandle {
    raw: u64,
}

impl SoundTouchHandle {
    /// Create an invalid (null) handle.
    #[inline]
    pub const fn invalid() -> Self {
        Self { raw: 0 }
    }

    /// Wrap a raw token.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self { raw }
    }

    /// Check if this handle is valid (non-zero).
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.raw != 0
    }

    /// The raw token value.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.raw
    }

    #[inline]
    pub(crate) fn from_ptr(ptr: *mut c_void) -> Self {
        Self {
            raw: ptr as usize as u64,
        }
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.raw as usize as *mut c_void
    }
}
