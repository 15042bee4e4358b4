//! FFI bindings to the SoundTouch library.
//!
//! This module contains the low-level entry points and the runtime loader.
//! Users should prefer the safe Rust wrappers in the parent modules.

pub mod api;
pub mod handles;
pub mod loader;
pub mod raw;

pub use api::NativeApi;
pub use handles::SoundTouchHandle;
pub use loader::NativeLibrary;
pub(crate) use loader::{global, init_global};
