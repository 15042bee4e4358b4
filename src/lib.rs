//! Rust bindings for the SoundTouch pitch and tempo library.
//!
//! This crate loads the SoundTouch shared library at runtime and wraps each
//! native instance in a single-owner value that creates it exactly once and
//! destroys it exactly once, on [`SoundTouch::dispose`] or on drop.
//!
//! # Example
//!
//! ```no_run
//! use soundtouch::{SoundTouch, StretchOptions};
//!
//! fn main() -> soundtouch::Result<()> {
//!     // Load the native library (once per process)
//!     soundtouch::init()?;
//!     println!("SoundTouch {}", soundtouch::library_version()?);
//!
//!     let st = SoundTouch::new()?;
//!     st.set_sample_rate(44100)?;
//!     st.set_channels(2)?;
//!     st.apply(&StretchOptions {
//!         tempo_change: 10.0,
//!         pitch_semitones: -2.0,
//!         ..Default::default()
//!     })?;
//!
//!     // Or process a whole file
//!     soundtouch::process_file("in.wav", "out.wav", &StretchOptions::default())?;
//!
//!     // Native instance released when `st` goes out of scope
//!     Ok(())
//! }
//! ```
//!
//! # Library location
//!
//! [`init`] loads `SoundTouchDll` through the platform search path, or the
//! file named by the `SOUNDTOUCH_LIBRARY` environment variable. Use
//! [`init_from`] to load a specific file.

pub mod error;
mod ffi;
pub mod handle;
pub mod process;
pub mod processor;
pub mod types;
pub mod wav;

// Re-export main types at the crate root
pub use error::{Error, Result};
pub use ffi::{NativeApi, NativeLibrary, SoundTouchHandle};
pub use handle::OwnedHandle;
pub use process::{process_file, process_file_with};
pub use processor::SoundTouch;
pub use types::{AudioFormat, LoaderOptions, ProcessReport, StretchOptions};
pub use wav::{WavReader, WavWriter};

use std::path::PathBuf;

/// Load the native library, honouring `SOUNDTOUCH_LIBRARY`.
///
/// Must succeed before [`SoundTouch::new`] or [`process_file`]. Safe to call
/// multiple times; only the first successful call loads anything.
pub fn init() -> Result<()> {
    init_with(&LoaderOptions::from_env())
}

/// Load the native library from an explicit path.
pub fn init_from(path: impl Into<PathBuf>) -> Result<()> {
    init_with(&LoaderOptions {
        path: Some(path.into()),
    })
}

/// Load the native library with explicit options.
///
/// Ignored once a library is loaded.
pub fn init_with(options: &LoaderOptions) -> Result<()> {
    ffi::init_global(options).map(|_| ())
}

/// Check if a native library has been loaded.
pub fn is_initialized() -> bool {
    ffi::global().is_ok()
}

/// The loaded library's version string (e.g. "2.3.2").
pub fn library_version() -> Result<String> {
    Ok(ffi::global()?.version_string())
}

/// The loaded library's numeric version (e.g. 20302).
pub fn library_version_id() -> Result<u32> {
    Ok(ffi::global()?.version_id())
}
