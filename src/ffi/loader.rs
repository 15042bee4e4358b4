//! Runtime loading of the SoundTouch shared library.
//!
//! The library is loaded at most once per process and kept alive until exit.

use std::ffi::{CStr, OsString};
use std::sync::Arc;

use libloading::Library;
use once_cell::sync::OnceCell;

use super::api::NativeApi;
use super::handles::SoundTouchHandle;
use super::raw::*;
use crate::error::{Error, Result};
use crate::types::LoaderOptions;

static LIBRARY: OnceCell<Arc<NativeLibrary>> = OnceCell::new();

/// A loaded SoundTouch shared library with its entry points resolved.
pub struct NativeLibrary {
    name: String,
    create_instance: CreateInstanceFn,
    destroy_instance: DestroyInstanceFn,
    get_version_string: GetVersionStringFn,
    get_version_id: GetVersionIdFn,
    set_sample_rate: SetUintFn,
    set_channels: SetUintFn,
    set_tempo_change: SetFloatFn,
    set_pitch_semitones: SetFloatFn,
    set_rate_change: SetFloatFn,
    put_samples: PutSamplesFn,
    receive_samples: ReceiveSamplesFn,
    flush: HandleFn,
    clear: HandleFn,
    num_samples: NumSamplesFn,
    // Must outlive the function pointers above.
    _library: Library,
}

impl NativeLibrary {
    /// Load the library described by `options` and resolve every entry point.
    pub fn load(options: &LoaderOptions) -> Result<Self> {
        let target: OsString = match &options.path {
            Some(path) => path.clone().into_os_string(),
            None => libloading::library_filename(LIBRARY_NAME),
        };
        let name = target.to_string_lossy().into_owned();

        // Safety: loading runs the library's initializers. The caller chose
        // which library to trust.
        let library = unsafe { Library::new(&target) }.map_err(|e| Error::LibraryLoad {
            name: name.clone(),
            message: e.to_string(),
        })?;

        unsafe {
            Ok(Self {
                create_instance: symbol(&library, SYM_CREATE_INSTANCE)?,
                destroy_instance: symbol(&library, SYM_DESTROY_INSTANCE)?,
                get_version_string: symbol(&library, SYM_GET_VERSION_STRING)?,
                get_version_id: symbol(&library, SYM_GET_VERSION_ID)?,
                set_sample_rate: symbol(&library, SYM_SET_SAMPLE_RATE)?,
                set_channels: symbol(&library, SYM_SET_CHANNELS)?,
                set_tempo_change: symbol(&library, SYM_SET_TEMPO_CHANGE)?,
                set_pitch_semitones: symbol(&library, SYM_SET_PITCH_SEMITONES)?,
                set_rate_change: symbol(&library, SYM_SET_RATE_CHANGE)?,
                put_samples: symbol(&library, SYM_PUT_SAMPLES)?,
                receive_samples: symbol(&library, SYM_RECEIVE_SAMPLES)?,
                flush: symbol(&library, SYM_FLUSH)?,
                clear: symbol(&library, SYM_CLEAR)?,
                num_samples: symbol(&library, SYM_NUM_SAMPLES)?,
                name,
                _library: library,
            })
        }
    }

    /// Name or path the library was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string reported by the library (e.g. "2.3.2").
    pub fn version_string(&self) -> String {
        unsafe {
            let ptr = (self.get_version_string)();
            if ptr.is_null() {
                return String::new();
            }
            // Points at a static buffer inside the library; not freed.
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }

    /// Numeric version reported by the library (e.g. 20302).
    pub fn version_id(&self) -> u32 {
        unsafe { (self.get_version_id)() }
    }
}

/// Resolve one entry point, copying the function pointer out of the symbol.
///
/// # Safety
///
/// `T` must match the C signature of `name`.
unsafe fn symbol<T: Copy>(library: &Library, name: &str) -> Result<T> {
    library
        .get::<T>(name.as_bytes())
        .map(|sym| *sym)
        .map_err(|e| Error::SymbolNotFound {
            symbol: name.to_string(),
            message: e.to_string(),
        })
}

impl NativeApi for NativeLibrary {
    fn create(&self) -> SoundTouchHandle {
        SoundTouchHandle::from_ptr(unsafe { (self.create_instance)() })
    }

    unsafe fn destroy(&self, handle: SoundTouchHandle) {
        (self.destroy_instance)(handle.as_ptr())
    }

    unsafe fn set_sample_rate(&self, handle: SoundTouchHandle, sample_rate: u32) {
        (self.set_sample_rate)(handle.as_ptr(), sample_rate)
    }

    unsafe fn set_channels(&self, handle: SoundTouchHandle, channels: u32) {
        (self.set_channels)(handle.as_ptr(), channels)
    }

    unsafe fn set_tempo_change(&self, handle: SoundTouchHandle, percent: f32) {
        (self.set_tempo_change)(handle.as_ptr(), percent)
    }

    unsafe fn set_pitch_semitones(&self, handle: SoundTouchHandle, semitones: f32) {
        (self.set_pitch_semitones)(handle.as_ptr(), semitones)
    }

    unsafe fn set_rate_change(&self, handle: SoundTouchHandle, percent: f32) {
        (self.set_rate_change)(handle.as_ptr(), percent)
    }

    unsafe fn put_samples(&self, handle: SoundTouchHandle, samples: &[f32], frames: u32) {
        (self.put_samples)(handle.as_ptr(), samples.as_ptr(), frames)
    }

    unsafe fn receive_samples(
        &self,
        handle: SoundTouchHandle,
        out: &mut [f32],
        max_frames: u32,
    ) -> u32 {
        (self.receive_samples)(handle.as_ptr(), out.as_mut_ptr(), max_frames)
    }

    unsafe fn flush(&self, handle: SoundTouchHandle) {
        (self.flush)(handle.as_ptr())
    }

    unsafe fn clear(&self, handle: SoundTouchHandle) {
        (self.clear)(handle.as_ptr())
    }

    unsafe fn num_samples(&self, handle: SoundTouchHandle) -> u32 {
        (self.num_samples)(handle.as_ptr())
    }
}

/// Load the process-wide library once. Later calls return the loaded one.
pub(crate) fn init_global(options: &LoaderOptions) -> Result<Arc<NativeLibrary>> {
    LIBRARY
        .get_or_try_init(|| -> Result<Arc<NativeLibrary>> {
            let library = NativeLibrary::load(options)?;
            tracing::info!(
                library = library.name(),
                version = %library.version_string(),
                "loaded SoundTouch library"
            );
            Ok(Arc::new(library))
        })
        .cloned()
}

/// The process-wide library, if `init` has succeeded.
pub(crate) fn global() -> Result<Arc<NativeLibrary>> {
    LIBRARY.get().cloned().ok_or(Error::NotInitialized)
}
