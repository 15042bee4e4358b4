//! Raw C entry points of the SoundTouch DLL API.
//!
//! The library is resolved at runtime, so the entry points are described as
//! function pointer types plus the symbol names they are looked up by.
//! Users should prefer the safe Rust wrappers in the parent modules.

use std::os::raw::{c_char, c_float, c_uint, c_void};

/// Base name of the shared library (`libSoundTouchDll.so`, `SoundTouchDll.dll`, ...).
pub const LIBRARY_NAME: &str = "SoundTouchDll";

pub type CreateInstanceFn = unsafe extern "C" fn() -> *mut c_void;
pub type DestroyInstanceFn = unsafe extern "C" fn(handle: *mut c_void);
pub type GetVersionStringFn = unsafe extern "C" fn() -> *const c_char;
pub type GetVersionIdFn = unsafe extern "C" fn() -> c_uint;
pub type SetUintFn = unsafe extern "C" fn(handle: *mut c_void, value: c_uint);
pub type SetFloatFn = unsafe extern "C" fn(handle: *mut c_void, value: c_float);
pub type PutSamplesFn =
    unsafe extern "C" fn(handle: *mut c_void, samples: *const c_float, num_samples: c_uint);
pub type ReceiveSamplesFn = unsafe extern "C" fn(
    handle: *mut c_void,
    out_buffer: *mut c_float,
    max_samples: c_uint,
) -> c_uint;
pub type HandleFn = unsafe extern "C" fn(handle: *mut c_void);
pub type NumSamplesFn = unsafe extern "C" fn(handle: *mut c_void) -> c_uint;

// Symbol names
pub const SYM_CREATE_INSTANCE: &str = "soundtouch_createInstance";
pub const SYM_DESTROY_INSTANCE: &str = "soundtouch_destroyInstance";
pub const SYM_GET_VERSION_STRING: &str = "soundtouch_getVersionString";
pub const SYM_GET_VERSION_ID: &str = "soundtouch_getVersionId";
pub const SYM_SET_SAMPLE_RATE: &str = "soundtouch_setSampleRate";
pub const SYM_SET_CHANNELS: &str = "soundtouch_setChannels";
pub const SYM_SET_TEMPO_CHANGE: &str = "soundtouch_setTempoChange";
pub const SYM_SET_PITCH_SEMITONES: &str = "soundtouch_setPitchSemiTones";
pub const SYM_SET_RATE_CHANGE: &str = "soundtouch_setRateChange";
pub const SYM_PUT_SAMPLES: &str = "soundtouch_putSamples";
pub const SYM_RECEIVE_SAMPLES: &str = "soundtouch_receiveSamples";
pub const SYM_FLUSH: &str = "soundtouch_flush";
pub const SYM_CLEAR: &str = "soundtouch_clear";
pub const SYM_NUM_SAMPLES: &str = "soundtouch_numSamples";
