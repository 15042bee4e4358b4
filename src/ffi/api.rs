//! The seam between the safe wrappers and a SoundTouch implementation.

use super::handles::SoundTouchHandle;

/// Entry points of a SoundTouch implementation.
///
/// [`NativeLibrary`](super::NativeLibrary) implements this for the shared
/// library loaded by [`init`](crate::init). Hosts that link SoundTouch
/// statically, and tests, can provide their own implementation and pass it
/// to [`SoundTouch::with_api`](crate::SoundTouch::with_api).
///
/// Sample counts passed to and returned from these calls are frames
/// (one sample per channel), matching the native API.
pub trait NativeApi: Send + Sync {
    /// Allocate a new instance. Returns an invalid handle on failure.
    fn create(&self) -> SoundTouchHandle;

    /// Release an instance.
    ///
    /// # Safety
    ///
    /// `handle` must have come from [`create`](Self::create) on this
    /// implementation and must not have been destroyed already.
    unsafe fn destroy(&self, handle: SoundTouchHandle);

    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn set_sample_rate(&self, handle: SoundTouchHandle, sample_rate: u32);

    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn set_channels(&self, handle: SoundTouchHandle, channels: u32);

    /// Tempo change in percent relative to the original.
    ///
    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn set_tempo_change(&self, handle: SoundTouchHandle, percent: f32);

    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn set_pitch_semitones(&self, handle: SoundTouchHandle, semitones: f32);

    /// Playback rate change in percent relative to the original.
    ///
    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn set_rate_change(&self, handle: SoundTouchHandle, percent: f32);

    /// # Safety
    ///
    /// `handle` must be live and `samples` must hold at least
    /// `frames * channels` interleaved samples.
    unsafe fn put_samples(&self, handle: SoundTouchHandle, samples: &[f32], frames: u32);

    /// # Safety
    ///
    /// `handle` must be live and `out` must have room for
    /// `max_frames * channels` interleaved samples.
    unsafe fn receive_samples(
        &self,
        handle: SoundTouchHandle,
        out: &mut [f32],
        max_frames: u32,
    ) -> u32;

    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn flush(&self, handle: SoundTouchHandle);

    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn clear(&self, handle: SoundTouchHandle);

    /// Frames currently available for receiving.
    ///
    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn num_samples(&self, handle: SoundTouchHandle) -> u32;
}
