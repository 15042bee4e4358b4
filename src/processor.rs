//! Safe wrapper around a native SoundTouch processor.

use std::sync::atomic::{AtomicU16, AtomicU32, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ffi::{self, NativeApi, SoundTouchHandle};
use crate::handle::OwnedHandle;
use crate::types::{StretchOptions, MAX_CHANNELS};

/// A pitch/tempo processor backed by one native SoundTouch instance.
///
/// Samples are interleaved `f32` in `[-1.0, 1.0]`. Set the sample rate and
/// channel count before putting samples.
///
/// # Example
///
/// ```no_run
/// use soundtouch::{SoundTouch, StretchOptions};
///
/// soundtouch::init()?;
///
/// let st = SoundTouch::new()?;
/// st.set_sample_rate(44100)?;
/// st.set_channels(1)?;
/// st.apply(&StretchOptions { pitch_semitones: 3.0, ..Default::default() })?;
///
/// st.put_samples(&vec![0.0; 4096])?;
/// st.flush()?;
///
/// let mut out = vec![0.0; 4096];
/// let frames = st.receive_samples(&mut out)?;
/// println!("received {} frames", frames);
///
/// // Released here, or on drop
/// st.dispose();
/// # Ok::<(), soundtouch::Error>(())
/// ```
pub struct SoundTouch {
    handle: OwnedHandle,
    channels: AtomicU16,
    sample_rate: AtomicU32,
}

impl SoundTouch {
    /// Create a processor from the library loaded by [`init`](crate::init).
    pub fn new() -> Result<Self> {
        let library: Arc<dyn NativeApi> = ffi::global()?;
        Self::with_api(library)
    }

    /// Create a processor from a specific implementation.
    pub fn with_api(api: Arc<dyn NativeApi>) -> Result<Self> {
        Ok(Self {
            handle: OwnedHandle::acquire(api)?,
            channels: AtomicU16::new(0),
            sample_rate: AtomicU32::new(0),
        })
    }

    /// Current native handle; invalid once disposed.
    pub fn handle(&self) -> SoundTouchHandle {
        SoundTouchHandle::from_raw(self.handle.raw())
    }

    /// Check if the native instance has been released.
    pub fn is_disposed(&self) -> bool {
        !self.handle.is_live()
    }

    /// Release the native instance now instead of on drop.
    ///
    /// Idempotent. Every later call on this processor fails with
    /// [`Error::AlreadyDisposed`].
    pub fn dispose(&self) {
        self.handle.dispose();
    }

    /// Channel count last set with [`set_channels`](Self::set_channels); 0 if unset.
    pub fn channels(&self) -> u16 {
        self.channels.load(Ordering::Acquire)
    }

    /// Sample rate last set with [`set_sample_rate`](Self::set_sample_rate); 0 if unset.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Acquire)
    }

    pub fn set_sample_rate(&self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(Error::InvalidArgument("sample rate must be non-zero".into()));
        }
        self.handle.with(|api, h| {
            unsafe { api.set_sample_rate(h, sample_rate) };
            self.sample_rate.store(sample_rate, Ordering::Release);
        })
    }

    pub fn set_channels(&self, channels: u16) -> Result<()> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(Error::InvalidArgument(format!(
                "channel count must be within [1, {}], got {}",
                MAX_CHANNELS, channels
            )));
        }
        self.handle.with(|api, h| {
            unsafe { api.set_channels(h, u32::from(channels)) };
            self.channels.store(channels, Ordering::Release);
        })
    }

    /// Tempo change in percent, -50 to +100.
    pub fn set_tempo_change(&self, percent: f32) -> Result<()> {
        StretchOptions {
            tempo_change: percent,
            ..Default::default()
        }
        .validate()?;
        self.handle
            .with(|api, h| unsafe { api.set_tempo_change(h, percent) })
    }

    /// Pitch shift in semitones, -60 to +60.
    pub fn set_pitch_semitones(&self, semitones: f32) -> Result<()> {
        StretchOptions {
            pitch_semitones: semitones,
            ..Default::default()
        }
        .validate()?;
        self.handle
            .with(|api, h| unsafe { api.set_pitch_semitones(h, semitones) })
    }

    /// Rate change in percent, -50 to +100.
    pub fn set_rate_change(&self, percent: f32) -> Result<()> {
        StretchOptions {
            rate_change: percent,
            ..Default::default()
        }
        .validate()?;
        self.handle
            .with(|api, h| unsafe { api.set_rate_change(h, percent) })
    }

    /// Validate and apply all three adjustments at once.
    pub fn apply(&self, options: &StretchOptions) -> Result<()> {
        options.validate()?;
        self.handle.with(|api, h| unsafe {
            api.set_tempo_change(h, options.tempo_change);
            api.set_pitch_semitones(h, options.pitch_semitones);
            api.set_rate_change(h, options.rate_change);
        })
    }

    /// Feed interleaved samples. The length must be a whole number of frames.
    ///
    /// The sample rate and channel count must both be set first; the native
    /// library aborts the process otherwise.
    pub fn put_samples(&self, samples: &[f32]) -> Result<()> {
        // Frames are counted under the instance lock so a concurrent
        // set_channels cannot change the layout mid-call.
        self.handle.with(|api, h| -> Result<()> {
            if self.sample_rate() == 0 {
                return Err(Error::InvalidArgument(
                    "sample rate must be set before processing".into(),
                ));
            }
            let frames = self.whole_frames(samples.len())?;
            if frames > 0 {
                unsafe { api.put_samples(h, samples, frames) };
            }
            Ok(())
        })?
    }

    /// Take processed samples into `out`. Returns the number of frames written.
    ///
    /// Trailing space smaller than one frame is left untouched.
    pub fn receive_samples(&self, out: &mut [f32]) -> Result<usize> {
        self.handle.with(|api, h| -> Result<usize> {
            let channels = self.require_channels()?;
            let max_frames = u32::try_from(out.len() / channels)
                .map_err(|_| Error::InvalidArgument("output buffer too large".into()))?;
            if max_frames == 0 {
                return Ok(0);
            }
            let frames = unsafe { api.receive_samples(h, out, max_frames) };
            Ok(frames.min(max_frames) as usize)
        })?
    }

    /// Push the samples still held inside the processor to the output.
    pub fn flush(&self) -> Result<()> {
        self.handle.with(|api, h| unsafe { api.flush(h) })
    }

    /// Drop all buffered input and output.
    pub fn clear(&self) -> Result<()> {
        self.handle.with(|api, h| unsafe { api.clear(h) })
    }

    /// Frames ready to be received.
    pub fn num_samples(&self) -> Result<u32> {
        self.handle.with(|api, h| unsafe { api.num_samples(h) })
    }

    fn require_channels(&self) -> Result<usize> {
        match self.channels() {
            0 => Err(Error::InvalidArgument(
                "channel count must be set before processing".into(),
            )),
            channels => Ok(channels as usize),
        }
    }

    fn whole_frames(&self, len: usize) -> Result<u32> {
        let channels = self.require_channels()?;
        if len % channels != 0 {
            return Err(Error::InvalidArgument(format!(
                "{} samples is not a whole number of {}-channel frames",
                len, channels
            )));
        }
        u32::try_from(len / channels)
            .map_err(|_| Error::InvalidArgument("sample buffer too large".into()))
    }
}

impl std::fmt::Debug for SoundTouch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundTouch")
            .field("handle", &self.handle.raw())
            .field("channels", &self.channels())
            .field("sample_rate", &self.sample_rate())
            .finish()
    }
}
