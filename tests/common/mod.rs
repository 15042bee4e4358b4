//! Pass-through SoundTouch stand-in shared by the integration tests.
//!
//! Every put sample comes back out unchanged, which is enough to check the
//! plumbing without the native library.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use soundtouch::{NativeApi, SoundTouchHandle};

#[derive(Default)]
struct Instance {
    channels: u32,
    sample_rate: u32,
    tempo: f32,
    pitch: f32,
    rate: f32,
    fifo: VecDeque<f32>,
    flushed: bool,
}

/// Settings recorded for one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub channels: u32,
    pub sample_rate: u32,
    pub tempo: f32,
    pub pitch: f32,
    pub rate: f32,
}

#[derive(Default)]
pub struct MockApi {
    next: AtomicU64,
    creates: AtomicUsize,
    destroyed: Mutex<Vec<u64>>,
    instances: Mutex<HashMap<u64, Instance>>,
    /// Settings of destroyed instances, kept for inspection.
    retired: Mutex<HashMap<u64, (Settings, bool)>>,
    return_null: bool,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next: AtomicU64::new(0x10),
            ..Default::default()
        })
    }

    /// A backend whose create always returns a null handle.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            return_null: true,
            ..Default::default()
        })
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> Vec<u64> {
        self.destroyed.lock().clone()
    }

    pub fn live(&self) -> usize {
        self.instances.lock().len()
    }

    /// Settings of a live or destroyed instance, and whether it was flushed.
    pub fn settings(&self, handle: u64) -> Option<(Settings, bool)> {
        if let Some(inst) = self.instances.lock().get(&handle) {
            return Some((snapshot(inst), inst.flushed));
        }
        self.retired.lock().get(&handle).copied()
    }

    fn with<R>(&self, handle: SoundTouchHandle, f: impl FnOnce(&mut Instance) -> R) -> R {
        let mut instances = self.instances.lock();
        let inst = instances
            .get_mut(&handle.as_raw())
            .unwrap_or_else(|| panic!("call on unknown handle {:#x}", handle.as_raw()));
        f(inst)
    }
}

fn snapshot(inst: &Instance) -> Settings {
    Settings {
        channels: inst.channels,
        sample_rate: inst.sample_rate,
        tempo: inst.tempo,
        pitch: inst.pitch,
        rate: inst.rate,
    }
}

impl NativeApi for MockApi {
    fn create(&self) -> SoundTouchHandle {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.return_null {
            return SoundTouchHandle::invalid();
        }
        let raw = self.next.fetch_add(0x10, Ordering::SeqCst);
        self.instances.lock().insert(raw, Instance::default());
        SoundTouchHandle::from_raw(raw)
    }

    unsafe fn destroy(&self, handle: SoundTouchHandle) {
        assert!(handle.is_valid(), "destroy called with a null handle");
        self.destroyed.lock().push(handle.as_raw());
        if let Some(inst) = self.instances.lock().remove(&handle.as_raw()) {
            self.retired
                .lock()
                .insert(handle.as_raw(), (snapshot(&inst), inst.flushed));
        }
    }

    unsafe fn set_sample_rate(&self, handle: SoundTouchHandle, sample_rate: u32) {
        self.with(handle, |i| i.sample_rate = sample_rate)
    }

    unsafe fn set_channels(&self, handle: SoundTouchHandle, channels: u32) {
        self.with(handle, |i| i.channels = channels)
    }

    unsafe fn set_tempo_change(&self, handle: SoundTouchHandle, percent: f32) {
        self.with(handle, |i| i.tempo = percent)
    }

    unsafe fn set_pitch_semitones(&self, handle: SoundTouchHandle, semitones: f32) {
        self.with(handle, |i| i.pitch = semitones)
    }

    unsafe fn set_rate_change(&self, handle: SoundTouchHandle, percent: f32) {
        self.with(handle, |i| i.rate = percent)
    }

    unsafe fn put_samples(&self, handle: SoundTouchHandle, samples: &[f32], frames: u32) {
        self.with(handle, |i| {
            let n = frames as usize * i.channels as usize;
            i.fifo.extend(&samples[..n]);
        })
    }

    unsafe fn receive_samples(
        &self,
        handle: SoundTouchHandle,
        out: &mut [f32],
        max_frames: u32,
    ) -> u32 {
        self.with(handle, |i| {
            let channels = i.channels as usize;
            let frames = (i.fifo.len() / channels).min(max_frames as usize);
            for (slot, sample) in out.iter_mut().zip(i.fifo.drain(..frames * channels)) {
                *slot = sample;
            }
            frames as u32
        })
    }

    unsafe fn flush(&self, handle: SoundTouchHandle) {
        self.with(handle, |i| i.flushed = true)
    }

    unsafe fn clear(&self, handle: SoundTouchHandle) {
        self.with(handle, |i| i.fifo.clear())
    }

    unsafe fn num_samples(&self, handle: SoundTouchHandle) -> u32 {
        self.with(handle, |i| {
            if i.channels == 0 {
                0
            } else {
                (i.fifo.len() / i.channels as usize) as u32
            }
        })
    }
}
