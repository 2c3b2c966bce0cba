//! Audio collaborator
//!
//! Procedurally synthesized sound effects - no asset files. If the output
//! device cannot be opened the manager logs a warning and every call becomes
//! a no-op; the game runs silent. Playback is fire-and-forget through
//! detached sinks and never blocks the simulation.

use rodio::{OutputStream, OutputStreamHandle, Sink, Source, buffer::SamplesBuffer};

const SAMPLE_RATE: u32 = 44_100;

/// One-shot sound cues, triggered by simulation events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Shot left the ship
    Shoot,
    /// Enemy destroyed
    Explosion,
    /// Power-up collected
    PowerUp,
    /// Player took a hit
    Hit,
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    music: Option<Sink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(master_volume: f32, sfx_volume: f32, music_volume: f32, muted: bool) -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(e) => {
                log::warn!("audio device unavailable, running silent: {e}");
                None
            }
        };
        Self {
            output,
            music: None,
            master_volume: master_volume.clamp(0.0, 1.0),
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            music_volume: music_volume.clamp(0.0, 1.0),
            muted,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(music) = &self.music {
            music.set_volume(if muted {
                0.0
            } else {
                self.master_volume * self.music_volume
            });
        }
    }

    fn effect_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a one-shot effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effect_volume();
        if vol <= 0.0 {
            return;
        }
        let Some((_, handle)) = &self.output else {
            return;
        };

        let samples = match effect {
            SoundEffect::Shoot => shoot_samples(),
            SoundEffect::Explosion => explosion_samples(),
            SoundEffect::PowerUp => powerup_samples(),
            SoundEffect::Hit => hit_samples(),
        };

        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(vol);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }

    /// Start the looping background track. Restarts it if already playing.
    pub fn start_music(&mut self) {
        self.stop_music();
        let Some((_, handle)) = &self.output else {
            return;
        };

        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(if self.muted {
                0.0
            } else {
                self.master_volume * self.music_volume
            });
            let source = SamplesBuffer::new(1, SAMPLE_RATE, music_samples());
            sink.append(source.repeat_infinite());
            self.music = Some(sink);
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}

// === Waveform generators ===

/// Render `duration` seconds of a tone described by per-sample frequency and
/// amplitude envelopes.
fn render(duration: f32, freq: impl Fn(f32) -> f32, amp: impl Fn(f32) -> f32) -> Vec<f32> {
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut phase = 0.0f32;
    (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            // Integrate phase so frequency sweeps stay click-free
            phase += std::f32::consts::TAU * freq(t) / SAMPLE_RATE as f32;
            phase.sin() * amp(t)
        })
        .collect()
}

/// Rising zap
fn shoot_samples() -> Vec<f32> {
    let duration = 0.1;
    render(
        duration,
        |t| 600.0 + 2400.0 * (t / duration),
        |t| 0.25 * (-t * 30.0).exp(),
    )
}

/// Low rumble with a noisy attack
fn explosion_samples() -> Vec<f32> {
    let duration = 0.45;
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    // Cheap deterministic noise; audio quality doesn't warrant an RNG here
    let mut noise_state = 0x2545_F491u32;

    (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = if t < 0.04 {
                t / 0.04
            } else {
                (-(t - 0.04) * 6.0).exp()
            };

            let rumble = (std::f32::consts::TAU * 55.0 * t).sin() * 0.4
                + (std::f32::consts::TAU * 80.0 * t).sin() * 0.3
                + (std::f32::consts::TAU * 38.0 * t).sin() * 0.3;

            noise_state ^= noise_state << 13;
            noise_state ^= noise_state >> 17;
            noise_state ^= noise_state << 5;
            let noise = (noise_state as f32 / u32::MAX as f32 - 0.5) * 0.7;

            (rumble + noise) * envelope * 0.6
        })
        .collect()
}

/// Happy ascending ding
fn powerup_samples() -> Vec<f32> {
    let note_len = 0.12;
    let notes = [600.0f32, 800.0, 1000.0];
    let mut samples = Vec::new();
    for freq in notes {
        samples.extend(render(note_len, move |_| freq, |t| {
            0.22 * (-t * 18.0).exp()
        }));
    }
    samples
}

/// Descending thud
fn hit_samples() -> Vec<f32> {
    let duration = 0.25;
    render(
        duration,
        |t| 300.0 - 220.0 * (t / duration),
        |t| 0.35 * (-t * 10.0).exp(),
    )
}

/// A short bass arpeggio, looped as background music
fn music_samples() -> Vec<f32> {
    let note_len = 0.24;
    let bassline = [110.0f32, 138.6, 164.8, 138.6, 110.0, 98.0, 110.0, 123.5];
    let mut samples = Vec::new();
    for freq in bassline {
        samples.extend(render(note_len, move |_| freq, move |t| {
            0.12 * (1.0 - t / note_len).max(0.0)
        }));
    }
    samples
}
