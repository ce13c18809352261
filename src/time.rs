//! Frame timing for the render loop.
//!
//! [`FrameClock`] turns wall-clock instants into the per-frame delta that
//! drives the galaxy rotation. Large gaps (window minimised, laptop asleep)
//! are capped so the galaxy never lurches forward when frames resume.

use std::time::{Duration, Instant};

/// Longest delta a single frame may report, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Per-frame timing: delta, elapsed time, frame count and a rolling FPS.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
        }
    }

    /// Advance to now. Call once per frame; returns the frame delta.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`. Instants earlier than the last frame count as zero.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        self.delta_secs = raw.min(MAX_FRAME_DELTA);
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Sum of all frame deltas since start or the last reset.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Frames ticked since start or the last reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// While paused every tick reports a zero delta. The viewer pauses while
    /// its window is hidden.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Restart from now, e.g. when the background is mounted again.
    pub fn reset(&mut self) {
        *self = Self::starting_at(Instant::now());
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
