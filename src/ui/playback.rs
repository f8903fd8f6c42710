//! Trial playback cursor.
//!
//! Advances once per UI frame from wall-clock deltas while playing, clamped
//! to the trial duration, and stops itself at the end. No thread behind it;
//! the host repaint loop calls `tick` and checks `is_playing` to decide
//! whether to keep scheduling frames.

use std::time::Instant;

#[derive(Debug)]
pub struct Playback {
    playing: bool,
    cursor_s: f64,
    duration_s: f64,
    last_frame: Option<Instant>,
}

impl Playback {
    pub fn new(duration_s: f64) -> Self {
        Self {
            playing: false,
            cursor_s: 0.0,
            duration_s: duration_s.max(0.0),
            last_frame: None,
        }
    }

    pub fn cursor_s(&self) -> f64 {
        self.cursor_s
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        if self.cursor_s >= self.duration_s {
            self.cursor_s = 0.0;
        }
        self.playing = true;
        self.last_frame = None;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.last_frame = None;
    }

    pub fn rewind(&mut self) {
        self.cursor_s = 0.0;
        self.last_frame = None;
    }

    pub fn seek(&mut self, t: f64) {
        self.cursor_s = t.clamp(0.0, self.duration_s);
    }

    /// Advance by the elapsed wall-clock delta since the previous frame.
    /// Self-cancels once the cursor reaches the duration.
    pub fn tick(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        if let Some(prev) = self.last_frame {
            let dt = now.saturating_duration_since(prev).as_secs_f64();
            self.cursor_s = (self.cursor_s + dt).clamp(0.0, self.duration_s);
        }
        self.last_frame = Some(now);
        if self.cursor_s >= self.duration_s {
            self.playing = false;
            self.last_frame = None;
        }
    }
}
