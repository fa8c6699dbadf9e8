// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fixed-rate animation preview.
//!
//! The loop walks positions of the rotated keyframe view and is driven by
//! the caller's clock (seconds), so it holds no timer of its own. At most
//! one run exists at a time.

use std::time::Duration;

pub const MIN_PREVIEW_FPS: u32 = 1;
pub const MAX_PREVIEW_FPS: u32 = 60;
pub const DEFAULT_PREVIEW_FPS: u32 = 12;

/// A frame to show, and whether the impact cue should sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewStep {
    pub position: usize,
    pub cue: bool,
}

#[derive(Debug, Clone)]
struct PreviewRun {
    len: usize,
    has_impact: bool,
    /// Next position to show
    cursor: usize,
    /// Position currently on screen
    shown: Option<usize>,
    next_due: f64,
}

#[derive(Debug, Clone)]
pub struct PreviewLoop {
    fps: u32,
    run: Option<PreviewRun>,
}

impl Default for PreviewLoop {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_FPS)
    }
}

impl PreviewLoop {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: clamp_fps(fps),
            run: None,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    fn interval(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Start animating a view of `len` frames, replacing any running loop.
    ///
    /// With `has_impact`, position 0 is the impact frame and triggers the cue.
    pub fn start(&mut self, len: usize, has_impact: bool, now: f64) {
        if len == 0 {
            self.run = None;
            return;
        }
        self.run = Some(PreviewRun {
            len,
            has_impact,
            cursor: 0,
            shown: None,
            next_due: now,
        });
    }

    pub fn stop(&mut self) {
        self.run = None;
    }

    /// Change the rate, restarting a running loop over the same view.
    pub fn set_fps(&mut self, fps: u32, now: f64) {
        self.fps = clamp_fps(fps);
        if let Some(run) = &self.run {
            let (len, has_impact) = (run.len, run.has_impact);
            self.start(len, has_impact, now);
        }
    }

    /// Step the rate by `delta`, staying within 1..=60.
    pub fn adjust_fps(&mut self, delta: i32, now: f64) {
        let fps = (self.fps as i32 + delta).max(MIN_PREVIEW_FPS as i32) as u32;
        self.set_fps(fps, now);
    }

    /// Advance if a step is due at `now`.
    pub fn tick(&mut self, now: f64) -> Option<PreviewStep> {
        let interval = self.interval();
        let run = self.run.as_mut()?;
        if now < run.next_due {
            return None;
        }

        let position = run.cursor;
        let cue = run.has_impact && position == 0;
        run.shown = Some(position);
        run.cursor = (position + 1) % run.len;
        run.next_due += interval;
        if run.next_due < now {
            // Fell behind; resume from now rather than bursting
            run.next_due = now + interval;
        }
        Some(PreviewStep { position, cue })
    }

    /// Position currently on screen.
    pub fn shown(&self) -> Option<usize> {
        self.run.as_ref().and_then(|r| r.shown)
    }

    /// Time until the next step, for scheduling a repaint.
    pub fn time_until_next(&self, now: f64) -> Option<Duration> {
        let run = self.run.as_ref()?;
        Some(Duration::from_secs_f64((run.next_due - now).max(0.0)))
    }
}

pub fn clamp_fps(fps: u32) -> u32 {
    fps.clamp(MIN_PREVIEW_FPS, MAX_PREVIEW_FPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the loop at its exact rate for `steps` steps.
    fn run_steps(preview: &mut PreviewLoop, start: f64, steps: usize) -> Vec<PreviewStep> {
        let interval = 1.0 / preview.fps() as f64;
        (0..steps)
            .filter_map(|i| preview.tick(start + i as f64 * interval + 1e-9))
            .collect()
    }

    #[test]
    fn test_wraps_and_cues_once_per_wrap() {
        let mut preview = PreviewLoop::new(10);
        preview.start(3, true, 0.0);

        let steps = run_steps(&mut preview, 0.0, 7);
        let positions: Vec<usize> = steps.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 0, 1, 2, 0]);

        let cues = steps.iter().filter(|s| s.cue).count();
        assert_eq!(cues, 3);
        assert!(steps.iter().filter(|s| s.cue).all(|s| s.position == 0));
    }

    #[test]
    fn test_no_cue_without_impact() {
        let mut preview = PreviewLoop::new(10);
        preview.start(2, false, 0.0);
        let steps = run_steps(&mut preview, 0.0, 4);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| !s.cue));
    }

    #[test]
    fn test_not_due_yet() {
        let mut preview = PreviewLoop::new(4);
        preview.start(2, false, 0.0);
        assert!(preview.tick(0.0).is_some());
        assert!(preview.tick(0.1).is_none());
        assert_eq!(preview.shown(), Some(0));
        assert!(preview.tick(0.25).is_some());
        assert_eq!(preview.shown(), Some(1));
    }

    #[test]
    fn test_start_replaces_running_loop() {
        let mut preview = PreviewLoop::new(10);
        preview.start(5, false, 0.0);
        run_steps(&mut preview, 0.0, 3);

        preview.start(2, true, 1.0);
        let step = preview.tick(1.0);
        assert_eq!(step, Some(PreviewStep { position: 0, cue: true }));
    }

    #[test]
    fn test_rate_change_restarts_with_same_view() {
        let mut preview = PreviewLoop::new(12);
        preview.start(4, true, 0.0);
        run_steps(&mut preview, 0.0, 2);

        preview.adjust_fps(1, 5.0);
        assert_eq!(preview.fps(), 13);
        assert!(preview.is_running());
        assert_eq!(preview.tick(5.0), Some(PreviewStep { position: 0, cue: true }));
        assert_eq!(preview.tick(5.0 + 1.0 / 13.0 + 1e-9).map(|s| s.position), Some(1));
    }

    #[test]
    fn test_rate_is_clamped() {
        let mut preview = PreviewLoop::new(0);
        assert_eq!(preview.fps(), 1);
        preview.adjust_fps(-5, 0.0);
        assert_eq!(preview.fps(), 1);
        preview.set_fps(200, 0.0);
        assert_eq!(preview.fps(), 60);
        preview.adjust_fps(1, 0.0);
        assert_eq!(preview.fps(), 60);
        // Not running: rate changes don't start anything
        assert!(!preview.is_running());
    }

    #[test]
    fn test_stop_and_empty_view() {
        let mut preview = PreviewLoop::default();
        assert_eq!(preview.fps(), DEFAULT_PREVIEW_FPS);
        preview.start(0, true, 0.0);
        assert!(!preview.is_running());

        preview.start(3, false, 0.0);
        preview.stop();
        assert!(preview.tick(10.0).is_none());
        assert_eq!(preview.time_until_next(10.0), None);
    }
}
