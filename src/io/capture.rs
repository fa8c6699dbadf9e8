// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame capture from a [`VideoSource`].
//!
//! Range captures and bulk extractions seek once per sample and run on a
//! background thread that owns the video source until the job completes.

use crate::error::{CaptureInterrupted, MediaError};
use crate::io::media::VideoSource;
use crate::models::frame::Frame;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

/// Samples per second of interval for range capture.
pub const RANGE_SAMPLE_RATE: f64 = 24.0;

/// Samples per second of window for bulk extraction.
pub const BULK_SAMPLE_RATE: f64 = 10.0;

/// Length of the segments offered for long videos (seconds).
pub const SEGMENT_LENGTH: f64 = 30.0;

/// Segments shorter than this are not offered (seconds).
pub const MIN_SEGMENT_LENGTH: f64 = 5.0;

/// Keyboard navigation step (seconds).
pub const NAV_STEP: f64 = 1.0 / 24.0;

/// Progress is reported every this many samples.
const PROGRESS_INTERVAL: usize = 5;

/// Absorbs float noise such as `2.3 * 10.0 == 22.999999999999996`.
const SAMPLE_EPSILON: f64 = 1e-9;

/// A time window `[start, end]` of the source video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Number of range samples: `ceil((end - start) * 24)`, or 0 for an empty range.
pub fn range_sample_count(start: f64, end: f64) -> usize {
    if end <= start {
        return 0;
    }
    ((end - start) * RANGE_SAMPLE_RATE - SAMPLE_EPSILON).ceil() as usize
}

/// Evenly spaced range sample times in `(start, end]`.
///
/// The start itself is excluded because it is captured when the range is armed.
pub fn range_sample_times(start: f64, end: f64) -> Vec<f64> {
    let count = range_sample_count(start, end);
    let step = (end - start) / count.max(1) as f64;
    (1..=count).map(|i| start + i as f64 * step).collect()
}

/// Number of bulk samples: `floor((end - start) * 10)`.
pub fn bulk_sample_count(window: Segment) -> usize {
    if window.end <= window.start {
        return 0;
    }
    (window.length() * BULK_SAMPLE_RATE + SAMPLE_EPSILON).floor() as usize
}

/// Bulk sample times, one every tenth of a second from the window start.
pub fn bulk_sample_times(window: Segment) -> Vec<f64> {
    (0..bulk_sample_count(window))
        .map(|i| window.start + i as f64 / BULK_SAMPLE_RATE)
        .collect()
}

/// Whether a video is long enough that a segment must be chosen first.
pub fn needs_segment_choice(duration: f64) -> bool {
    duration > SEGMENT_LENGTH
}

/// Consecutive 30 second windows covering `duration`.
///
/// The final window may be shorter, but is dropped if under 5 seconds.
pub fn segments(duration: f64) -> Vec<Segment> {
    let mut result = Vec::new();
    let mut start = 0.0;
    while start < duration {
        let end = (start + SEGMENT_LENGTH).min(duration);
        if end - start >= MIN_SEGMENT_LENGTH {
            result.push(Segment::new(start, end));
        }
        start += SEGMENT_LENGTH;
    }
    result
}

/// The window to extract when no segment choice is needed.
pub fn whole_video(duration: f64) -> Segment {
    Segment::new(0.0, duration)
}

/// Capture the current picture.
pub fn capture_single(source: &mut dyn VideoSource) -> Result<Frame, MediaError> {
    source.grab()
}

/// Capture the interval `(start, end]` at 24 samples per second.
///
/// Falls back to a single capture at the current position if `end` is not
/// after `start`. Playback returns to its prior position afterwards, also
/// when a sample fails; the frames taken so far travel with the error.
pub fn capture_range(
    source: &mut dyn VideoSource,
    start: f64,
    end: f64,
    settle: Duration,
    mut progress: impl FnMut(usize, usize),
) -> Result<Vec<Frame>, CaptureInterrupted> {
    if end <= start {
        return Ok(vec![capture_single(source)?]);
    }

    let original = source.position();
    let times = range_sample_times(start, end);
    let total = times.len();
    log::info!("Capturing {} frames between {:.3}s and {:.3}s", total, start, end);

    let mut frames = Vec::with_capacity(total);
    let sampled = sample_range(source, &times, settle, &mut frames, &mut progress);
    let restored = source.seek(original);

    match sampled.and(restored) {
        Ok(()) => Ok(frames),
        Err(error) => {
            log::warn!("Range capture stopped after {} of {} frames", frames.len(), total);
            Err(CaptureInterrupted {
                frames,
                source: error,
            })
        }
    }
}

fn sample_range(
    source: &mut dyn VideoSource,
    times: &[f64],
    settle: Duration,
    frames: &mut Vec<Frame>,
    progress: &mut impl FnMut(usize, usize),
) -> Result<(), MediaError> {
    let total = times.len();
    for (i, &time) in times.iter().enumerate() {
        source.seek(time)?;
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }
        frames.push(source.grab()?);

        let done = i + 1;
        if done % PROGRESS_INTERVAL == 0 || done == total {
            progress(done, total);
        }
    }
    Ok(())
}

/// Sample `window` at 10 samples per second into a time-ordered list.
///
/// Playback is left at the window start.
pub fn bulk_extract(
    source: &mut dyn VideoSource,
    window: Segment,
    mut progress: impl FnMut(usize, usize),
) -> Result<Vec<Frame>, MediaError> {
    let times = bulk_sample_times(window);
    let total = times.len();
    log::info!(
        "Extracting {} frames from {:.1}s-{:.1}s",
        total,
        window.start,
        window.end
    );

    let mut frames = Vec::with_capacity(total);
    for (i, time) in times.into_iter().enumerate() {
        source.seek(time)?;
        frames.push(source.grab()?);
        log::debug!("Extracted frame {} at {:.2}s", i, time);

        let done = i + 1;
        if done % PROGRESS_INTERVAL == 0 || done == total {
            progress(done, total);
        }
    }

    source.seek(window.start)?;
    Ok(frames)
}

/// Work handed to the capture thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureJob {
    Range { start: f64, end: f64 },
    Bulk { window: Segment },
}

/// Messages from the capture thread.
pub enum JobEvent {
    Progress {
        done: usize,
        total: usize,
    },
    /// The job ended; the video source is handed back.
    Finished {
        job: CaptureJob,
        source: Box<dyn VideoSource>,
        result: Result<Vec<Frame>, CaptureInterrupted>,
    },
}

/// Run `job` on a background thread that owns `source` until it finishes.
pub fn spawn_job(
    mut source: Box<dyn VideoSource>,
    job: CaptureJob,
    settle: Duration,
) -> Receiver<JobEvent> {
    let (sender, receiver) = channel();

    std::thread::spawn(move || {
        let result = run_job(source.as_mut(), job, settle, &sender);
        if let Err(e) = &result {
            log::error!("Capture job failed: {}", e);
        }
        let _ = sender.send(JobEvent::Finished {
            job,
            source,
            result,
        });
    });

    receiver
}

fn run_job(
    source: &mut dyn VideoSource,
    job: CaptureJob,
    settle: Duration,
    sender: &Sender<JobEvent>,
) -> Result<Vec<Frame>, CaptureInterrupted> {
    let report = |done, total| {
        let _ = sender.send(JobEvent::Progress { done, total });
    };
    match job {
        CaptureJob::Range { start, end } => capture_range(source, start, end, settle, report),
        CaptureJob::Bulk { window } => bulk_extract(source, window, report).map_err(Into::into),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::tests::SyntheticSource;

    #[test]
    fn test_range_sample_count() {
        assert_eq!(range_sample_count(0.0, 2.0), 48);
        assert_eq!(range_sample_count(1.0, 1.01), 1);
        assert_eq!(range_sample_count(0.0, 0.5), 12);
        assert_eq!(range_sample_count(0.0, 0.51), 13);
        assert_eq!(range_sample_count(2.0, 2.0), 0);
        assert_eq!(range_sample_count(3.0, 2.0), 0);
    }

    #[test]
    fn test_range_sample_times_are_evenly_spaced() {
        let times = range_sample_times(1.0, 2.0);
        assert_eq!(times.len(), 24);
        assert!((times[0] - (1.0 + 1.0 / 24.0)).abs() < 1e-9);
        assert!((times[23] - 2.0).abs() < 1e-9);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_bulk_sample_count() {
        assert_eq!(bulk_sample_count(Segment::new(0.0, 12.3)), 123);
        assert_eq!(bulk_sample_count(Segment::new(30.0, 42.3)), 123);
        assert_eq!(bulk_sample_count(Segment::new(0.0, 2.3)), 23);
        assert_eq!(bulk_sample_count(Segment::new(0.0, 0.05)), 0);
        assert_eq!(bulk_sample_count(Segment::new(5.0, 5.0)), 0);
    }

    #[test]
    fn test_segments_for_long_videos() {
        assert_eq!(
            segments(75.0),
            vec![
                Segment::new(0.0, 30.0),
                Segment::new(30.0, 60.0),
                Segment::new(60.0, 75.0)
            ]
        );
        assert_eq!(
            segments(72.0),
            vec![
                Segment::new(0.0, 30.0),
                Segment::new(30.0, 60.0),
                Segment::new(60.0, 72.0)
            ]
        );
        // Remainder under 5 seconds is not offered
        assert_eq!(segments(63.0).len(), 2);
        assert_eq!(segments(65.0).last(), Some(&Segment::new(60.0, 65.0)));
    }

    #[test]
    fn test_segment_choice_threshold() {
        assert!(!needs_segment_choice(30.0));
        assert!(needs_segment_choice(30.5));
        assert_eq!(whole_video(12.0), Segment::new(0.0, 12.0));
    }

    #[test]
    fn test_capture_range_returns_to_original_position() {
        let mut source = SyntheticSource::new(10.0);
        source.position = 2.0;

        let mut reports = Vec::new();
        let frames = capture_range(&mut source, 0.0, 2.0, Duration::ZERO, |done, total| {
            reports.push((done, total))
        })
        .unwrap();

        assert_eq!(frames.len(), 48);
        assert!(frames.windows(2).all(|w| w[1].time > w[0].time));
        assert!((frames[47].time - 2.0).abs() < 1e-9);
        assert_eq!(source.position, 2.0);
        assert_eq!(source.seeks.len(), 49);
        assert_eq!(reports.first(), Some(&(5, 48)));
        assert_eq!(reports.last(), Some(&(48, 48)));
    }

    #[test]
    fn test_capture_range_backwards_is_single_capture() {
        let mut source = SyntheticSource::new(10.0);
        source.position = 3.0;
        let frames = capture_range(&mut source, 4.0, 3.0, Duration::ZERO, |_, _| {}).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].time, 3.0);
        assert!(source.seeks.is_empty());
    }

    #[test]
    fn test_capture_range_failure_keeps_frames_and_position() {
        let mut source = SyntheticSource::new(10.0);
        source.position = 5.0;
        source.fail_at = Some(0.52);

        let err = capture_range(&mut source, 0.0, 1.0, Duration::ZERO, |_, _| {}).unwrap_err();
        assert!(matches!(err.source, MediaError::Grab(_)));
        assert_eq!(err.frames.len(), 12);
        assert!((err.frames[11].time - 0.5).abs() < 1e-9);
        assert_eq!(source.position, 5.0);
    }

    #[test]
    fn test_bulk_extract_resets_to_window_start() {
        let mut source = SyntheticSource::new(60.0);
        source.position = 45.0;
        let frames = bulk_extract(&mut source, Segment::new(30.0, 42.3), |_, _| {}).unwrap();

        assert_eq!(frames.len(), 123);
        assert_eq!(frames[0].time, 30.0);
        assert!((frames[122].time - 42.2).abs() < 1e-9);
        assert_eq!(source.position, 30.0);
    }

    #[test]
    fn test_spawn_job_hands_source_back() {
        let source = Box::new(SyntheticSource::new(5.0));
        let job = CaptureJob::Bulk {
            window: Segment::new(0.0, 1.0),
        };
        let receiver = spawn_job(source, job, Duration::ZERO);

        let mut progress = 0;
        loop {
            match receiver.recv().unwrap() {
                JobEvent::Progress { .. } => progress += 1,
                JobEvent::Finished {
                    job: finished,
                    source,
                    result,
                } => {
                    assert_eq!(finished, job);
                    assert_eq!(result.unwrap().len(), 10);
                    assert_eq!(source.position(), 0.0);
                    break;
                }
            }
        }
        assert_eq!(progress, 2);
    }
}
