// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Start/stop state for range capture.

/// Two-phase range capture toggle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RangeMarker {
    #[default]
    Idle,
    /// Waiting for the end marker
    Armed {
        /// Playback position when the range was started (seconds)
        start_time: f64,
        /// Sequence length when the range was started
        start_index: usize,
    },
}

/// What the caller must do after toggling the marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeAction {
    /// Range started: capture the current frame
    CaptureStart,
    /// Range closed on a later position: capture the interval
    CaptureRange { start: f64, end: f64 },
    /// Range closed at or before its start: capture the current frame
    CaptureSingle,
}

impl RangeMarker {
    pub fn is_armed(&self) -> bool {
        matches!(self, RangeMarker::Armed { .. })
    }

    /// Advance the toggle given the current playback position and sequence
    /// length, returning the capture to perform.
    pub fn toggle(&mut self, position: f64, sequence_len: usize) -> RangeAction {
        match *self {
            RangeMarker::Idle => {
                *self = RangeMarker::Armed {
                    start_time: position,
                    start_index: sequence_len,
                };
                RangeAction::CaptureStart
            }
            RangeMarker::Armed { start_time, .. } => {
                *self = RangeMarker::Idle;
                if position > start_time {
                    RangeAction::CaptureRange {
                        start: start_time,
                        end: position,
                    }
                } else {
                    RangeAction::CaptureSingle
                }
            }
        }
    }

    /// Number of frames captured since the range was armed.
    pub fn selected_count(&self, sequence_len: usize) -> Option<usize> {
        match self {
            RangeMarker::Idle => None,
            RangeMarker::Armed { start_index, .. } => {
                Some(sequence_len.saturating_sub(*start_index))
            }
        }
    }

    pub fn reset(&mut self) {
        *self = RangeMarker::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_to_armed() {
        let mut marker = RangeMarker::default();
        assert!(!marker.is_armed());

        let action = marker.toggle(1.25, 3);
        assert_eq!(action, RangeAction::CaptureStart);
        assert_eq!(
            marker,
            RangeMarker::Armed {
                start_time: 1.25,
                start_index: 3
            }
        );
    }

    #[test]
    fn test_armed_forward_captures_range() {
        let mut marker = RangeMarker::default();
        marker.toggle(0.0, 0);
        let action = marker.toggle(2.0, 1);
        assert_eq!(action, RangeAction::CaptureRange { start: 0.0, end: 2.0 });
        assert_eq!(marker, RangeMarker::Idle);
    }

    #[test]
    fn test_armed_backwards_falls_back_to_single() {
        let mut marker = RangeMarker::default();
        marker.toggle(4.0, 0);
        assert_eq!(marker.toggle(3.0, 1), RangeAction::CaptureSingle);
        assert_eq!(marker, RangeMarker::Idle);

        marker.toggle(4.0, 0);
        assert_eq!(marker.toggle(4.0, 1), RangeAction::CaptureSingle);
    }

    #[test]
    fn test_selected_count() {
        let mut marker = RangeMarker::default();
        assert_eq!(marker.selected_count(5), None);
        marker.toggle(0.5, 5);
        assert_eq!(marker.selected_count(6), Some(1));
        marker.reset();
        assert!(!marker.is_armed());
    }
}
