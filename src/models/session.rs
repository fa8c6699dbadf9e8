// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-tab session state.
//!
//! Each session owns its frames and exposes the operations the UI invokes.
//! The `revision` counters bump whenever frames change so the UI knows to
//! rebuild its thumbnails.

use super::frame::Frame;
use super::preview::PreviewLoop;
use super::range::{RangeAction, RangeMarker};
use super::sequence::FrameSequence;
use super::slots::SlotBoard;
use crate::error::MediaError;
use crate::io::capture::{self, CaptureJob, Segment};
use crate::io::media::VideoSource;

/// Keyframe capture with impact reordering.
#[derive(Debug, Clone, Default)]
pub struct KeyframeSession {
    pub sequence: FrameSequence,
    pub preview: PreviewLoop,
    range: RangeMarker,
    revision: u64,
}

impl KeyframeSession {
    pub fn new(preview_fps: u32) -> Self {
        Self {
            preview: PreviewLoop::new(preview_fps),
            ..Default::default()
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn range(&self) -> RangeMarker {
        self.range
    }

    /// Capture the current picture and append it.
    pub fn capture_current(&mut self, source: &mut dyn VideoSource) -> Result<(), MediaError> {
        let frame = capture::capture_single(source)?;
        log::info!("Captured frame at {:.3}s", frame.time);
        self.append(vec![frame]);
        Ok(())
    }

    /// Toggle range capture at the current position.
    ///
    /// Returns the background job to run when the range closes on a later
    /// position; every other outcome is captured immediately.
    pub fn toggle_range(
        &mut self,
        source: &mut dyn VideoSource,
    ) -> Result<Option<CaptureJob>, MediaError> {
        match self.range.toggle(source.position(), self.sequence.len()) {
            RangeAction::CaptureStart => {
                log::info!("Range capture started at {:.3}s", source.position());
                if let Err(e) = self.capture_current(source) {
                    self.range.reset();
                    return Err(e);
                }
                Ok(None)
            }
            RangeAction::CaptureSingle => {
                self.capture_current(source)?;
                Ok(None)
            }
            RangeAction::CaptureRange { start, end } => Ok(Some(CaptureJob::Range { start, end })),
        }
    }

    /// Frames selected since the range was armed, if it is.
    pub fn range_count(&self) -> Option<usize> {
        self.range.selected_count(self.sequence.len())
    }

    /// Append captured frames in order.
    pub fn append(&mut self, frames: Vec<Frame>) {
        self.sequence.extend(frames);
        self.revision += 1;
    }

    pub fn remove_frame(&mut self, index: usize) -> bool {
        let removed = self.sequence.remove(index).is_some();
        if removed {
            self.revision += 1;
        }
        removed
    }

    pub fn set_impact(&mut self, index: usize) -> bool {
        self.sequence.set_impact(index)
    }

    pub fn ordered_view(&self) -> Vec<&Frame> {
        self.sequence.ordered_view()
    }

    /// Clear frames, impact pointer, range marker and preview.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.range.reset();
        self.preview.stop();
        self.revision += 1;
    }
}

/// Bulk extraction with manual slotting.
#[derive(Debug, Clone, Default)]
pub struct SlotSession {
    pub board: SlotBoard,
    window: Option<Segment>,
    revision: u64,
}

impl SlotSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Window the current frames were extracted from.
    pub fn window(&self) -> Option<Segment> {
        self.window
    }

    /// Replace the extracted frames; slots start empty.
    pub fn load_extracted(&mut self, window: Segment, frames: Vec<Frame>) {
        log::info!("Loaded {} extracted frames", frames.len());
        self.board.load_frames(frames);
        self.window = Some(window);
        self.revision += 1;
    }

    /// Index of the extracted frame nearest the playback position.
    pub fn current_frame(&self, position: f64) -> Option<usize> {
        self.board.nearest_frame(position)
    }

    /// Put the current frame into the first empty slot.
    pub fn assign_current(&mut self, position: f64) -> Option<usize> {
        let index = self.current_frame(position)?;
        self.board.assign_to_first_empty(index)
    }

    /// Take the current frame off the board.
    pub fn remove_current(&mut self, position: f64) -> Option<usize> {
        let index = self.current_frame(position)?;
        self.board.unassign_frame(index)
    }

    /// Drop `frame_index` onto `slot`, replacing its occupant.
    pub fn drop_on_slot(&mut self, frame_index: usize, slot: usize) -> bool {
        self.board.assign(frame_index, slot)
    }

    pub fn clear_slot(&mut self, slot: usize) -> Option<usize> {
        self.board.unassign_slot(slot)
    }

    /// No frames extracted.
    pub fn is_empty(&self) -> bool {
        self.board.frames().is_empty()
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.window = None;
        self.revision += 1;
    }
}
