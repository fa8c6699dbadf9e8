// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Six-slot sprite board for bulk-extracted frames.
//!
//! Extracted frames live in a flat, time-ordered arena. Each slot holds the
//! arena index of its occupant plus a private copy of its pixels, and each
//! arena entry records which slot (if any) holds it. Both sides of that link
//! are only ever changed by [`SlotBoard::assign`] and
//! [`SlotBoard::unassign_slot`].

use super::frame::Frame;
use image::RgbaImage;

/// Number of fixed slots on the board.
pub const SLOT_COUNT: usize = 6;

/// Display names of the slots, in export order.
pub const SLOT_NAMES: [&str; SLOT_COUNT] = ["Slot 1", "Slot 2", "Slot 3", "Slot 4", "Slot 5", "Slot 6"];

/// A bulk-extracted frame and the slot currently holding it.
#[derive(Debug, Clone)]
pub struct ExtractedFrame {
    pub frame: Frame,
    slot: Option<usize>,
}

impl ExtractedFrame {
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }
}

/// Slot occupant: arena index plus a copy of the pixels.
#[derive(Debug, Clone)]
pub struct SlotEntry {
    pub frame_index: usize,
    pub image: RgbaImage,
}

#[derive(Debug, Clone, Default)]
pub struct SlotBoard {
    frames: Vec<ExtractedFrame>,
    slots: [Option<SlotEntry>; SLOT_COUNT],
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extracted frames. All slots are cleared.
    pub fn load_frames(&mut self, frames: Vec<Frame>) {
        self.frames = frames
            .into_iter()
            .map(|frame| ExtractedFrame { frame, slot: None })
            .collect();
        self.slots = Default::default();
    }

    /// Drop frames and slot contents.
    pub fn clear(&mut self) {
        self.load_frames(Vec::new());
    }

    pub fn frames(&self) -> &[ExtractedFrame] {
        &self.frames
    }

    pub fn slot(&self, slot: usize) -> Option<&SlotEntry> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn slots(&self) -> &[Option<SlotEntry>; SLOT_COUNT] {
        &self.slots
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when every slot is occupied (export precondition).
    pub fn is_complete(&self) -> bool {
        self.filled_count() == SLOT_COUNT
    }

    /// Put `frame_index` into `slot`, replacing the previous occupant.
    ///
    /// A frame occupies at most one slot: if it already sits elsewhere it is
    /// moved. Returns false for invalid indices.
    pub fn assign(&mut self, frame_index: usize, slot: usize) -> bool {
        if frame_index >= self.frames.len() || slot >= SLOT_COUNT {
            return false;
        }
        if self.frames[frame_index].slot == Some(slot) {
            return true;
        }

        if let Some(previous) = self.frames[frame_index].slot {
            self.unassign_slot(previous);
        }
        self.unassign_slot(slot);

        self.slots[slot] = Some(SlotEntry {
            frame_index,
            image: self.frames[frame_index].frame.image.clone(),
        });
        self.frames[frame_index].slot = Some(slot);
        true
    }

    /// Put `frame_index` into the first empty slot.
    ///
    /// A frame already on the board stays where it is. Returns the slot
    /// holding the frame, or `None` when the board is full or the index is
    /// invalid.
    pub fn assign_to_first_empty(&mut self, frame_index: usize) -> Option<usize> {
        let existing = self.frames.get(frame_index)?.slot;
        if existing.is_some() {
            return existing;
        }
        let slot = self.slots.iter().position(|s| s.is_none())?;
        self.assign(frame_index, slot).then_some(slot)
    }

    /// Empty `slot`, clearing its occupant's back-reference.
    pub fn unassign_slot(&mut self, slot: usize) -> Option<usize> {
        let entry = self.slots.get_mut(slot)?.take()?;
        if let Some(frame) = self.frames.get_mut(entry.frame_index) {
            frame.slot = None;
        }
        Some(entry.frame_index)
    }

    /// Take `frame_index` off the board if it is on it.
    pub fn unassign_frame(&mut self, frame_index: usize) -> Option<usize> {
        let slot = self.frames.get(frame_index)?.slot?;
        self.unassign_slot(slot);
        Some(slot)
    }

    /// Index of the extracted frame closest to `time`.
    pub fn nearest_frame(&self, time: f64) -> Option<usize> {
        self.frames
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.frame.time - time)
                    .abs()
                    .total_cmp(&(b.frame.time - time).abs())
            })
            .map(|(i, _)| i)
    }

    /// Slot images in export order, if every slot is filled.
    pub fn slot_images(&self) -> Option<Vec<&RgbaImage>> {
        self.slots
            .iter()
            .map(|s| s.as_ref().map(|entry| &entry.image))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::tests::solid;

    fn board_with(n: u8) -> SlotBoard {
        let mut board = SlotBoard::new();
        board.load_frames((0..n).map(|i| solid(2, 2, i, i as f64 * 0.1)).collect());
        board
    }

    /// Every occupied slot points at a frame pointing back at it.
    fn assert_consistent(board: &SlotBoard) {
        for (slot, entry) in board.slots().iter().enumerate() {
            if let Some(entry) = entry {
                assert_eq!(board.frames()[entry.frame_index].slot(), Some(slot));
            }
        }
        for (i, frame) in board.frames().iter().enumerate() {
            if let Some(slot) = frame.slot() {
                assert_eq!(board.slot(slot).map(|e| e.frame_index), Some(i));
            }
        }
    }

    #[test]
    fn test_assign_same_slot_twice_is_idempotent() {
        let mut board = board_with(4);
        assert!(board.assign(1, 2));
        assert!(board.assign(1, 2));

        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.slot(2).map(|e| e.frame_index), Some(1));
        assert_eq!(board.frames()[1].slot(), Some(2));
        assert_consistent(&board);
    }

    #[test]
    fn test_assign_moves_frame_between_slots() {
        let mut board = board_with(4);
        board.assign(1, 0);
        board.assign(1, 3);

        assert!(board.slot(0).is_none());
        assert_eq!(board.frames()[1].slot(), Some(3));
        assert_eq!(board.filled_count(), 1);
        assert_consistent(&board);
    }

    #[test]
    fn test_assign_overwrites_previous_occupant() {
        let mut board = board_with(4);
        board.assign(0, 4);
        board.assign(2, 4);

        assert_eq!(board.frames()[0].slot(), None);
        assert_eq!(board.frames()[2].slot(), Some(4));
        assert_eq!(board.slot(4).map(|e| e.image.as_raw()[0]), Some(2));
        assert_consistent(&board);
    }

    #[test]
    fn test_slot_holds_a_copy() {
        let mut board = board_with(2);
        board.assign(1, 0);
        board.load_frames(Vec::new());
        assert!(board.slot(0).is_none());

        let mut board = board_with(2);
        board.assign(1, 0);
        let copy = board.slot(0).map(|e| e.image.clone());
        assert_eq!(copy.as_ref(), Some(&board.frames()[1].frame.image));
    }

    #[test]
    fn test_first_empty_fills_in_order() {
        let mut board = board_with(8);
        assert_eq!(board.assign_to_first_empty(5), Some(0));
        assert_eq!(board.assign_to_first_empty(6), Some(1));
        board.unassign_slot(0);
        assert_eq!(board.assign_to_first_empty(7), Some(0));
        // Already on the board
        assert_eq!(board.assign_to_first_empty(6), Some(1));
        assert_eq!(board.filled_count(), 2);
        assert_consistent(&board);
    }

    #[test]
    fn test_first_empty_on_full_board() {
        let mut board = board_with(8);
        for i in 0..SLOT_COUNT {
            board.assign_to_first_empty(i);
        }
        assert!(board.is_complete());
        assert_eq!(board.assign_to_first_empty(7), None);
        assert_eq!(board.frames()[7].slot(), None);
    }

    #[test]
    fn test_unassign_clears_both_sides() {
        let mut board = board_with(3);
        board.assign(2, 5);
        assert_eq!(board.unassign_frame(2), Some(5));
        assert!(board.slot(5).is_none());
        assert_eq!(board.frames()[2].slot(), None);
        assert_eq!(board.unassign_frame(2), None);
        assert_eq!(board.unassign_slot(5), None);
    }

    #[test]
    fn test_invalid_indices_rejected() {
        let mut board = board_with(2);
        assert!(!board.assign(2, 0));
        assert!(!board.assign(0, SLOT_COUNT));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_nearest_frame() {
        let board = board_with(10);
        assert_eq!(board.nearest_frame(0.0), Some(0));
        assert_eq!(board.nearest_frame(0.42), Some(4));
        assert_eq!(board.nearest_frame(5.0), Some(9));
        assert_eq!(SlotBoard::new().nearest_frame(1.0), None);
    }

    #[test]
    fn test_slot_images_requires_full_board() {
        let mut board = board_with(6);
        board.assign(0, 0);
        assert!(board.slot_images().is_none());
        for i in 1..SLOT_COUNT {
            board.assign(i, i);
        }
        let images = board.slot_images().unwrap_or_default();
        assert_eq!(images.len(), SLOT_COUNT);
        assert_eq!(images[3].as_raw()[0], 3);
    }
}
