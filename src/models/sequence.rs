// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered keyframe sequence with an optional impact frame.
//!
//! The impact frame is the rotation origin used by both the animation
//! preview and the sprite sheet export, so what the preview shows is
//! exactly what gets written.

use super::frame::Frame;

/// Captured frames in insertion order plus the impact pointer.
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    /// Invariant: `Some(i)` implies `i < frames.len()`
    impact: Option<usize>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn impact(&self) -> Option<usize> {
        self.impact
    }

    /// Append a single frame at the end.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Append a batch of frames, keeping their order.
    pub fn extend(&mut self, frames: impl IntoIterator<Item = Frame>) {
        self.frames.extend(frames);
    }

    /// Designate the impact frame. Out-of-range indices are ignored.
    pub fn set_impact(&mut self, index: usize) -> bool {
        if index < self.frames.len() {
            self.impact = Some(index);
            true
        } else {
            false
        }
    }

    /// Remove the frame at `index`, keeping the impact pointer on the same
    /// logical frame or clearing it if that frame is the one removed.
    pub fn remove(&mut self, index: usize) -> Option<Frame> {
        if index >= self.frames.len() {
            return None;
        }
        let removed = self.frames.remove(index);
        self.impact = match self.impact {
            Some(impact) if impact == index => None,
            Some(impact) if index < impact => Some(impact - 1),
            other => other,
        };
        Some(removed)
    }

    /// Drop every frame and the impact pointer.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.impact = None;
    }

    /// Frames rotated so the impact frame comes first.
    pub fn ordered_view(&self) -> Vec<&Frame> {
        ordered_view(&self.frames, self.impact)
    }
}

/// Rotate `frames` so that `impact` becomes element 0.
///
/// Returns the original order when `impact` is unset or out of range. The
/// input is never mutated.
pub fn ordered_view<T>(frames: &[T], impact: Option<usize>) -> Vec<&T> {
    match impact {
        Some(i) if i < frames.len() => frames[i..].iter().chain(frames[..i].iter()).collect(),
        _ => frames.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::tests::solid;

    fn sequence_of(n: u8) -> FrameSequence {
        let mut seq = FrameSequence::new();
        seq.extend((0..n).map(|i| solid(2, 2, i, i as f64)));
        seq
    }

    fn tags(view: &[&Frame]) -> Vec<u8> {
        view.iter().map(|f| f.pixels()[0]).collect()
    }

    #[test]
    fn test_ordered_view_rotates_to_impact() {
        let items = [0, 1, 2, 3, 4];
        for i in 0..items.len() {
            let view = ordered_view(&items, Some(i));
            assert_eq!(view.len(), items.len());
            assert_eq!(*view[0], items[i]);
            for (k, v) in view.iter().enumerate() {
                assert_eq!(**v, items[(i + k) % items.len()]);
            }
        }
    }

    #[test]
    fn test_ordered_view_unset_or_out_of_range() {
        let items = [10, 20, 30];
        assert_eq!(ordered_view(&items, None), vec![&10, &20, &30]);
        assert_eq!(ordered_view(&items, Some(3)), vec![&10, &20, &30]);
        assert_eq!(ordered_view(&items, Some(99)), vec![&10, &20, &30]);
    }

    #[test]
    fn test_ordered_view_does_not_mutate() {
        let mut seq = sequence_of(4);
        seq.set_impact(2);
        assert_eq!(tags(&seq.ordered_view()), vec![2, 3, 0, 1]);
        assert_eq!(seq.frames()[0].pixels()[0], 0);
        assert_eq!(seq.impact(), Some(2));
    }

    #[test]
    fn test_remove_impact_frame_clears_pointer() {
        let mut seq = sequence_of(5);
        seq.set_impact(2);
        seq.remove(2);
        assert_eq!(seq.impact(), None);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_remove_before_impact_decrements_pointer() {
        let mut seq = sequence_of(5);
        seq.set_impact(3);
        seq.remove(1);
        assert_eq!(seq.impact(), Some(2));
        // Still the same logical frame
        assert_eq!(seq.get(2).map(|f| f.pixels()[0]), Some(3));
    }

    #[test]
    fn test_remove_after_impact_keeps_pointer() {
        let mut seq = sequence_of(5);
        seq.set_impact(1);
        seq.remove(4);
        assert_eq!(seq.impact(), Some(1));
        assert_eq!(tags(&seq.ordered_view()), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut seq = sequence_of(2);
        seq.set_impact(1);
        assert!(seq.remove(5).is_none());
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.impact(), Some(1));
    }

    #[test]
    fn test_set_impact_rejects_invalid_index() {
        let mut seq = sequence_of(3);
        assert!(!seq.set_impact(3));
        assert_eq!(seq.impact(), None);
        assert!(seq.set_impact(0));
        assert_eq!(seq.impact(), Some(0));
    }

    #[test]
    fn test_single_frame_rotation_is_noop() {
        let mut seq = sequence_of(1);
        seq.set_impact(0);
        assert_eq!(tags(&seq.ordered_view()), vec![0]);
    }
}
