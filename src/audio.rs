// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Short feedback cues.
//!
//! Without the `audio` feature cues only reach the log.

/// Feedback sounds triggered by operator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Navigation step or rate change
    Cursor,
    /// Capture, preview start, impact frame in preview
    Select,
    /// Stop or reset
    Back,
    /// Export finished
    Chord,
}

impl Cue {
    /// Tone frequency in Hz.
    pub fn frequency(self) -> f32 {
        match self {
            Cue::Cursor => 660.0,
            Cue::Select => 880.0,
            Cue::Back => 440.0,
            Cue::Chord => 1046.5,
        }
    }
}

pub trait CuePlayer {
    fn play(&self, cue: Cue);
}

/// Cue player that only logs.
pub struct LogCuePlayer;

impl CuePlayer for LogCuePlayer {
    fn play(&self, cue: Cue) {
        log::debug!("cue: {:?}", cue);
    }
}

/// Pick the best available cue player.
pub fn default_player() -> Box<dyn CuePlayer> {
    #[cfg(feature = "audio")]
    {
        match tone::TonePlayer::new() {
            Ok(player) => return Box::new(player),
            Err(e) => log::warn!("Audio output unavailable, cues disabled: {}", e),
        }
    }
    Box::new(LogCuePlayer)
}

#[cfg(feature = "audio")]
mod tone {
    use super::{Cue, CuePlayer};
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, StreamError};
    use std::time::Duration;

    /// Plays each cue as a short sine tone.
    pub struct TonePlayer {
        // Dropping the stream silences the handle
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl TonePlayer {
        pub fn new() -> Result<Self, StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl CuePlayer for TonePlayer {
        fn play(&self, cue: Cue) {
            let source = SineWave::new(cue.frequency())
                .take_duration(Duration::from_millis(60))
                .amplify(0.15);
            if let Err(e) = self.handle.play_raw(source) {
                log::debug!("Failed to play cue {:?}: {}", cue, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_have_distinct_tones() {
        let cues = [Cue::Cursor, Cue::Select, Cue::Back, Cue::Chord];
        for (i, a) in cues.iter().enumerate() {
            for b in &cues[i + 1..] {
                assert_ne!(a.frequency(), b.frequency());
            }
        }
    }
}
