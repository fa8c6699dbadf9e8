// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for media access, export and card ingestion.

use crate::models::frame::Frame;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening or reading a video source.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unsupported media: {}", .0.display())]
    Unsupported(PathBuf),
    #[error("No frames found in {}", .0.display())]
    Empty(PathBuf),
    #[error("Seek to {0:.3}s failed")]
    Seek(f64),
    #[error("Could not grab a frame at {0:.3}s")]
    Grab(f64),
    #[cfg(feature = "video-opencv")]
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// A capture that failed part way, with the frames taken before the failure.
#[derive(Debug, Error)]
#[error("{source} after {} frame(s)", .frames.len())]
pub struct CaptureInterrupted {
    pub frames: Vec<Frame>,
    #[source]
    pub source: MediaError,
}

impl From<MediaError> for CaptureInterrupted {
    fn from(source: MediaError) -> Self {
        Self {
            frames: Vec::new(),
            source,
        }
    }
}

/// Errors raised while composing or writing a sprite sheet.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,
    #[error("All 6 slots must be filled before export ({filled} filled)")]
    IncompleteSlots { filled: usize },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while ingesting card images.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the session key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session storage quota exceeded ({needed} of {quota} bytes)")]
    QuotaExceeded { needed: usize, quota: usize },
}
