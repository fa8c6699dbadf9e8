// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session-scoped card image store.
//!
//! Cards are named, optionally weighted images. The whole collection is kept
//! as one JSON array in the session store, with each image inlined as a
//! base64 data URL.

use crate::error::CardError;
use crate::io::session_store::SessionStore;
use base64::Engine;
use image::ImageFormat;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Session store key holding the card collection.
pub const CARDS_KEY: &str = "megahub-cards";

/// A stored card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub weight: Option<f64>,
    /// `data:<mime>;base64,<bytes>`
    pub base64: String,
}

/// Card record without the image bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMeta {
    pub id: String,
    pub name: String,
    pub weight: Option<f64>,
}

impl Card {
    pub fn meta(&self) -> CardMeta {
        CardMeta {
            id: self.id.clone(),
            name: self.name.clone(),
            weight: self.weight,
        }
    }

    /// Decode the inlined image bytes.
    pub fn image_bytes(&self) -> Option<Vec<u8>> {
        let (_, payload) = self.base64.split_once(";base64,")?;
        base64::engine::general_purpose::STANDARD.decode(payload).ok()
    }
}

/// `<name>-<weight>%.<ext>`; digits are ASCII only.
static WEIGHTED_NAME: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r"^(.+)-((?-u:\d)+(?:\.(?-u:\d)+)?)%\..+$"));

/// Trailing `.<ext>` of a file name.
static EXTENSION: Lazy<Option<Regex>> = Lazy::new(|| compile(r"\.[^.]+$"));

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| log::error!("Invalid card name pattern {}: {}", pattern, e))
        .ok()
}

/// Split a file name like `Hero-50%.png` into display name and weight.
///
/// Names without a trailing `-<number>%` only lose their extension.
pub fn parse_card_name(file_name: &str) -> (String, Option<f64>) {
    let weighted = WEIGHTED_NAME.as_ref().and_then(|re| re.captures(file_name));
    if let Some(caps) = weighted {
        if let Ok(weight) = caps[2].parse() {
            return (caps[1].trim().to_string(), Some(weight));
        }
    }
    let name = match EXTENSION.as_ref() {
        Some(re) => re.replace(file_name, "").into_owned(),
        None => file_name.to_string(),
    };
    (name, None)
}

/// Card collection persisted in a session store.
pub struct CardStore<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> CardStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All stored cards. Missing or malformed state reads as empty.
    pub fn all(&self) -> Vec<Card> {
        let Some(raw) = self.store.get(CARDS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::debug!("Ignoring malformed card state: {}", e);
            Vec::new()
        })
    }

    /// Add image files as new cards and return the updated collection.
    ///
    /// Non-image files and names that are already stored (or appear earlier
    /// in the same batch) are skipped. A read failure aborts the batch
    /// before anything is persisted.
    pub fn add_files(&mut self, paths: &[PathBuf]) -> Result<Vec<Card>, CardError> {
        let mut all = self.all();
        let mut names: HashSet<String> = all.iter().map(|c| c.name.clone()).collect();
        let mut added = Vec::new();

        for path in paths {
            let Ok(format) = ImageFormat::from_path(path) else {
                log::debug!("Skipping non-image file {}", path.display());
                continue;
            };
            let file_name = file_name_of(path);
            let (name, weight) = parse_card_name(&file_name);
            if !names.insert(name.clone()) {
                log::debug!("Skipping duplicate card {}", name);
                continue;
            }

            let bytes = std::fs::read(path).map_err(|source| CardError::Read {
                path: path.clone(),
                source,
            })?;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

            added.push(Card {
                id: uuid::Uuid::new_v4().to_string(),
                name,
                weight,
                base64: format!("data:{};base64,{}", format.to_mime_type(), encoded),
            });
        }

        log::info!("Added {} card(s)", added.len());
        all.extend(added);
        self.persist(&all);
        Ok(all)
    }

    /// Remove one card by id and return the remaining collection.
    pub fn remove(&mut self, id: &str) -> Vec<Card> {
        let mut all = self.all();
        all.retain(|c| c.id != id);
        self.persist(&all);
        all
    }

    /// Discard every card.
    pub fn clear(&mut self) -> Vec<Card> {
        self.store.remove(CARDS_KEY);
        Vec::new()
    }

    fn persist(&mut self, cards: &[Card]) {
        let json = match serde_json::to_string(cards) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize cards: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(CARDS_KEY, json) {
            log::warn!("Session storage full, cards not saved: {}", e);
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
