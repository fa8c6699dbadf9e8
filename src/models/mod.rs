// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: captured frames, sessions, slots and cards.

pub mod card;
pub mod frame;
pub mod preview;
pub mod range;
pub mod sequence;
pub mod session;
pub mod slots;
