// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video sources, capture jobs, sheet export and persistence.

pub mod capture;
pub mod export;
pub mod media;
pub mod serialization;
pub mod session_store;
