// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Analysis Module
 * Statistical heuristics over collected session tokens
 * © 2026 Bountyy Oy
 */

pub mod randomness;

pub use randomness::{analyze, CharsetClass, NonRandomness, RandomnessReport, Signal};
