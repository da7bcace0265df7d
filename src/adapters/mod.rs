// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Reference Target Adapters
 * A calibration adapter and a config-driven form-login adapter
 * © 2026 Bountyy Oy
 */

pub mod http_form;
pub mod random_strings;

pub use http_form::{HttpFormAdapter, HttpResponse};
pub use random_strings::RandomStringAdapter;
