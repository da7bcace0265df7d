// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod console;

pub use console::{summary_line, ConsoleReporter, SharedBuffer};
