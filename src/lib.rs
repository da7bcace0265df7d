// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Session Token Auditor Library
 * Black-box session token weakness tests driven through a pluggable target adapter
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod adapter;
pub mod adapters;
pub mod analysis;
pub mod config;
pub mod engine;
pub mod errors;
pub mod reporting;
pub mod scanners;
pub mod types;

pub use adapter::TargetAdapter;
pub use engine::{AuditEngine, FaultPolicy};
pub use errors::{AdapterError, AuditError, AuditResult};
pub use scanners::{TestContext, TestRegistry, TokenTest};
pub use types::{Credential, CredentialSet, RunSummary, TestVerdict, Token, Verbosity};
