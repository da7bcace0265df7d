// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Engine Module
 * Runs the registered token tests against one target
 *
 * © 2026 Bountyy Oy
 */

pub mod audit_engine;

pub use audit_engine::{AuditEngine, FaultPolicy};
