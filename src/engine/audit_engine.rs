// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Test orchestrator
//!
//! Runs every registered test in registration order, one after another,
//! forwards each verdict to the console reporter and tallies the tests that
//! found a weakness.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info};

use crate::adapter::TargetAdapter;
use crate::errors::AuditResult;
use crate::reporting::ConsoleReporter;
use crate::scanners::{TestContext, TestRegistry, DEFAULT_SAMPLE_SIZE};
use crate::types::{CredentialSet, RunSummary, TestOutcome, TestRecord, Verbosity};

/// What to do when a test hits an adapter or configuration fault
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Abort the whole run with the fault
    #[default]
    Abort,
    /// Record the test as faulted and carry on with the next one
    Isolate,
}

pub struct AuditEngine<A: TargetAdapter> {
    adapter: A,
    credentials: CredentialSet,
    registry: TestRegistry<A>,
    reporter: ConsoleReporter,
    fault_policy: FaultPolicy,
    sample_size: usize,
}

impl<A: TargetAdapter + 'static> AuditEngine<A> {
    pub fn new(adapter: A, credentials: CredentialSet, verbosity: Verbosity) -> Self {
        Self {
            adapter,
            credentials,
            registry: TestRegistry::default_battery(),
            reporter: ConsoleReporter::stdout(verbosity),
            fault_policy: FaultPolicy::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    pub fn with_registry(mut self, registry: TestRegistry<A>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_reporter(mut self, reporter: ConsoleReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn registry(&self) -> &TestRegistry<A> {
        &self.registry
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Run every registered test.
    ///
    /// Under [`FaultPolicy::Abort`] the first fault is returned and no summary
    /// line is printed.
    pub async fn run(&self) -> AuditResult<RunSummary> {
        let started = Instant::now();
        info!(
            "[Audit] Starting {} tests against {} ({} identities)",
            self.registry.count(),
            self.adapter.name(),
            self.credentials.len()
        );
        self.reporter.start();

        let ctx = TestContext::new(&self.adapter, &self.credentials).with_sample_size(self.sample_size);
        let mut summary = RunSummary::default();

        for test in self.registry.iter() {
            let name = test.name();
            self.reporter.running(name);

            let outcome = match test.run(&ctx).await {
                Ok(verdict) => {
                    info!("[Audit] {} finished, weakness found: {}", name, verdict.failed);
                    self.reporter.verdict(&verdict);
                    TestOutcome::Completed(verdict)
                }
                Err(e) => match self.fault_policy {
                    FaultPolicy::Abort => {
                        error!("[Audit] {} aborted the run: {}", name, e);
                        return Err(e);
                    }
                    FaultPolicy::Isolate => {
                        error!("[Audit] {} faulted, continuing: {}", name, e);
                        self.reporter.fault(name, &e.to_string());
                        TestOutcome::Faulted(e.to_string())
                    }
                },
            };

            summary.records.push(TestRecord {
                name: name.to_string(),
                outcome,
            });
        }

        let failures = summary.failures();
        self.reporter.summary(failures);

        info!(
            "[Audit] Run complete in {:.2}s: {} failures, {} faulted",
            started.elapsed().as_secs_f64(),
            failures,
            summary.faulted().len()
        );

        Ok(summary)
    }
}
