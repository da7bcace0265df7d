// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Token Test Registry
//!
//! Ordered name → test mapping. Tests run in registration order; registering
//! a name that already exists replaces the test in place.
//!
//! ## Example
//!
//! ```rust,ignore
//! let registry = TestRegistry::default_battery()
//!     .without(&["is_persistent"]);
//! ```

use super::{
    KnownValuesTest, NonRandomTest, PersistenceTest, SequentialTokensTest, StaticTokensTest,
    TokenTest, ValidationBypassTest,
};
use crate::adapter::TargetAdapter;
use tracing::warn;

/// Names of the built-in tests, in run order
pub const DEFAULT_TESTS: &[&str] = &[
    "is_static",
    "is_sequential",
    "is_persistent",
    "is_validated",
    "is_made_of_known_values",
    "is_nonrandom",
];

/// Tests that still make sense against an adapter that only produces tokens
pub const CALIBRATION_TESTS: &[&str] = &["is_static", "is_sequential", "is_nonrandom"];

pub struct TestRegistry<A: TargetAdapter> {
    tests: Vec<Box<dyn TokenTest<A>>>,
}

impl<A: TargetAdapter + 'static> TestRegistry<A> {
    pub fn new() -> Self {
        Self { tests: Vec::new() }
    }

    /// The six built-in tests in their canonical order
    pub fn default_battery() -> Self {
        Self::new()
            .with(StaticTokensTest)
            .with(SequentialTokensTest)
            .with(PersistenceTest)
            .with(ValidationBypassTest)
            .with(KnownValuesTest)
            .with(NonRandomTest)
    }

    pub fn with(mut self, test: impl TokenTest<A> + 'static) -> Self {
        self.register(Box::new(test));
        self
    }

    pub fn register(&mut self, test: Box<dyn TokenTest<A>>) {
        match self.tests.iter().position(|t| t.name() == test.name()) {
            Some(index) => self.tests[index] = test,
            None => self.tests.push(test),
        }
    }

    /// Drop the named tests, e.g. persistence against a target without logout
    pub fn without(mut self, names: &[impl AsRef<str>]) -> Self {
        for name in names {
            if !self.exists(name.as_ref()) {
                warn!("[Registry] Cannot disable unknown test '{}'", name.as_ref());
            }
        }
        self.tests
            .retain(|t| !names.iter().any(|name| name.as_ref() == t.name()));
        self
    }

    /// Keep only the named tests, preserving registration order
    pub fn only(mut self, names: &[impl AsRef<str>]) -> Self {
        self.tests
            .retain(|t| names.iter().any(|name| name.as_ref() == t.name()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn TokenTest<A>> {
        self.tests.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn count(&self) -> usize {
        self.tests.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tests.iter().map(|t| t.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn TokenTest<A>> {
        self.tests.iter().map(|t| t.as_ref())
    }
}

impl<A: TargetAdapter + 'static> Default for TestRegistry<A> {
    fn default() -> Self {
        Self::default_battery()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RandomStringAdapter;
    use crate::errors::AuditResult;
    use crate::scanners::TestContext;
    use crate::types::TestVerdict;

    struct AlwaysFails;

    #[async_trait::async_trait]
    impl<A: TargetAdapter> TokenTest<A> for AlwaysFails {
        fn name(&self) -> &'static str {
            "always_fails"
        }

        async fn run(&self, _ctx: &TestContext<'_, A>) -> AuditResult<TestVerdict> {
            let mut verdict = TestVerdict::pass();
            verdict.finding("Always fails.");
            Ok(verdict)
        }
    }

    #[test]
    fn test_default_battery_order() {
        let registry = TestRegistry::<RandomStringAdapter>::default_battery();
        assert_eq!(registry.names(), DEFAULT_TESTS.to_vec());
        assert_eq!(registry.count(), 6);
    }

    #[test]
    fn test_register_appends_and_replaces() {
        let mut registry = TestRegistry::<RandomStringAdapter>::default_battery().with(AlwaysFails);
        assert_eq!(registry.names().last(), Some(&"always_fails"));

        registry.register(Box::new(AlwaysFails));
        assert_eq!(registry.count(), 7);
    }

    #[test]
    fn test_without_and_only() {
        let registry = TestRegistry::<RandomStringAdapter>::default_battery()
            .without(&["is_persistent", "no_such_test"]);
        assert!(!registry.exists("is_persistent"));
        assert_eq!(registry.count(), 5);

        let registry = TestRegistry::<RandomStringAdapter>::default_battery()
            .only(&["is_nonrandom", "is_static", "is_sequential"]);
        assert_eq!(registry.names(), CALIBRATION_TESTS.to_vec());
    }
}
