// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Shipped Target Config Tests
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use session_token_auditor::adapters::HttpFormAdapter;
use session_token_auditor::config::{ConfigLoader, FormEncoding};
use session_token_auditor::scanners::TestRegistry;
use session_token_auditor::types::Verbosity;

#[test]
fn test_vap2500_target_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/targets/vap2500.yaml");
    let content = std::fs::read_to_string(path).unwrap();
    let config = ConfigLoader::new(path).unwrap().parse(&content).unwrap();

    assert_eq!(config.verbosity, Verbosity::Medium);
    assert_eq!(config.credentials.len(), 2);
    assert_eq!(config.target.login.encoding, FormEncoding::Multipart);
    assert!(config.target.logout.is_none());

    let credentials = config.credential_set().unwrap();
    assert_eq!(credentials.secondary().and_then(|c| c.username()), Some("super"));

    let registry = TestRegistry::<HttpFormAdapter>::default_battery().without(&config.disabled_tests);
    assert!(!registry.exists("is_persistent"));
    assert_eq!(registry.count(), 5);

    assert!(HttpFormAdapter::new(config.target).is_ok());
}
