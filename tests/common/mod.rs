#![allow(dead_code)]

pub mod fixtures;
pub mod http;

use tabinsight::config::load_configuration_for_tests;

// Ensure configuration is loaded once for all tests of a binary
static INIT: std::sync::Once = std::sync::Once::new();

pub fn ensure_config() {
    INIT.call_once(|| {
        load_configuration_for_tests().expect("Failed to load configuration for tests");
    });
}
