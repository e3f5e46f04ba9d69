//! Test Module
//!
//! Cross-module tests for the Lia chat agent.
//!
//! ## Test Categories
//! - `brain_tests`: intent and image-request properties over many inputs
//! - `mode_tests`: end-to-end message → mode transition scenarios
//! - `agent_tests`: agent actor behavior against a mock backend

pub mod brain_tests;
