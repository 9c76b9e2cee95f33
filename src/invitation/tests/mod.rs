//! Tests for the invitation module.

mod workflow_tests;
