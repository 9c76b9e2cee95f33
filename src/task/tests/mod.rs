//! Tests for the task module.

mod domain_tests;
mod reorder_tests;
