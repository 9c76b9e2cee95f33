//! Tests for the activity module.

mod feed_tests;
