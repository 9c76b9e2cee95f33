//! Adapter implementations for invitation persistence.

pub mod memory;
pub mod postgres;
