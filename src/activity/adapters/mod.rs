//! Adapter implementations for activity persistence and blob storage.

pub mod fs;
pub mod memory;
pub mod postgres;
