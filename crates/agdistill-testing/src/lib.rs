//! Testing infrastructure for agdistill tests.
//!
//! This crate provides utilities for writing readable analyzer tests:
//! - `SessionBuilder`: Fluent interface for building raw hook event streams
//! - `fixtures`: Small constructors for phases, incidents and messages
//! - `TestRepo`: Throwaway git repository with back-dated commits

pub mod fixtures;
pub mod repo;

pub use fixtures::SessionBuilder;
pub use repo::TestRepo;
