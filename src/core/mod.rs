//! Core business logic - framework-agnostic inventory operations.

/// Supply repository: add, list, update, delete, total value and reset
pub mod supply;
