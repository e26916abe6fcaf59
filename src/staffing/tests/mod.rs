//! Unit tests for the staffing module.
//!
//! Tests are organised by domain concept, covering happy paths, error
//! cases, and edge cases for all public APIs.
