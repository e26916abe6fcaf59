//! Work-breakdown planning for Cadence.
//!
//! This module owns the project/epic/sprint/work-item graph and the rules
//! that keep it coherent: the work-item location invariant, the sprint
//! lifecycle state machine (including reallocation of unfinished work when a
//! sprint closes), and the referential cleanup performed when an epic or a
//! project is removed. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
