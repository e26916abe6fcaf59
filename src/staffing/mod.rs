//! People, teams, and cost attribution for Cadence.
//!
//! This module owns the entities that tie people and money to the planning
//! graph: persons, teams, costs, cost and person assignments, and
//! per-sprint resource allocations. Its central rule is assignment target
//! exclusivity: every assignment points at exactly one epic or exactly one
//! work item, never both and never neither, with non-negative hours and
//! amounts. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
