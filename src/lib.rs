//! Cadence: work-breakdown planning and staffing engine.
//!
//! This crate implements the consistency and lifecycle core of a
//! project-management system: projects containing epics, sprints, and work
//! items, with people and costs attributed to epics or work items. The
//! non-trivial logic lives in the sprint lifecycle state machine (including
//! the reallocation of unfinished work when a sprint closes) and in the
//! validators that keep the work-item/sprint/epic/assignment graph coherent.
//!
//! # Architecture
//!
//! Cadence follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! # Modules
//!
//! - [`planning`]: Projects, epics, sprints, work items, and the sprint
//!   lifecycle state machine
//! - [`staffing`]: People, teams, costs, and validated cost/person
//!   assignments

pub mod planning;
pub mod staffing;
