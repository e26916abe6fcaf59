//! Adapter implementations for planning ports.

pub mod memory;

pub use memory::InMemoryPlanningRepository;
