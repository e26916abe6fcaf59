//! Infrastructure adapters for staffing ports.

pub mod memory;

pub use memory::InMemoryStaffingRepository;
