//! Application services for work-breakdown planning.

mod authoring;
mod removal;
mod sprint_lifecycle;

pub use authoring::{
    AuthoringError, AuthoringResult, AuthoringService, CreateWorkItemRequest,
};
pub use removal::{
    EpicRemoval, ProjectRemoval, RemovalError, RemovalResult, RemovalService, SprintRemoval,
};
pub use sprint_lifecycle::{
    CompleteSprintRequest, SprintCompletion, SprintLifecycleError, SprintLifecycleResult,
    SprintLifecycleService,
};
