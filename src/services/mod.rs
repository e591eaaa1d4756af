pub mod approval;

pub use approval::{ApprovalError, ApprovalService, DecisionOutcome};
