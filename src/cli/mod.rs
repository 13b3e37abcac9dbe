pub mod orchestration;

pub use orchestration::{run_workflow, WorkflowOutcome, CHANGES_MADE_OUTPUT};
