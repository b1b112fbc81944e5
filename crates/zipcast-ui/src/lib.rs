pub mod app;
pub mod command;
pub mod error_mapping;
pub mod services;
pub mod state;
pub mod view;

pub use app::{run, App, EventOutcome, LEARN_MORE_URL};
pub use command::{parse_command, UserEvent};
pub use state::{FormState, PredictionInput, PredictionOutcome, WorkflowState};
