pub mod directory_service;
pub mod prediction_service;

pub use directory_service::{request_load as request_directory_load, DirectoryServiceMessage};
pub use prediction_service::{
    request_prediction, run_prediction, PredictionServiceMessage,
};
