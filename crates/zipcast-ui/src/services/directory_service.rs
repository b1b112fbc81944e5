//! Directory backend: loads the country and town lists at startup.
//! Network work runs on the tokio runtime; results are sent via mpsc.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use zipcast_client::{load_directory, ForecastBackend, LocationDirectory};
use zipcast_core::ForecastError;

use crate::error_mapping::directory_error;

/// Messages sent from the directory load back to the app loop
#[derive(Debug)]
pub enum DirectoryServiceMessage {
    /// Both lists, or the load failure
    LoadDone(Result<LocationDirectory, ForecastError>),
}

/// Request the directory load asynchronously.
/// Sends `LoadDone` on the channel when complete.
pub fn request_load<B>(
    tx: &UnboundedSender<DirectoryServiceMessage>,
    backend: Arc<B>,
    runtime: &Handle,
) where
    B: ForecastBackend + 'static,
{
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = load_directory(backend.as_ref())
            .await
            .map_err(directory_error);
        if tx.send(DirectoryServiceMessage::LoadDone(result)).is_err() {
            tracing::debug!("Directory result dropped; app loop has exited");
        }
    });
}
