use zipcast_client::ClientError;
use zipcast_core::ForecastError;

/// Any directory failure becomes the fixed load advisory; the detail is logged only.
pub fn directory_error(e: ClientError) -> ForecastError {
    tracing::error!("Failed to load location directory: {}", e);
    ForecastError::Load(e.to_string())
}
