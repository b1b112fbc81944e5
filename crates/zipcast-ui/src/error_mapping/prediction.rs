use zipcast_client::ClientError;
use zipcast_core::ForecastError;

pub fn resolution_error(e: ClientError) -> ForecastError {
    tracing::warn!("ZIP resolution request failed: {}", e);
    ForecastError::resolution_failed(e.backend_message())
}

pub fn prediction_error(e: ClientError) -> ForecastError {
    tracing::warn!("Prediction request failed: {}", e);
    ForecastError::prediction_failed(e.backend_message())
}
