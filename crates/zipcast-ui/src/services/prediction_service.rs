//! Prediction backend: ZIP resolution followed by the prediction request.
//! Network work runs on the tokio runtime; results are sent via mpsc.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use zipcast_client::{ForecastBackend, PredictionReport, ResolvedLocation};
use zipcast_core::ForecastError;

use crate::error_mapping::{prediction_error, resolution_error};
use crate::state::{PredictionInput, PredictionOutcome};

/// Messages sent from a prediction attempt back to the app loop
#[derive(Debug)]
pub enum PredictionServiceMessage {
    /// Result of one full attempt
    PredictionDone(PredictionOutcome),
}

/// Run one prediction attempt to completion.
///
/// For ZIP input the resolved country/town are passed straight into the
/// prediction request; nothing is read back from form state in between.
pub async fn run_prediction<B: ForecastBackend>(
    backend: &B,
    input: PredictionInput,
) -> PredictionOutcome {
    match input {
        PredictionInput::Zip(zip) => {
            let resolved: ResolvedLocation = match backend.resolve_zip(&zip).await {
                Ok(resolution) => resolution.into(),
                Err(e) => {
                    return PredictionOutcome {
                        resolved: None,
                        result: Err(resolution_error(e)),
                    }
                }
            };

            // TODO: decide whether a resolution with neither country nor town
            // should fail here instead of reaching /predict with two empty fields.
            tracing::info!(
                "Resolved ZIP {} to country={:?} town={:?}",
                zip,
                resolved.country,
                resolved.town
            );

            let result = predict_for(backend, &resolved).await;
            PredictionOutcome {
                resolved: Some(resolved),
                result,
            }
        }
        PredictionInput::Selection(location) => PredictionOutcome {
            resolved: None,
            result: predict_for(backend, &location).await,
        },
    }
}

async fn predict_for<B: ForecastBackend>(
    backend: &B,
    location: &ResolvedLocation,
) -> Result<PredictionReport, ForecastError> {
    backend
        .predict(&location.country, &location.town)
        .await
        .map(|summary| PredictionReport::new(location, summary))
        .map_err(prediction_error)
}

/// Request a prediction asynchronously.
/// Sends `PredictionDone` on the channel when complete.
pub fn request_prediction<B>(
    tx: &UnboundedSender<PredictionServiceMessage>,
    backend: Arc<B>,
    input: PredictionInput,
    runtime: &Handle,
) where
    B: ForecastBackend + 'static,
{
    let tx = tx.clone();

    runtime.spawn(async move {
        let outcome = run_prediction(backend.as_ref(), input).await;
        if tx
            .send(PredictionServiceMessage::PredictionDone(outcome))
            .is_err()
        {
            tracing::debug!("Prediction result dropped; app loop has exited");
        }
    });
}
