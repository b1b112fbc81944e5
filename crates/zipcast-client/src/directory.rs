//! Startup load of the country and town lists.

use crate::client::ForecastBackend;
use crate::error::ClientResult;
use crate::types::LocationDirectory;

/// Fetch countries and towns concurrently and normalize both lists.
///
/// Both requests must succeed; on the first failure the whole load fails and
/// nothing is returned, so callers never see a half-populated directory.
///
/// # Errors
/// Returns the first `ClientError` raised by either request.
pub async fn load_directory<B: ForecastBackend>(backend: &B) -> ClientResult<LocationDirectory> {
    let (countries, towns) = tokio::try_join!(backend.countries(), backend.towns())?;

    tracing::info!(
        "Loaded location directory: {} countries, {} towns",
        countries.len(),
        towns.len()
    );

    Ok(LocationDirectory::from_raw(countries, towns))
}
