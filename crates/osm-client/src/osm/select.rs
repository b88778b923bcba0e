use super::api::OsmApi;
use super::client::OsmClient;
use super::error::ApiError;
use super::offline::OfflineClient;
use crate::config::ClientConfig;

/// Builds the client a collaborator should use
///
/// The offline flag always wins. Otherwise a live client is built, which
/// requires both credentials; missing ones are a configuration error and no
/// request is ever attempted.
pub fn create_client(config: &ClientConfig) -> Result<Box<dyn OsmApi>, ApiError> {
    if config.use_mock_data {
        tracing::info!("Using offline OSM data");
        return Ok(Box::new(OfflineClient::new()));
    }

    let client = OsmClient::from_config(config)?;
    tracing::debug!(base_url = %client.base_url(), "Using live OSM API");
    Ok(Box::new(client))
}
