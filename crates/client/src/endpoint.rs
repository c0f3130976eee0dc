//! # Availability Endpoint Access
//!
//! The booking server exposes one GET route that maps an
//! (employee, service, date) triple to the list of bookable times. This
//! module defines the seam the synchronizer talks through
//! ([`AvailabilitySource`]) and the production implementation over an
//! HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use slotsync_core::errors::{SyncError, SyncResult};
use slotsync_core::models::availability::AvailableTimeResponse;
use slotsync_core::models::selection::Selection;

use crate::config::SyncConfig;

/// Anything that can answer "which times are bookable for this triple".
///
/// The synchronizer only depends on this trait, so tests can swap in a
/// mock and consumers can bridge to transports other than plain HTTP.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Returns the bookable times for the given selection, in the order
    /// the server wants them displayed.
    async fn available_time(&self, selection: &Selection) -> SyncResult<Vec<String>>;
}

/// Production [`AvailabilitySource`] issuing one GET per lookup.
pub struct HttpAvailabilityClient {
    http: reqwest::Client,
    endpoint_url: String,
}

impl HttpAvailabilityClient {
    /// Builds the client with the request timeout from the configuration.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(eyre::Report::new)?;

        Ok(Self {
            http,
            endpoint_url: config.endpoint_url(),
        })
    }
}

#[async_trait]
impl AvailabilitySource for HttpAvailabilityClient {
    async fn available_time(&self, selection: &Selection) -> SyncResult<Vec<String>> {
        // The three field values travel as query parameters with nothing
        // beyond standard URL encoding applied to them.
        let response = self
            .http
            .get(&self.endpoint_url)
            .query(&[
                ("employee", selection.employee.as_str()),
                ("service", selection.service.as_str()),
                ("date", selection.date.as_str()),
            ])
            .send()
            .await
            .map_err(eyre::Report::new)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Endpoint(status.as_u16()));
        }

        let body: AvailableTimeResponse = response
            .json()
            .await
            .map_err(|error| SyncError::Decode(error.to_string()))?;

        Ok(body.available_time)
    }
}
