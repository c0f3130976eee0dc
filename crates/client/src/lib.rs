//! # slotsync Client
//!
//! The client crate keeps a booking form's time dropdown in sync with a
//! remote availability endpoint. It reacts to changes of the employee,
//! service and date selectors, fetches the bookable times for the current
//! triple and rebuilds the time control from the answer.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Config**: Environment-driven settings for endpoint and logging
//! - **Endpoint**: The availability lookup seam and its HTTP implementation
//! - **Synchronizer**: The event loop tying selection changes to refreshes
//!
//! The HTTP side uses reqwest; everything event-driven runs on Tokio.

/// Configuration module for synchronizer settings
pub mod config;
/// Availability lookup seam and HTTP client
pub mod endpoint;
/// Mock availability source for consumer tests
pub mod mock;
/// Selection tracking and time-control refresh logic
pub mod synchronizer;

use eyre::Result;
use slotsync_core::models::time_control::TimeControl;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::config::SyncConfig;
use crate::endpoint::HttpAvailabilityClient;
use crate::synchronizer::{SlotSynchronizer, SyncHandle};

/// Wires up a synchronizer against the configured booking server
///
/// This function initializes logging, builds the HTTP availability
/// client and binds the event loop once, the way a page binds its
/// listeners once on load. The returned handle is what the embedding
/// form feeds selection changes into.
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
///
/// Returns an error if the logging subscriber was already installed or
/// the HTTP client cannot be built.
pub fn start_synchronizer(config: SyncConfig) -> Result<SyncHandle> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = HttpAvailabilityClient::new(&config)?;
    let synchronizer = SlotSynchronizer::new(source, TimeControl::new());

    info!("Synchronizing time slots against {}", config.endpoint_url());
    Ok(synchronizer.bind())
}
