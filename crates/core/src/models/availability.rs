use serde::{Deserialize, Serialize};

/// JSON body returned by the availability endpoint.
///
/// The slot order is chosen by the server and must be preserved all the
/// way into the time control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTimeResponse {
    pub available_time: Vec<String>,
}
