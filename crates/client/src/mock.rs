use async_trait::async_trait;
use mockall::mock;

use slotsync_core::errors::SyncResult;
use slotsync_core::models::selection::Selection;

use crate::endpoint::AvailabilitySource;

// Mock availability source for testing
mock! {
    pub AvailabilitySource {}

    #[async_trait]
    impl AvailabilitySource for AvailabilitySource {
        async fn available_time(&self, selection: &Selection) -> SyncResult<Vec<String>>;
    }
}
