//! HTTP client for the status service.
//!
//! Every call here is total over the failure domain: transport and parse
//! errors are logged, then collapsed into sentinel values so a flaky or
//! unreachable backend can never take the dashboard down with it. No
//! retries, no backoff; the next tick simply tries again.

use tracing::warn;

use crate::types::{Activity, SyncOutcome, SystemStatus};

pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /api/system. Sentinel `{offline, "Never"}` on any failure.
    pub async fn system_status(&self) -> SystemStatus {
        match self.get_json::<SystemStatus>("/api/system").await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "system status fetch failed");
                SystemStatus::offline()
            }
        }
    }

    /// GET /api/activities. Empty list on any failure; server order kept.
    pub async fn activities(&self) -> Vec<Activity> {
        match self.get_json::<Vec<Activity>>("/api/activities").await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "activities fetch failed");
                Vec::new()
            }
        }
    }

    /// POST /api/sync. Transport failures come back as `success: false`
    /// with the error message attached.
    pub async fn sync_now(&self) -> SyncOutcome {
        let url = format!("{}/api/sync", self.base_url);
        let res = async {
            self.http
                .post(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<SyncOutcome>()
                .await
        }
        .await;
        match res {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "sync request failed");
                SyncOutcome::failed(e.to_string())
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, reqwest::Error> {
        let url = format!("{}{path}", self.base_url);
        self.http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }
}
