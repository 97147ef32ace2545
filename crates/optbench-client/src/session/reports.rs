//! Browsing, downloading and deleting generated reports.

use std::sync::Arc;

use tracing::info;

use super::or_fallback;
use crate::gateway::BackendGateway;

/// List of report names as last fetched from the backend.
pub struct ReportBrowser {
    gateway: Arc<dyn BackendGateway>,
    reports: Vec<String>,
}

impl ReportBrowser {
    pub async fn open(gateway: Arc<dyn BackendGateway>) -> Self {
        let mut browser = Self {
            gateway,
            reports: Vec::new(),
        };
        browser.refresh().await;
        browser
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    pub async fn refresh(&mut self) -> &[String] {
        let result = self.gateway.reports().await;
        self.reports = or_fallback("reports", result, Vec::new());
        &self.reports
    }

    /// Fetch the zip archive of `name`; `None` if it could not be fetched.
    pub async fn download(&self, name: &str) -> Option<Vec<u8>> {
        let result = self.gateway.report_archive(name).await.map(Some);
        or_fallback("report_archive", result, None)
    }

    /// Delete `name` on the backend.
    ///
    /// The entry disappears from [`reports`](Self::reports) only when the
    /// backend confirms the deletion.
    pub async fn delete(&mut self, name: &str) -> bool {
        let result = self.gateway.delete_report(name).await.map(|_| true);
        let deleted = or_fallback("delete_report", result, false);
        if deleted {
            self.reports.retain(|r| r != name);
            info!(report = name, "report deleted");
        }
        deleted
    }
}
