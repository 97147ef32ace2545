//! Calculation status and stop/resume control.

use std::sync::Arc;

use tracing::info;

use super::or_fallback;
use crate::gateway::{BackendGateway, RunCommand};

/// Tracks the backend's calculation state as last reported.
pub struct RunControl {
    gateway: Arc<dyn BackendGateway>,
    status: String,
}

impl RunControl {
    /// Control with no status fetched yet.
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            gateway,
            status: String::new(),
        }
    }

    /// Query the current status.
    pub async fn open(gateway: Arc<dyn BackendGateway>) -> Self {
        let mut control = Self::new(gateway);
        control.refresh().await;
        control
    }

    /// Last known status; empty when the backend could not be reached.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub async fn refresh(&mut self) -> &str {
        self.send(RunCommand::Result).await
    }

    pub async fn stop(&mut self) -> &str {
        self.send(RunCommand::Stop).await
    }

    pub async fn resume(&mut self) -> &str {
        self.send(RunCommand::Resume).await
    }

    async fn send(&mut self, command: RunCommand) -> &str {
        let result = self.gateway.run_command(command).await;
        self.status = or_fallback(command.as_str(), result, String::new());
        info!(command = %command, status = %self.status, "run control");
        &self.status
    }
}
