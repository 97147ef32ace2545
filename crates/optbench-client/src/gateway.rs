//! Backend gateway trait.
//!
//! One method per backend endpoint. Implementations report failures as
//! [`GatewayError`](crate::GatewayError); deciding what to show instead is
//! left to the sessions. An in-memory implementation is provided for
//! testing via the [`fakes`](crate::fakes) module.

use std::fmt;

use async_trait::async_trait;
use optbench_core::{
    AlgorithmDescriptor, FitnessFunctionDescriptor, MultiAlgorithmTestRequest, PluginBundle,
    SingleAlgorithmTestRequest,
};

use crate::error::GatewayResult;

/// Run-control command, sent as the last path segment of
/// `/calculationprocessor/{command}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCommand {
    /// Query the current calculation state
    Result,
    Stop,
    Resume,
}

impl RunCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunCommand::Result => "result",
            RunCommand::Stop => "stop",
            RunCommand::Resume => "resume",
        }
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The benchmark backend's REST surface.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// `GET /algorithms`
    async fn algorithms(&self) -> GatewayResult<Vec<AlgorithmDescriptor>>;

    /// `GET /testfunctions`
    async fn fitness_functions(&self) -> GatewayResult<Vec<FitnessFunctionDescriptor>>;

    /// Queue a single-algorithm test. Returns the backend's response text.
    async fn submit_single(&self, request: &SingleAlgorithmTestRequest) -> GatewayResult<String>;

    /// Queue a multi-algorithm test. Returns the backend's response text.
    async fn submit_multi(&self, request: &MultiAlgorithmTestRequest) -> GatewayResult<String>;

    /// Send a run-control command and return the plain-text status.
    async fn run_command(&self, command: RunCommand) -> GatewayResult<String>;

    /// Names of the generated reports.
    async fn reports(&self) -> GatewayResult<Vec<String>>;

    /// Zip archive of one report.
    async fn report_archive(&self, name: &str) -> GatewayResult<Vec<u8>>;

    async fn delete_report(&self, name: &str) -> GatewayResult<()>;

    /// Plugin libraries currently loaded by the backend.
    async fn plugins(&self) -> GatewayResult<Vec<PluginBundle>>;

    async fn upload_plugin(&self, file_name: &str, contents: Vec<u8>) -> GatewayResult<()>;

    async fn delete_plugin(&self, file_name: &str) -> GatewayResult<()>;
}
