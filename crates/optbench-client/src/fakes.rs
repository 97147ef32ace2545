//! In-memory backend (testing only)
//!
//! `MemoryGateway` satisfies the [`BackendGateway`] contract without a
//! network: catalogs, reports and plugins live in a `Mutex`, submissions
//! are recorded for inspection, and `set_offline(true)` turns every call
//! into a transport error.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use optbench_core::{
    AlgorithmDescriptor, FitnessFunctionDescriptor, MultiAlgorithmTestRequest, PluginBundle,
    SingleAlgorithmTestRequest,
};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{BackendGateway, RunCommand};

pub const STATUS_IDLE: &str = "idle";
pub const STATUS_RUNNING: &str = "running";
pub const STATUS_STOPPED: &str = "stopped";

#[derive(Debug)]
struct BackendState {
    algorithms: Vec<AlgorithmDescriptor>,
    functions: Vec<FitnessFunctionDescriptor>,
    reports: BTreeMap<String, Vec<u8>>,
    plugins: Vec<PluginBundle>,
    status: String,
    commands: Vec<RunCommand>,
    single_requests: Vec<SingleAlgorithmTestRequest>,
    multi_requests: Vec<MultiAlgorithmTestRequest>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            algorithms: Vec::new(),
            functions: Vec::new(),
            reports: BTreeMap::new(),
            plugins: Vec::new(),
            status: STATUS_IDLE.to_string(),
            commands: Vec::new(),
            single_requests: Vec::new(),
            multi_requests: Vec::new(),
        }
    }
}

/// In-memory benchmark backend.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<BackendState>,
    offline: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(self, algorithm: AlgorithmDescriptor) -> Self {
        self.state.lock().unwrap().algorithms.push(algorithm);
        self
    }

    pub fn with_function(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .functions
            .push(FitnessFunctionDescriptor::new(name));
        self
    }

    pub fn with_report(self, name: &str, archive: &[u8]) -> Self {
        self.state
            .lock()
            .unwrap()
            .reports
            .insert(name.to_string(), archive.to_vec());
        self
    }

    pub fn with_plugin(self, plugin: PluginBundle) -> Self {
        self.state.lock().unwrap().plugins.push(plugin);
        self
    }

    /// Simulate an unreachable backend.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn single_requests(&self) -> Vec<SingleAlgorithmTestRequest> {
        self.state.lock().unwrap().single_requests.clone()
    }

    pub fn multi_requests(&self) -> Vec<MultiAlgorithmTestRequest> {
        self.state.lock().unwrap().multi_requests.clone()
    }

    /// Run-control commands received, oldest first.
    pub fn run_commands(&self) -> Vec<RunCommand> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn report_names(&self) -> Vec<String> {
        self.state.lock().unwrap().reports.keys().cloned().collect()
    }

    fn online(&self) -> GatewayResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(GatewayError::Http("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn not_found(what: &str) -> GatewayError {
    GatewayError::Status {
        status: 404,
        body: format!("{what} not found"),
    }
}

#[async_trait]
impl BackendGateway for MemoryGateway {
    async fn algorithms(&self) -> GatewayResult<Vec<AlgorithmDescriptor>> {
        self.online()?;
        Ok(self.state.lock().unwrap().algorithms.clone())
    }

    async fn fitness_functions(&self) -> GatewayResult<Vec<FitnessFunctionDescriptor>> {
        self.online()?;
        Ok(self.state.lock().unwrap().functions.clone())
    }

    async fn submit_single(&self, request: &SingleAlgorithmTestRequest) -> GatewayResult<String> {
        self.online()?;
        let mut state = self.state.lock().unwrap();
        state.single_requests.push(request.clone());
        state.status = STATUS_RUNNING.to_string();
        Ok(format!("queued {}", request.algorithm_name))
    }

    async fn submit_multi(&self, request: &MultiAlgorithmTestRequest) -> GatewayResult<String> {
        self.online()?;
        let mut state = self.state.lock().unwrap();
        state.multi_requests.push(request.clone());
        state.status = STATUS_RUNNING.to_string();
        Ok(format!("queued {}", request.test_function_name))
    }

    async fn run_command(&self, command: RunCommand) -> GatewayResult<String> {
        self.online()?;
        let mut state = self.state.lock().unwrap();
        state.commands.push(command);
        match command {
            RunCommand::Result => {}
            RunCommand::Stop => state.status = STATUS_STOPPED.to_string(),
            RunCommand::Resume => state.status = STATUS_RUNNING.to_string(),
        }
        Ok(state.status.clone())
    }

    async fn reports(&self) -> GatewayResult<Vec<String>> {
        self.online()?;
        Ok(self.report_names())
    }

    async fn report_archive(&self, name: &str) -> GatewayResult<Vec<u8>> {
        self.online()?;
        let state = self.state.lock().unwrap();
        state
            .reports
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("report"))
    }

    async fn delete_report(&self, name: &str) -> GatewayResult<()> {
        self.online()?;
        let mut state = self.state.lock().unwrap();
        state
            .reports
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found("report"))
    }

    async fn plugins(&self) -> GatewayResult<Vec<PluginBundle>> {
        self.online()?;
        Ok(self.state.lock().unwrap().plugins.clone())
    }

    async fn upload_plugin(&self, file_name: &str, contents: Vec<u8>) -> GatewayResult<()> {
        self.online()?;
        if contents.is_empty() {
            return Err(GatewayError::Status {
                status: 400,
                body: "empty file".to_string(),
            });
        }
        let mut state = self.state.lock().unwrap();
        state.plugins.retain(|p| p.file_name != file_name);
        state.plugins.push(PluginBundle::new(file_name));
        Ok(())
    }

    async fn delete_plugin(&self, file_name: &str) -> GatewayResult<()> {
        self.online()?;
        let mut state = self.state.lock().unwrap();
        let before = state.plugins.len();
        state.plugins.retain(|p| p.file_name != file_name);
        if state.plugins.len() == before {
            return Err(not_found("plugin"));
        }
        Ok(())
    }
}
