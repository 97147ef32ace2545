//! optbench-client: talking to the benchmark backend
//!
//! This crate provides the I/O half of optbench:
//!
//! - [`BackendGateway`]: async trait with one method per REST endpoint
//! - [`HttpGateway`]: reqwest implementation of the gateway
//! - [`fakes::MemoryGateway`]: in-memory backend for tests
//! - [`session`]: view-scoped state owners that validate forms, call the
//!   gateway and mask transport failures behind empty values

pub mod config;
pub mod error;
pub mod fakes;
pub mod gateway;
pub mod http;
pub mod session;

pub use config::{GatewayConfig, DEFAULT_BACKEND_URL};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{BackendGateway, RunCommand};
pub use http::HttpGateway;
pub use session::multi::MultiTestSession;
pub use session::plugins::PluginManager;
pub use session::reports::ReportBrowser;
pub use session::run_control::RunControl;
pub use session::single::SingleTestSession;
pub use session::SubmitOutcome;
