//! optbench Core Library
//!
//! Everything between the user's keystrokes and the backend wire format:
//!
//! - [`catalog`]: reference data fetched from the backend (algorithms,
//!   fitness functions, loaded plugins)
//! - [`form`]: editable state of the single- and multi-algorithm test forms
//! - [`validation`]: pure `validate_*` functions producing field errors and
//!   the submit verdict
//! - [`request`]: wire payloads and the builders that assemble them
//!
//! Nothing in this crate performs I/O; the HTTP gateway and the sessions
//! that drive it live in `optbench-client`.

pub mod catalog;
pub mod error;
pub mod form;
pub mod obs;
pub mod request;
pub mod telemetry;
pub mod validation;

pub use catalog::{
    AlgorithmDescriptor, FitnessFunctionDescriptor, ParameterSpec, PluginAlgorithm,
    PluginBundle, ReferenceData,
};
pub use error::{FormError, Result};
pub use form::{
    BoundSide, DomainBound, DomainSpec, MultiTestForm, ParameterField, ParameterSelection,
    RunConfig, RunField, SingleTestForm,
};
pub use obs::{
    emit_catalog_loaded, emit_gateway_fallback, emit_submission_blocked, emit_submission_failed,
    emit_submission_sent, SessionSpan, TestKind,
};
pub use request::{
    build_multi_request, build_single_request, MultiAlgorithmTestRequest,
    SingleAlgorithmTestRequest,
};
pub use telemetry::{init_tracing, LogFormat};
pub use validation::{validate_multi, validate_single, FieldId, ValidationReport};

/// optbench version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
