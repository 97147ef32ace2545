//! View-scoped sessions.
//!
//! Each session owns the state one screen of the console needs: its
//! reference data (fetched once in `open`), its form, and the validation
//! report recomputed after every edit. Gateway failures never escape a
//! session; they are logged and replaced by an empty value so the caller
//! stays interactive.
//!
//! # Modules
//!
//! - [`single`]      - `SingleTestSession`: one algorithm, many fitness functions
//! - [`multi`]       - `MultiTestSession`: many algorithms, one fitness function
//! - [`run_control`] - `RunControl`: status / stop / resume
//! - [`reports`]     - `ReportBrowser`: list, download, delete reports
//! - [`plugins`]     - `PluginManager`: list, upload, delete plugin libraries

pub mod multi;
pub mod plugins;
pub mod reports;
pub mod run_control;
pub mod single;

use optbench_core::{emit_catalog_loaded, emit_gateway_fallback, ReferenceData};

use crate::error::GatewayResult;
use crate::gateway::BackendGateway;

/// What happened when a form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form had field errors; nothing was sent.
    Blocked,
    /// The backend accepted the request and the form was reset.
    Sent,
    /// The request could not be delivered; the form is kept for a retry.
    Failed,
}

/// Unwrap a gateway result, logging the error and substituting `fallback`.
pub(crate) fn or_fallback<T>(operation: &str, result: GatewayResult<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            emit_gateway_fallback(operation, &err);
            fallback
        }
    }
}

/// Fetch both catalogs concurrently; a failed fetch yields an empty catalog.
pub(crate) async fn load_reference(gateway: &dyn BackendGateway) -> ReferenceData {
    let (algorithms, functions) =
        futures::join!(gateway.algorithms(), gateway.fitness_functions());
    let reference = ReferenceData::new(
        or_fallback("algorithms", algorithms, Vec::new()),
        or_fallback("fitness_functions", functions, Vec::new()),
    );
    emit_catalog_loaded(reference.algorithms.len(), reference.functions.len());
    reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::fakes::MemoryGateway;
    use optbench_core::AlgorithmDescriptor;

    #[test]
    fn test_or_fallback_passes_through_ok() {
        assert_eq!(or_fallback("op", Ok(3), 0), 3);
    }

    #[test]
    fn test_or_fallback_substitutes_on_error() {
        let result: GatewayResult<Vec<String>> = Err(GatewayError::Http("refused".into()));
        assert!(or_fallback("op", result, Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_load_reference_masks_outage() {
        let gw = MemoryGateway::new()
            .with_algorithm(AlgorithmDescriptor::new("PSO"))
            .with_function("Sphere");
        let reference = load_reference(&gw).await;
        assert_eq!(reference.algorithms.len(), 1);
        assert_eq!(reference.functions.len(), 1);

        gw.set_offline(true);
        assert_eq!(load_reference(&gw).await, ReferenceData::default());
    }
}
