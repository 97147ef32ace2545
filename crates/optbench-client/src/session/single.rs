//! Session behind the single-algorithm test screen.

use std::sync::Arc;

use optbench_core::{
    build_single_request, emit_submission_blocked, emit_submission_failed, emit_submission_sent,
    validate_single, BoundSide, ParameterField, ReferenceData, SingleTestForm, TestKind,
    ValidationReport,
};
use tracing::warn;

use super::{load_reference, SubmitOutcome};
use crate::gateway::BackendGateway;

/// One algorithm, swept over its parameters, run against many functions.
pub struct SingleTestSession {
    gateway: Arc<dyn BackendGateway>,
    reference: ReferenceData,
    form: SingleTestForm,
    report: ValidationReport,
}

impl SingleTestSession {
    /// Fetch the catalogs and start with an empty form.
    pub async fn open(gateway: Arc<dyn BackendGateway>) -> Self {
        let reference = load_reference(gateway.as_ref()).await;
        Self::with_reference(gateway, reference)
    }

    pub fn with_reference(gateway: Arc<dyn BackendGateway>, reference: ReferenceData) -> Self {
        let form = SingleTestForm::new();
        let report = validate_single(&form, &reference);
        Self {
            gateway,
            reference,
            form,
            report,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn form(&self) -> &SingleTestForm {
        &self.form
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn can_submit(&self) -> bool {
        self.report.is_valid()
    }

    /// Select an algorithm by name. Names missing from the catalog clear
    /// the selection.
    pub fn select_algorithm(&mut self, name: Option<&str>) {
        let algorithm = name.and_then(|n| self.reference.algorithm(n));
        self.form.select_algorithm(algorithm);
        self.revalidate();
    }

    pub fn set_dimension(&mut self, dimension: usize) {
        self.form.set_dimension(dimension);
        self.revalidate();
    }

    pub fn set_domain_bound(&mut self, index: usize, side: BoundSide, value: f64) -> bool {
        let applied = self.form.set_domain_bound(index, side, value);
        self.revalidate();
        applied
    }

    pub fn set_parameter(&mut self, index: usize, field: ParameterField, value: f64) -> bool {
        let applied = self.form.set_parameter(index, field, value);
        self.revalidate();
        applied
    }

    pub fn set_function_checked(&mut self, name: &str, checked: bool) {
        self.form.set_function_checked(name, checked);
        self.revalidate();
    }

    /// Send the test request once.
    ///
    /// The outcome is logged; a failed delivery does not add a field error.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.report.is_valid() {
            emit_submission_blocked(TestKind::Single, self.report.error_count());
            return SubmitOutcome::Blocked;
        }
        let request = match build_single_request(&self.form) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "validated form could not be assembled");
                return SubmitOutcome::Blocked;
            }
        };

        match self.gateway.submit_single(&request).await {
            Ok(response) => {
                emit_submission_sent(TestKind::Single, &request.algorithm_name, &response);
                self.form.reset();
                self.revalidate();
                SubmitOutcome::Sent
            }
            Err(err) => {
                emit_submission_failed(TestKind::Single, &err);
                SubmitOutcome::Failed
            }
        }
    }

    fn revalidate(&mut self) {
        self.report = validate_single(&self.form, &self.reference);
    }
}
