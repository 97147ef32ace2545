//! Session behind the multi-algorithm comparison screen.

use std::sync::Arc;

use optbench_core::{
    build_multi_request, emit_submission_blocked, emit_submission_failed, emit_submission_sent,
    validate_multi, BoundSide, MultiTestForm, ReferenceData, RunField, TestKind,
    ValidationReport,
};
use tracing::warn;

use super::{load_reference, SubmitOutcome};
use crate::gateway::BackendGateway;

/// Several algorithms compared on one fitness function.
pub struct MultiTestSession {
    gateway: Arc<dyn BackendGateway>,
    reference: ReferenceData,
    form: MultiTestForm,
    report: ValidationReport,
}

impl MultiTestSession {
    pub async fn open(gateway: Arc<dyn BackendGateway>) -> Self {
        let reference = load_reference(gateway.as_ref()).await;
        Self::with_reference(gateway, reference)
    }

    pub fn with_reference(gateway: Arc<dyn BackendGateway>, reference: ReferenceData) -> Self {
        let form = MultiTestForm::new();
        let report = validate_multi(&form, &reference);
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

    pub fn form(&self) -> &MultiTestForm {
        &self.form
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn can_submit(&self) -> bool {
        self.report.is_valid()
    }

    /// Select a fitness function by name. Names missing from the catalog
    /// clear the selection.
    pub fn select_function(&mut self, name: Option<&str>) {
        let known = name.filter(|n| self.reference.has_function(n));
        self.form.select_function(known);
        self.revalidate();
    }

    /// Check or uncheck an algorithm; unknown names are ignored.
    pub fn set_algorithm_checked(&mut self, name: &str, checked: bool) {
        if checked && self.reference.algorithm(name).is_none() {
            warn!(algorithm = name, "ignoring algorithm missing from catalog");
            return;
        }
        self.form.set_algorithm_checked(name, checked);
        self.revalidate();
    }

    pub fn set_run_config(&mut self, index: usize, field: RunField, value: u32) -> bool {
        let applied = self.form.set_run_config(index, field, value);
        self.revalidate();
        applied
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

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.report.is_valid() {
            emit_submission_blocked(TestKind::Multi, self.report.error_count());
            return SubmitOutcome::Blocked;
        }
        let request = match build_multi_request(&self.form) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "validated form could not be assembled");
                return SubmitOutcome::Blocked;
            }
        };

        match self.gateway.submit_multi(&request).await {
            Ok(response) => {
                emit_submission_sent(TestKind::Multi, &request.test_function_name, &response);
                self.form.reset();
                self.revalidate();
                SubmitOutcome::Sent
            }
            Err(err) => {
                emit_submission_failed(TestKind::Multi, &err);
                SubmitOutcome::Failed
            }
        }
    }

    fn revalidate(&mut self) {
        self.report = validate_multi(&self.form, &self.reference);
    }
}
