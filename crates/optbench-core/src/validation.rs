//! Form validation engine.
//!
//! [`validate_single`] and [`validate_multi`] map a form plus the catalogs
//! it refers to onto a [`ValidationReport`]: one message per failing field
//! and the submit verdict. Both are pure and cheap, so callers re-run them
//! after every edit instead of patching individual errors.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{ParameterSpec, ReferenceData};
use crate::form::{
    BoundSide, DomainBound, DomainSpec, MultiTestForm, ParameterSelection, RunConfig,
    SingleTestForm,
};

pub const SELECT_ALGORITHM: &str = "select an algorithm";
pub const SELECT_ALGORITHMS: &str = "select at least one algorithm";
pub const SELECT_FUNCTION: &str = "select a fitness function";
pub const SELECT_FUNCTIONS: &str = "select at least one fitness function";
pub const DIMENSION_REQUIRED: &str = "dimension must be greater than 0";
pub const DOMAIN_UNSET: &str = "domain bounds not set";
pub const LOWER_ABOVE_UPPER: &str = "lower bound must not exceed upper bound";
pub const UPPER_BELOW_LOWER: &str = "upper bound must not be below lower bound";
pub const NOT_FINITE: &str = "value must be a finite number";
pub const PARAMETER_UNSET: &str = "parameter not configured";
pub const STEP_OUT_OF_RANGE: &str = "step must be greater than 0 and at most the upper bound";
pub const RUN_UNSET: &str = "run settings not configured";
pub const POPULATION_REQUIRED: &str = "population must be greater than 0";
pub const ITERATIONS_REQUIRED: &str = "iterations must be greater than 0";

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Identifies the input a validation message belongs to.
///
/// Indexed variants point at the n-th domain entry, parameter row or
/// chosen-algorithm row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Algorithm,
    Algorithms,
    Function,
    Functions,
    Dimension,
    DomainEntry(usize),
    DomainLower(usize),
    DomainUpper(usize),
    Parameter(usize),
    ParameterLower(usize),
    ParameterUpper(usize),
    ParameterStep(usize),
    Run(usize),
    RunPopulation(usize),
    RunIterations(usize),
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Algorithm => write!(f, "algorithm"),
            FieldId::Algorithms => write!(f, "algorithms"),
            FieldId::Function => write!(f, "function"),
            FieldId::Functions => write!(f, "functions"),
            FieldId::Dimension => write!(f, "dimension"),
            FieldId::DomainEntry(i) => write!(f, "domain[{i}]"),
            FieldId::DomainLower(i) => write!(f, "domain[{i}].lower"),
            FieldId::DomainUpper(i) => write!(f, "domain[{i}].upper"),
            FieldId::Parameter(i) => write!(f, "parameters[{i}]"),
            FieldId::ParameterLower(i) => write!(f, "parameters[{i}].lower"),
            FieldId::ParameterUpper(i) => write!(f, "parameters[{i}].upper"),
            FieldId::ParameterStep(i) => write!(f, "parameters[{i}].step"),
            FieldId::Run(i) => write!(f, "runs[{i}]"),
            FieldId::RunPopulation(i) => write!(f, "runs[{i}].population"),
            FieldId::RunIterations(i) => write!(f, "runs[{i}].iterations"),
        }
    }
}

/// Outcome of validating a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    field_errors: BTreeMap<FieldId, String>,
}

impl ValidationReport {
    fn add(&mut self, field: FieldId, message: impl Into<String>) {
        self.field_errors.insert(field, message.into());
    }

    /// Whether the form may be submitted (i.e., there are no field errors).
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Message shown next to `field`, if it failed.
    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    /// All failing fields in display order.
    pub fn errors(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.field_errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Validate the single-algorithm form against the fetched catalogs.
pub fn validate_single(form: &SingleTestForm, reference: &ReferenceData) -> ValidationReport {
    let mut report = ValidationReport::default();

    match form.algorithm() {
        None => report.add(FieldId::Algorithm, SELECT_ALGORITHM),
        Some(name) => match reference.algorithm(name) {
            None => report.add(FieldId::Algorithm, format!("unknown algorithm: {name}")),
            Some(alg) => {
                for (index, spec) in alg.params_info.iter().enumerate() {
                    let selection = form.parameters().get(index).copied().unwrap_or_default();
                    check_parameter(&mut report, index, spec, &selection);
                }
            }
        },
    }

    check_domain(&mut report, form.domain());

    if form.functions().is_empty() {
        report.add(FieldId::Functions, SELECT_FUNCTIONS);
    } else if let Some(unknown) = form.functions().iter().find(|f| !reference.has_function(f)) {
        report.add(
            FieldId::Functions,
            format!("unknown fitness function: {unknown}"),
        );
    }

    report
}

/// Validate the multi-algorithm form against the fetched catalogs.
pub fn validate_multi(form: &MultiTestForm, reference: &ReferenceData) -> ValidationReport {
    let mut report = ValidationReport::default();

    match form.function() {
        None => report.add(FieldId::Function, SELECT_FUNCTION),
        Some(name) if !reference.has_function(name) => {
            report.add(FieldId::Function, format!("unknown fitness function: {name}"))
        }
        Some(_) => {}
    }

    if form.algorithms().is_empty() {
        report.add(FieldId::Algorithms, SELECT_ALGORITHMS);
    } else if let Some(unknown) = form
        .algorithms()
        .iter()
        .find(|name| reference.algorithm(name).is_none())
    {
        report.add(FieldId::Algorithms, format!("unknown algorithm: {unknown}"));
    }

    for index in 0..form.algorithms().len() {
        let run = form.runs().get(index).copied().unwrap_or_default();
        check_run(&mut report, index, &run);
    }

    check_domain(&mut report, form.domain());

    report
}

fn check_domain(report: &mut ValidationReport, domain: &DomainSpec) {
    if domain.dimension() == 0 {
        report.add(FieldId::Dimension, DIMENSION_REQUIRED);
        return;
    }
    for (index, bound) in domain.bounds().iter().enumerate() {
        check_domain_bound(report, index, bound);
    }
}

fn check_domain_bound(report: &mut ValidationReport, index: usize, bound: &DomainBound) {
    if bound.is_unset() {
        report.add(FieldId::DomainEntry(index), DOMAIN_UNSET);
        return;
    }
    let lower_finite = bound.lower.is_finite();
    let upper_finite = bound.upper.is_finite();
    if !lower_finite {
        report.add(FieldId::DomainLower(index), NOT_FINITE);
    }
    if !upper_finite {
        report.add(FieldId::DomainUpper(index), NOT_FINITE);
    }
    if lower_finite && upper_finite && !bound.is_ordered() {
        match bound.last_edited() {
            Some(BoundSide::Upper) => report.add(FieldId::DomainUpper(index), UPPER_BELOW_LOWER),
            _ => report.add(FieldId::DomainLower(index), LOWER_ABOVE_UPPER),
        }
    }
}

fn check_parameter(
    report: &mut ValidationReport,
    index: usize,
    spec: &ParameterSpec,
    selection: &ParameterSelection,
) {
    if selection.is_unset() {
        report.add(FieldId::Parameter(index), PARAMETER_UNSET);
        return;
    }
    let range = format!("[{}, {}]", spec.lower_boundary, spec.upper_boundary);
    if !selection.lower.is_finite() {
        report.add(FieldId::ParameterLower(index), NOT_FINITE);
    } else if !spec.contains(selection.lower) {
        report.add(
            FieldId::ParameterLower(index),
            format!("lower bound must be within {range}"),
        );
    }
    if !selection.upper.is_finite() {
        report.add(FieldId::ParameterUpper(index), NOT_FINITE);
    } else if !spec.contains(selection.upper) {
        report.add(
            FieldId::ParameterUpper(index),
            format!("upper bound must be within {range}"),
        );
    }
    if !selection.step.is_finite() {
        report.add(FieldId::ParameterStep(index), NOT_FINITE);
    } else if !(selection.step > 0.0 && selection.step <= selection.upper) {
        report.add(FieldId::ParameterStep(index), STEP_OUT_OF_RANGE);
    }
}

fn check_run(report: &mut ValidationReport, index: usize, run: &RunConfig) {
    if run.is_unset() {
        report.add(FieldId::Run(index), RUN_UNSET);
        return;
    }
    if run.population == 0 {
        report.add(FieldId::RunPopulation(index), POPULATION_REQUIRED);
    }
    if run.iterations == 0 {
        report.add(FieldId::RunIterations(index), ITERATIONS_REQUIRED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AlgorithmDescriptor, FitnessFunctionDescriptor};
    use crate::form::{ParameterField, RunField};

    fn reference() -> ReferenceData {
        ReferenceData::new(
            vec![
                AlgorithmDescriptor::new("PSO").with_parameter(ParameterSpec::new("w", 0.0, 10.0)),
                AlgorithmDescriptor::new("GWO"),
            ],
            vec![
                FitnessFunctionDescriptor::new("Sphere"),
                FitnessFunctionDescriptor::new("Rastrigin"),
            ],
        )
    }

    fn filled_domain(form: &mut SingleTestForm) {
        form.set_dimension(1);
        form.set_domain_bound(0, BoundSide::Lower, -1.0);
        form.set_domain_bound(0, BoundSide::Upper, 1.0);
    }

    #[test]
    fn test_empty_single_form_reports_required_fields() {
        let report = validate_single(&SingleTestForm::new(), &reference());
        assert!(!report.is_valid());
        assert_eq!(report.error(FieldId::Algorithm), Some(SELECT_ALGORITHM));
        assert_eq!(report.error(FieldId::Dimension), Some(DIMENSION_REQUIRED));
        assert_eq!(report.error(FieldId::Functions), Some(SELECT_FUNCTIONS));
        assert_eq!(report.error_count(), 3);
    }

    #[test]
    fn test_unset_domain_entry_blocks() {
        let mut form = SingleTestForm::new();
        form.set_dimension(2);
        form.set_domain_bound(0, BoundSide::Lower, -1.0);

        let report = validate_single(&form, &reference());
        assert_eq!(report.error(FieldId::DomainEntry(0)), None);
        assert_eq!(report.error(FieldId::DomainEntry(1)), Some(DOMAIN_UNSET));
    }

    #[test]
    fn test_inverted_domain_flags_edited_side() {
        let mut form = SingleTestForm::new();
        form.set_dimension(2);
        form.set_domain_bound(0, BoundSide::Upper, 5.0);
        form.set_domain_bound(0, BoundSide::Lower, 6.0);
        form.set_domain_bound(1, BoundSide::Lower, 3.0);
        form.set_domain_bound(1, BoundSide::Upper, 2.0);

        let report = validate_single(&form, &reference());
        assert_eq!(report.error(FieldId::DomainLower(0)), Some(LOWER_ABOVE_UPPER));
        assert_eq!(report.error(FieldId::DomainUpper(0)), None);
        assert_eq!(report.error(FieldId::DomainUpper(1)), Some(UPPER_BELOW_LOWER));
        assert_eq!(report.error(FieldId::DomainLower(1)), None);
    }

    #[test]
    fn test_parameter_bounds_checked_per_side() {
        let reference = reference();
        let mut form = SingleTestForm::new();
        form.select_algorithm(reference.algorithm("PSO"));
        form.set_parameter(0, ParameterField::Lower, -1.0);
        form.set_parameter(0, ParameterField::Upper, 11.0);
        form.set_parameter(0, ParameterField::Step, 1.0);

        let report = validate_single(&form, &reference);
        assert_eq!(
            report.error(FieldId::ParameterLower(0)),
            Some("lower bound must be within [0, 10]")
        );
        assert_eq!(
            report.error(FieldId::ParameterUpper(0)),
            Some("upper bound must be within [0, 10]")
        );
        assert_eq!(report.error(FieldId::ParameterStep(0)), None);
    }

    #[test]
    fn test_step_must_be_positive_and_not_above_upper() {
        let reference = reference();
        let mut form = SingleTestForm::new();
        form.select_algorithm(reference.algorithm("PSO"));
        form.set_parameter(0, ParameterField::Lower, 1.0);
        form.set_parameter(0, ParameterField::Upper, 4.0);

        for (step, ok) in [(0.0, false), (-1.0, false), (4.0, true), (4.5, false), (0.5, true)] {
            form.set_parameter(0, ParameterField::Step, step);
            let report = validate_single(&form, &reference);
            assert_eq!(
                report.error(FieldId::ParameterStep(0)).is_none(),
                ok,
                "step {step}"
            );
        }
    }

    #[test]
    fn test_all_zero_parameter_is_unconfigured() {
        let reference = reference();
        let mut form = SingleTestForm::new();
        form.select_algorithm(reference.algorithm("PSO"));

        let report = validate_single(&form, &reference);
        assert_eq!(report.error(FieldId::Parameter(0)), Some(PARAMETER_UNSET));
        assert_eq!(report.error(FieldId::ParameterStep(0)), None);
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        let mut form = SingleTestForm::new();
        form.select_algorithm(Some(&AlgorithmDescriptor::new("Bat")));
        form.set_function_checked("Ackley", true);

        let report = validate_single(&form, &reference());
        assert_eq!(report.error(FieldId::Algorithm), Some("unknown algorithm: Bat"));
        assert_eq!(
            report.error(FieldId::Functions),
            Some("unknown fitness function: Ackley")
        );
    }

    #[test]
    fn test_valid_single_form() {
        let reference = reference();
        let mut form = SingleTestForm::new();
        form.select_algorithm(reference.algorithm("GWO"));
        filled_domain(&mut form);
        form.set_function_checked("Rastrigin", true);

        let report = validate_single(&form, &reference);
        assert!(report.is_valid(), "{:?}", report);
    }

    #[test]
    fn test_multi_form_rules() {
        let mut form = MultiTestForm::new();
        let report = validate_multi(&form, &reference());
        assert_eq!(report.error(FieldId::Function), Some(SELECT_FUNCTION));
        assert_eq!(report.error(FieldId::Algorithms), Some(SELECT_ALGORITHMS));
        assert_eq!(report.error(FieldId::Dimension), Some(DIMENSION_REQUIRED));

        form.select_function(Some("Sphere"));
        form.set_algorithm_checked("PSO", true);
        form.set_algorithm_checked("GWO", true);
        form.set_dimension(1);
        form.set_domain_bound(0, BoundSide::Lower, -3.0);
        form.set_domain_bound(0, BoundSide::Upper, 3.0);
        form.set_run_config(1, RunField::Population, 20);

        let report = validate_multi(&form, &reference());
        assert_eq!(report.error(FieldId::Run(0)), Some(RUN_UNSET));
        assert_eq!(
            report.error(FieldId::RunIterations(1)),
            Some(ITERATIONS_REQUIRED)
        );
        assert_eq!(report.error(FieldId::RunPopulation(1)), None);

        form.set_run_config(0, RunField::Population, 10);
        form.set_run_config(0, RunField::Iterations, 50);
        form.set_run_config(1, RunField::Iterations, 50);
        assert!(validate_multi(&form, &reference()).is_valid());
    }

    #[test]
    fn test_infinite_domain_bounds_are_rejected() {
        let reference = reference();
        let mut form = SingleTestForm::new();
        form.select_algorithm(reference.algorithm("GWO"));
        form.set_function_checked("Sphere", true);
        form.set_dimension(2);
        form.set_domain_bound(0, BoundSide::Lower, f64::NEG_INFINITY);
        form.set_domain_bound(0, BoundSide::Upper, f64::INFINITY);
        form.set_domain_bound(1, BoundSide::Lower, -1.0);
        form.set_domain_bound(1, BoundSide::Upper, f64::NAN);

        let report = validate_single(&form, &reference);
        assert!(!report.is_valid());
        assert_eq!(report.error(FieldId::DomainLower(0)), Some(NOT_FINITE));
        assert_eq!(report.error(FieldId::DomainUpper(0)), Some(NOT_FINITE));
        assert_eq!(report.error(FieldId::DomainLower(1)), None);
        assert_eq!(report.error(FieldId::DomainUpper(1)), Some(NOT_FINITE));
    }

    #[test]
    fn test_infinite_parameter_values_are_rejected() {
        let reference = ReferenceData::new(
            vec![AlgorithmDescriptor::new("Open")
                .with_parameter(ParameterSpec::new("x", f64::NEG_INFINITY, f64::INFINITY))],
            vec![FitnessFunctionDescriptor::new("Sphere")],
        );
        let mut form = SingleTestForm::new();
        form.select_algorithm(reference.algorithm("Open"));
        form.set_parameter(0, ParameterField::Lower, f64::NEG_INFINITY);
        form.set_parameter(0, ParameterField::Upper, f64::INFINITY);
        form.set_parameter(0, ParameterField::Step, f64::INFINITY);

        let report = validate_single(&form, &reference);
        assert_eq!(report.error(FieldId::ParameterLower(0)), Some(NOT_FINITE));
        assert_eq!(report.error(FieldId::ParameterUpper(0)), Some(NOT_FINITE));
        assert_eq!(report.error(FieldId::ParameterStep(0)), Some(NOT_FINITE));
    }

    #[test]
    fn test_multi_rejects_unknown_names() {
        let mut form = MultiTestForm::new();
        form.select_function(Some("Ackley"));
        form.set_algorithm_checked("PSO", true);
        form.set_algorithm_checked("Bat", true);

        let report = validate_multi(&form, &reference());
        assert_eq!(
            report.error(FieldId::Function),
            Some("unknown fitness function: Ackley")
        );
        assert_eq!(report.error(FieldId::Algorithms), Some("unknown algorithm: Bat"));
    }

    #[test]
    fn test_field_id_display() {
        assert_eq!(FieldId::DomainLower(2).to_string(), "domain[2].lower");
        assert_eq!(FieldId::RunIterations(0).to_string(), "runs[0].iterations");
        assert_eq!(FieldId::Algorithm.to_string(), "algorithm");
    }
}
