//! Single-algorithm test form: one algorithm swept over its parameters and
//! run against every chosen fitness function.

use crate::catalog::AlgorithmDescriptor;

use super::domain::{BoundSide, DomainSpec};
use super::toggle_selection;

/// Sweep range for one algorithm parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterSelection {
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
}

impl ParameterSelection {
    pub fn new(lower: f64, upper: f64, step: f64) -> Self {
        Self { lower, upper, step }
    }

    /// The all-zero triple marks a parameter the user has not filled in.
    pub fn is_unset(&self) -> bool {
        self.lower == 0.0 && self.upper == 0.0 && self.step == 0.0
    }

    pub fn to_wire(&self) -> [f64; 3] {
        [self.lower, self.upper, self.step]
    }
}

/// Component of a [`ParameterSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterField {
    Lower,
    Upper,
    Step,
}

/// State of the single-algorithm form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleTestForm {
    algorithm: Option<String>,
    parameters: Vec<ParameterSelection>,
    domain: DomainSpec,
    functions: Vec<String>,
}

impl SingleTestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    /// Select (or clear) the algorithm.
    ///
    /// Switching to a different algorithm replaces the parameter selections
    /// with one zero-filled entry per parameter spec. Re-selecting the
    /// current algorithm keeps what was entered.
    pub fn select_algorithm(&mut self, algorithm: Option<&AlgorithmDescriptor>) {
        match algorithm {
            Some(alg) if self.algorithm.as_deref() == Some(alg.name.as_str()) => {}
            Some(alg) => {
                self.algorithm = Some(alg.name.clone());
                self.parameters = vec![ParameterSelection::default(); alg.params_info.len()];
            }
            None => {
                self.algorithm = None;
                self.parameters.clear();
            }
        }
    }

    pub fn parameters(&self) -> &[ParameterSelection] {
        &self.parameters
    }

    pub fn set_parameter(&mut self, index: usize, field: ParameterField, value: f64) -> bool {
        let Some(selection) = self.parameters.get_mut(index) else {
            return false;
        };
        match field {
            ParameterField::Lower => selection.lower = value,
            ParameterField::Upper => selection.upper = value,
            ParameterField::Step => selection.step = value,
        }
        true
    }

    pub fn domain(&self) -> &DomainSpec {
        &self.domain
    }

    pub fn set_dimension(&mut self, dimension: usize) {
        self.domain.set_dimension(dimension);
    }

    pub fn set_domain_bound(&mut self, index: usize, side: BoundSide, value: f64) -> bool {
        self.domain.set_bound(index, side, value)
    }

    /// Chosen fitness functions, in the order they were checked.
    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    pub fn set_function_checked(&mut self, name: &str, checked: bool) -> bool {
        toggle_selection(&mut self.functions, name, checked)
    }

    /// Back to the empty state shown when the form first opens.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ParameterSpec;

    fn pso() -> AlgorithmDescriptor {
        AlgorithmDescriptor::new("PSO")
            .with_parameter(ParameterSpec::new("w", 0.0, 1.0))
            .with_parameter(ParameterSpec::new("c1", 0.0, 4.0))
    }

    #[test]
    fn test_selecting_algorithm_zero_fills_parameters() {
        let mut form = SingleTestForm::new();
        form.select_algorithm(Some(&pso()));

        assert_eq!(form.algorithm(), Some("PSO"));
        assert_eq!(form.parameters().len(), 2);
        assert!(form.parameters().iter().all(ParameterSelection::is_unset));
    }

    #[test]
    fn test_reselecting_same_algorithm_keeps_parameters() {
        let mut form = SingleTestForm::new();
        form.select_algorithm(Some(&pso()));
        form.set_parameter(0, ParameterField::Upper, 0.9);
        form.select_algorithm(Some(&pso()));

        assert_eq!(form.parameters()[0].upper, 0.9);
    }

    #[test]
    fn test_switching_algorithm_resets_parameters() {
        let mut form = SingleTestForm::new();
        form.select_algorithm(Some(&pso()));
        form.set_parameter(0, ParameterField::Upper, 0.9);

        let gwo = AlgorithmDescriptor::new("GWO").with_parameter(ParameterSpec::new("a", 0.0, 2.0));
        form.select_algorithm(Some(&gwo));
        assert_eq!(form.parameters(), &[ParameterSelection::default()]);

        form.select_algorithm(None);
        assert_eq!(form.algorithm(), None);
        assert!(form.parameters().is_empty());
    }

    #[test]
    fn test_set_parameter_out_of_range_is_ignored() {
        let mut form = SingleTestForm::new();
        form.select_algorithm(Some(&pso()));
        assert!(!form.set_parameter(2, ParameterField::Step, 1.0));
        assert!(form.set_parameter(1, ParameterField::Step, 0.5));
        assert_eq!(form.parameters()[1], ParameterSelection::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = SingleTestForm::new();
        form.select_algorithm(Some(&pso()));
        form.set_dimension(3);
        form.set_function_checked("Sphere", true);
        form.reset();

        assert_eq!(form, SingleTestForm::new());
    }
}
