//! Multi-algorithm test form: several algorithms compared on a single
//! fitness function.

use super::domain::{BoundSide, DomainSpec};
use super::toggle_selection;

/// Population size and iteration budget for one algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub population: u32,
    pub iterations: u32,
}

impl RunConfig {
    pub fn new(population: u32, iterations: u32) -> Self {
        Self {
            population,
            iterations,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.population == 0 && self.iterations == 0
    }

    pub fn to_wire(&self) -> [u32; 2] {
        [self.population, self.iterations]
    }
}

/// Component of a [`RunConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunField {
    Population,
    Iterations,
}

/// State of the multi-algorithm form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiTestForm {
    function: Option<String>,
    algorithms: Vec<String>,
    runs: Vec<RunConfig>,
    domain: DomainSpec,
}

impl MultiTestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn select_function(&mut self, name: Option<&str>) {
        self.function = name.map(str::to_string);
    }

    /// Chosen algorithms, in the order they were checked.
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Check or uncheck an algorithm.
    ///
    /// Any change to the chosen set zero-fills the run configs to the new
    /// count; entries are not carried over by name.
    pub fn set_algorithm_checked(&mut self, name: &str, checked: bool) -> bool {
        let changed = toggle_selection(&mut self.algorithms, name, checked);
        if changed {
            self.runs = vec![RunConfig::default(); self.algorithms.len()];
        }
        changed
    }

    /// Run configs, index-aligned with [`algorithms`](Self::algorithms).
    pub fn runs(&self) -> &[RunConfig] {
        &self.runs
    }

    pub fn set_run_config(&mut self, index: usize, field: RunField, value: u32) -> bool {
        let Some(run) = self.runs.get_mut(index) else {
            return false;
        };
        match field {
            RunField::Population => run.population = value,
            RunField::Iterations => run.iterations = value,
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

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
