//! Reference data published by the benchmark backend.
//!
//! Field names follow the backend's camelCase JSON (`paramsInfo`,
//! `lowerBoundary`, ...). These values are read-only for the client: a
//! session fetches them once when it opens and keeps them for its lifetime.

use serde::{Deserialize, Serialize};

/// Legal numeric range for one tunable parameter of an algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub lower_boundary: f64,
    pub upper_boundary: f64,
}

impl ParameterSpec {
    pub fn new(name: &str, lower_boundary: f64, upper_boundary: f64) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            lower_boundary,
            upper_boundary,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Whether `value` lies in `[lower_boundary, upper_boundary]`.
    pub fn contains(&self, value: f64) -> bool {
        self.lower_boundary <= value && value <= self.upper_boundary
    }
}

/// An optimization algorithm the backend can run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmDescriptor {
    /// Unique identifier, also used as the display name.
    pub name: String,
    /// Tunable parameters in display order.
    #[serde(default)]
    pub params_info: Vec<ParameterSpec>,
}

impl AlgorithmDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params_info: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, spec: ParameterSpec) -> Self {
        self.params_info.push(spec);
        self
    }
}

/// A benchmark (fitness) function the backend can evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessFunctionDescriptor {
    pub name: String,
}

impl FitnessFunctionDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// An algorithm exported by an uploaded plugin library.
///
/// The backend also serializes runtime state (best solution, population
/// snapshots, ...) for each entry; only the descriptive part is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginAlgorithm {
    pub name: String,
    #[serde(default)]
    pub params_info: Vec<ParameterSpec>,
}

/// One plugin library loaded into the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginBundle {
    pub file_name: String,
    #[serde(default)]
    pub algorithm_list: Vec<PluginAlgorithm>,
    #[serde(default)]
    pub function_list: Vec<FitnessFunctionDescriptor>,
}

impl PluginBundle {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            algorithm_list: Vec::new(),
            function_list: Vec::new(),
        }
    }
}

/// Catalogs a form is validated against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub algorithms: Vec<AlgorithmDescriptor>,
    pub functions: Vec<FitnessFunctionDescriptor>,
}

impl ReferenceData {
    pub fn new(
        algorithms: Vec<AlgorithmDescriptor>,
        functions: Vec<FitnessFunctionDescriptor>,
    ) -> Self {
        Self {
            algorithms,
            functions,
        }
    }

    /// Look up an algorithm by name.
    pub fn algorithm(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.algorithms.iter().find(|alg| alg.name == name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.iter().any(|ff| ff.name == name)
    }
}
