//! Wire payloads for test submission and the builders that produce them.
//!
//! The backend expects flat numeric arrays: the domain travels as
//! `[lowerBounds, upperBounds]` and each parameter row as a fixed-length
//! tuple, index-aligned with the parameter (or algorithm) order shown in
//! the form.

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::form::{MultiTestForm, SingleTestForm};

/// Body of `POST /calculationprocessor/onealgorithmmanyfunctions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleAlgorithmTestRequest {
    pub algorithm_name: String,
    pub domain: [Vec<f64>; 2],
    /// `[lower, upper, step]` per algorithm parameter.
    pub parameters: Vec<[f64; 3]>,
    pub test_function_names: Vec<String>,
}

/// Body of `POST /calculationprocessor/onefunctionmanyalgorithms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiAlgorithmTestRequest {
    pub test_function_name: String,
    pub domain: [Vec<f64>; 2],
    /// `[population, iterations]` per chosen algorithm.
    pub parameters: Vec<[u32; 2]>,
    pub algorithm_names: Vec<String>,
}

/// Assemble the single-algorithm request.
///
/// Only the presence of the required selections is checked here; run
/// [`validate_single`](crate::validate_single) first.
pub fn build_single_request(form: &SingleTestForm) -> Result<SingleAlgorithmTestRequest> {
    let algorithm = form.algorithm().ok_or(FormError::MissingAlgorithm)?;
    if form.functions().is_empty() {
        return Err(FormError::MissingFunctions);
    }

    Ok(SingleAlgorithmTestRequest {
        algorithm_name: algorithm.to_string(),
        domain: form.domain().to_wire(),
        parameters: form.parameters().iter().map(|p| p.to_wire()).collect(),
        test_function_names: form.functions().to_vec(),
    })
}

/// Assemble the multi-algorithm request.
pub fn build_multi_request(form: &MultiTestForm) -> Result<MultiAlgorithmTestRequest> {
    let function = form.function().ok_or(FormError::MissingFunction)?;
    if form.algorithms().is_empty() {
        return Err(FormError::MissingAlgorithms);
    }

    Ok(MultiAlgorithmTestRequest {
        test_function_name: function.to_string(),
        domain: form.domain().to_wire(),
        parameters: form.runs().iter().map(|r| r.to_wire()).collect(),
        algorithm_names: form.algorithms().to_vec(),
    })
}
