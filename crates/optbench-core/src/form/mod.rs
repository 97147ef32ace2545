//! Editable state of the benchmark submission forms.
//!
//! # Modules
//!
//! - [`domain`] - `DomainSpec`: search-space bounds kept in sync with the dimension
//! - [`single`] - `SingleTestForm`: one algorithm against many fitness functions
//! - [`multi`]  - `MultiTestForm`: many algorithms against one fitness function
//!
//! Mutators never reject a value; the entered number is stored as-is and
//! the validation engine decides whether it is acceptable. Index-based
//! setters return `false` and leave the form untouched when the index is
//! out of range.

pub mod domain;
pub mod multi;
pub mod single;

pub use domain::{BoundSide, DomainBound, DomainSpec};
pub use multi::{MultiTestForm, RunConfig, RunField};
pub use single::{ParameterField, ParameterSelection, SingleTestForm};

/// Insert or remove `name` from an ordered selection without duplicates.
///
/// Returns `true` when the selection changed.
pub(crate) fn toggle_selection(selection: &mut Vec<String>, name: &str, checked: bool) -> bool {
    let present = selection.iter().any(|s| s == name);
    match (checked, present) {
        (true, false) => {
            selection.push(name.to_string());
            true
        }
        (false, true) => {
            selection.retain(|s| s != name);
            true
        }
        _ => false,
    }
}
