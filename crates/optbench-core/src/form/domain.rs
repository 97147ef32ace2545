//! Search-space domain: one `(lower, upper)` pair per dimension.

/// Which end of an interval an edit touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

/// Bounds of a single dimension.
///
/// `(0, 0)` doubles as the "not entered yet" marker, so a genuine zero-width
/// interval at the origin cannot be submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DomainBound {
    pub lower: f64,
    pub upper: f64,
    last_edited: Option<BoundSide>,
}

impl DomainBound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            last_edited: None,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.lower == 0.0 && self.upper == 0.0
    }

    pub fn is_ordered(&self) -> bool {
        self.lower <= self.upper
    }

    /// Side touched by the most recent edit, if any.
    pub fn last_edited(&self) -> Option<BoundSide> {
        self.last_edited
    }

    fn set(&mut self, side: BoundSide, value: f64) {
        match side {
            BoundSide::Lower => self.lower = value,
            BoundSide::Upper => self.upper = value,
        }
        self.last_edited = Some(side);
    }
}

/// Domain of the objective function.
///
/// The number of bounds always equals the dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainSpec {
    bounds: Vec<DomainBound>,
}

impl DomainSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(dimension: usize) -> Self {
        let mut domain = Self::new();
        domain.set_dimension(dimension);
        domain
    }

    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    /// Resize to `dimension` entries.
    ///
    /// Shrinking drops trailing entries; growing appends `(0, 0)` entries.
    /// Entries at indices present before and after are left untouched.
    pub fn set_dimension(&mut self, dimension: usize) {
        self.bounds.resize(dimension, DomainBound::default());
    }

    pub fn bounds(&self) -> &[DomainBound] {
        &self.bounds
    }

    /// Store `value` on one side of the bound at `index`.
    pub fn set_bound(&mut self, index: usize, side: BoundSide, value: f64) -> bool {
        match self.bounds.get_mut(index) {
            Some(bound) => {
                bound.set(side, value);
                true
            }
            None => false,
        }
    }

    pub fn lower_bounds(&self) -> Vec<f64> {
        self.bounds.iter().map(|b| b.lower).collect()
    }

    pub fn upper_bounds(&self) -> Vec<f64> {
        self.bounds.iter().map(|b| b.upper).collect()
    }

    /// Wire form: `[all lower bounds, all upper bounds]`.
    pub fn to_wire(&self) -> [Vec<f64>; 2] {
        [self.lower_bounds(), self.upper_bounds()]
    }
}
