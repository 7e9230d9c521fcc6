use std::fmt;

use tracing::{info, warn};

use crate::builder::BuildError;

/// One failed unit of a pass, flattened to a label and a message so the
/// report can carry build, enumeration, download, and persistence failures
/// alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitError {
    pub unit: String,
    pub message: String,
}

impl UnitError {
    pub fn new(unit: &str, message: String) -> UnitError {
        UnitError {
            unit: unit.to_string(),
            message,
        }
    }
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.unit, self.message)
    }
}

impl From<BuildError> for UnitError {
    fn from(error: BuildError) -> UnitError {
        UnitError {
            unit: error.key.to_string(),
            message: error.message,
        }
    }
}

/// Outcome of one pass. Errors accumulate; a pass never aborts because a
/// single unit failed.
#[derive(Debug, Default)]
pub struct PassReport {
    pub total: usize,
    pub succeeded: usize,
    pub errors: Vec<UnitError>,
    /// Set on download passes, which always target one component.
    pub component: Option<String>,
}

impl PassReport {
    pub fn print_summary(&self) {
        match &self.component {
            Some(component) => info!(
                "Finished {} pass: {}/{} units succeeded",
                component, self.succeeded, self.total
            ),
            None => info!(
                "Finished pass: {}/{} units succeeded",
                self.succeeded, self.total
            ),
        }
        for error in &self.errors {
            warn!("{}", error);
        }
    }
}
