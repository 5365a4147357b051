use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Search criteria for a matching run. Immutable once a search starts: the
/// session takes it by value on submit and keeps its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub equipment_type: String,
    /// Minimum acceptable rate for the lane, in whole dollars.
    pub min_rate: Option<u32>,
    pub pickup_date: Option<NaiveDate>,
    pub weight_lbs: Option<u32>,
    pub commodity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("origin is required")]
    MissingOrigin,
    #[error("destination is required")]
    MissingDestination,
    #[error("equipment type is required")]
    MissingEquipment,
}

impl SearchCriteria {
    pub fn new(origin: &str, destination: &str, equipment_type: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            equipment_type: equipment_type.to_string(),
            min_rate: None,
            pickup_date: None,
            weight_lbs: None,
            commodity: None,
        }
    }

    /// Origin-destination pair in the "origin - destination" display form
    /// used across match rows.
    pub fn lane(&self) -> String {
        format!("{} - {}", self.origin, self.destination)
    }

    /// Fail-fast check run before a search session may start.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.origin.trim().is_empty() {
            return Err(ValidationError::MissingOrigin);
        }
        if self.destination.trim().is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        if self.equipment_type.trim().is_empty() {
            return Err(ValidationError::MissingEquipment);
        }
        Ok(())
    }
}
