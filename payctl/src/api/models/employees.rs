//! API request/response models for employees.

use crate::db::models::employees::{EmployeeCreateDBRequest, EmployeeDBResponse, EmployeeSummaryDBResponse, EmployeeUpdateDBRequest};
use crate::errors::Error;
use crate::types::EmployeeId;
use crate::validation;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating or updating an employee.
///
/// Both fields are optional at the JSON level so that a missing name is reported as a
/// field-level validation error rather than a deserialization failure. A missing or null
/// `dependentNames` means no dependents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    /// Employee's name (required, at most 50 characters)
    #[schema(example = "Amilia Bea")]
    pub employee_name: Option<String>,
    /// Dependent names in display order (each required, at most 50 characters)
    #[schema(example = json!(["Austin Clive", "Tania Joselyn"]))]
    pub dependent_names: Option<Vec<String>>,
}

impl EmployeeRequest {
    /// Validate the request and split it into a name and an ordered dependent list.
    fn into_validated(self) -> Result<(String, Vec<String>), Error> {
        let dependent_names = self.dependent_names.unwrap_or_default();
        validation::validate_employee(self.employee_name.as_deref(), &dependent_names)?;
        Ok((self.employee_name.unwrap_or_default(), dependent_names))
    }
}

impl TryFrom<EmployeeRequest> for EmployeeCreateDBRequest {
    type Error = Error;

    fn try_from(request: EmployeeRequest) -> Result<Self, Self::Error> {
        let (name, dependent_names) = request.into_validated()?;
        Ok(Self { name, dependent_names })
    }
}

impl TryFrom<EmployeeRequest> for EmployeeUpdateDBRequest {
    type Error = Error;

    fn try_from(request: EmployeeRequest) -> Result<Self, Self::Error> {
        let (name, dependent_names) = request.into_validated()?;
        Ok(Self { name, dependent_names })
    }
}

/// An employee as shown on the edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub employee_name: String,
    /// Dependent names ordered by their stored sort order
    pub dependent_names: Vec<String>,
}

impl From<EmployeeDBResponse> for EmployeeResponse {
    fn from(db: EmployeeDBResponse) -> Self {
        Self {
            employee_name: db.name,
            dependent_names: db.dependent_names,
        }
    }
}

/// A row of the employee management list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeManage {
    pub employee_id: EmployeeId,
    pub employee_name: String,
}

impl From<EmployeeSummaryDBResponse> for EmployeeManage {
    fn from(db: EmployeeSummaryDBResponse) -> Self {
        Self {
            employee_id: db.id,
            employee_name: db.name,
        }
    }
}
