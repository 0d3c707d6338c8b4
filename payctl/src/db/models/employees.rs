//! Database models for employees and their dependents.

use crate::types::EmployeeId;
use chrono::{DateTime, Utc};

/// Database request for creating an employee together with its dependents
#[derive(Debug, Clone)]
pub struct EmployeeCreateDBRequest {
    pub name: String,
    /// Dependent names in display order; position becomes the stored sort order
    pub dependent_names: Vec<String>,
}

/// Database request for replacing an employee's name and full dependent list
#[derive(Debug, Clone)]
pub struct EmployeeUpdateDBRequest {
    pub name: String,
    pub dependent_names: Vec<String>,
}

/// Database response for an employee with its ordered dependents
#[derive(Debug, Clone)]
pub struct EmployeeDBResponse {
    pub id: EmployeeId,
    pub name: String,
    pub dependent_names: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight row for the management list
#[derive(Debug, Clone)]
pub struct EmployeeSummaryDBResponse {
    pub id: EmployeeId,
    pub name: String,
}
