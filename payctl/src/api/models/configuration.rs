//! API request/response models for the benefits configuration.

use crate::db::models::configuration::ConfigurationDBResponse;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Global payroll and benefit parameters.
///
/// Money amounts and the discount travel as JSON numbers and are held as exact decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Gross pay per paycheck
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 2000.0, minimum = 0)]
    pub salary_per_paycheck: Decimal,
    /// Number of paychecks issued per year
    #[schema(example = 26, minimum = 0)]
    pub number_of_paychecks_per_year: i32,
    /// Annual benefit cost for the employee
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1000.0, minimum = 0)]
    pub employee_benefit_cost: Decimal,
    /// Annual benefit cost per dependent
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 500.0, minimum = 0)]
    pub dependent_benefit_cost: Decimal,
    /// Fraction taken off a benefit cost for discount-eligible names
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0.1, minimum = 0, maximum = 1)]
    pub discount: Decimal,
}

impl From<ConfigurationDBResponse> for Configuration {
    fn from(db: ConfigurationDBResponse) -> Self {
        Self {
            salary_per_paycheck: db.salary_per_paycheck,
            number_of_paychecks_per_year: db.number_of_paychecks_per_year,
            employee_benefit_cost: db.employee_benefit_cost,
            dependent_benefit_cost: db.dependent_benefit_cost,
            discount: db.discount,
        }
    }
}
