//! Database models for the benefits configuration.

use crate::api::models::configuration::Configuration;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Database request for writing the singleton configuration row
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationDBRequest {
    pub salary_per_paycheck: Decimal,
    pub number_of_paychecks_per_year: i32,
    pub employee_benefit_cost: Decimal,
    pub dependent_benefit_cost: Decimal,
    pub discount: Decimal,
}

impl From<Configuration> for ConfigurationDBRequest {
    fn from(api: Configuration) -> Self {
        Self {
            salary_per_paycheck: api.salary_per_paycheck,
            number_of_paychecks_per_year: api.number_of_paychecks_per_year,
            employee_benefit_cost: api.employee_benefit_cost,
            dependent_benefit_cost: api.dependent_benefit_cost,
            discount: api.discount,
        }
    }
}

/// Database response for the configuration row
#[derive(Debug, Clone)]
pub struct ConfigurationDBResponse {
    pub salary_per_paycheck: Decimal,
    pub number_of_paychecks_per_year: i32,
    pub employee_benefit_cost: Decimal,
    pub dependent_benefit_cost: Decimal,
    pub discount: Decimal,
    pub updated_at: DateTime<Utc>,
}
