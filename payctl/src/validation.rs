//! Field validation shared by the API boundary and the client form.
//!
//! Errors are collected per field rather than failing on the first problem, so a form can show
//! every message at once. Field keys use the JSON names (`employeeName`, `dependentNames[2]`,
//! `discount`).

use crate::api::models::configuration::Configuration;
use crate::types::{DECIMAL_SCALE, MAX_NAME_LENGTH};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field, empty if the field is valid
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a required name of at most [`MAX_NAME_LENGTH`] characters.
pub fn check_name(errors: &mut ValidationErrors, field: &str, label: &str, value: Option<&str>) {
    match value {
        None | Some("") => errors.add(field, format!("{label} is required.")),
        Some(name) if name.chars().count() > MAX_NAME_LENGTH => {
            errors.add(field, format!("{label} must be {MAX_NAME_LENGTH} characters or less."))
        }
        Some(_) => {}
    }
}

pub fn dependent_field(index: usize) -> String {
    format!("dependentNames[{index}]")
}

/// Validate an employee name and its dependent names.
pub fn validate_employee(employee_name: Option<&str>, dependent_names: &[String]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, "employeeName", "Employee name", employee_name);
    for (index, name) in dependent_names.iter().enumerate() {
        check_name(&mut errors, &dependent_field(index), "Dependent name", Some(name.as_str()));
    }
    errors.into_result()
}

fn check_amount(errors: &mut ValidationErrors, field: &str, label: &str, value: Decimal, max: Option<Decimal>) {
    if value.is_sign_negative() && !value.is_zero() {
        errors.add(field, format!("The minimum value of {label} is 0."));
    }
    if let Some(max) = max
        && value > max
    {
        errors.add(field, format!("The maximum value of {label} is {max}."));
    }
    if value.normalize().scale() > DECIMAL_SCALE {
        errors.add(field, format!("{label} must have at most {DECIMAL_SCALE} decimal places."));
    }
}

/// Validate a benefits configuration before it is stored.
pub fn validate_configuration(config: &Configuration) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_amount(
        &mut errors,
        "salaryPerPaycheck",
        "Salary per paycheck",
        config.salary_per_paycheck,
        None,
    );
    if config.number_of_paychecks_per_year < 0 {
        errors.add(
            "numberOfPaychecksPerYear",
            "The minimum value of Number of paychecks per year is 0.",
        );
    }
    check_amount(
        &mut errors,
        "employeeBenefitCost",
        "Employee benefit cost",
        config.employee_benefit_cost,
        None,
    );
    check_amount(
        &mut errors,
        "dependentBenefitCost",
        "Dependent benefit cost",
        config.dependent_benefit_cost,
        None,
    );
    check_amount(&mut errors, "discount", "Discount", config.discount, Some(Decimal::ONE));
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_configuration() -> Configuration {
        Configuration {
            salary_per_paycheck: Decimal::new(2000, 0),
            number_of_paychecks_per_year: 26,
            employee_benefit_cost: Decimal::new(1000, 0),
            dependent_benefit_cost: Decimal::new(500, 0),
            discount: Decimal::new(10, 2),
        }
    }

    #[test]
    fn test_valid_employee() {
        let dependents = vec!["Austin".to_string(), "Tania".to_string()];
        assert!(validate_employee(Some("Amilia"), &dependents).is_ok());
        assert!(validate_employee(Some("Amilia"), &[]).is_ok());
    }

    #[test]
    fn test_employee_name_required() {
        for name in [None, Some("")] {
            let errors = validate_employee(name, &[]).unwrap_err();
            assert_eq!(errors.field("employeeName"), ["Employee name is required."]);
        }
    }

    #[test]
    fn test_name_length_limit_counts_characters() {
        let exactly_fifty = "é".repeat(50);
        assert!(validate_employee(Some(exactly_fifty.as_str()), &[]).is_ok());

        let fifty_one = "a".repeat(51);
        let errors = validate_employee(Some(fifty_one.as_str()), &[]).unwrap_err();
        assert_eq!(errors.field("employeeName"), ["Employee name must be 50 characters or less."]);
    }

    #[test]
    fn test_each_dependent_is_checked_by_position() {
        let dependents = vec!["Austin".to_string(), String::new(), "b".repeat(60)];
        let errors = validate_employee(Some("Amilia"), &dependents).unwrap_err();

        assert!(errors.field("employeeName").is_empty());
        assert!(errors.field("dependentNames[0]").is_empty());
        assert_eq!(errors.field("dependentNames[1]"), ["Dependent name is required."]);
        assert_eq!(errors.field("dependentNames[2]"), ["Dependent name must be 50 characters or less."]);
    }

    #[test]
    fn test_valid_configuration() {
        assert!(validate_configuration(&valid_configuration()).is_ok());

        let zeroes = Configuration {
            salary_per_paycheck: Decimal::ZERO,
            number_of_paychecks_per_year: 0,
            employee_benefit_cost: Decimal::ZERO,
            dependent_benefit_cost: Decimal::ZERO,
            discount: Decimal::ONE,
        };
        assert!(validate_configuration(&zeroes).is_ok());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let config = Configuration {
            salary_per_paycheck: Decimal::new(-1, 0),
            number_of_paychecks_per_year: -2,
            dependent_benefit_cost: Decimal::new(-5, 1),
            ..valid_configuration()
        };
        let errors = validate_configuration(&config).unwrap_err();

        assert_eq!(errors.field("salaryPerPaycheck"), ["The minimum value of Salary per paycheck is 0."]);
        assert_eq!(
            errors.field("numberOfPaychecksPerYear"),
            ["The minimum value of Number of paychecks per year is 0."]
        );
        assert_eq!(
            errors.field("dependentBenefitCost"),
            ["The minimum value of Dependent benefit cost is 0."]
        );
        assert!(errors.field("employeeBenefitCost").is_empty());
    }

    #[test]
    fn test_discount_bounds() {
        let config = Configuration {
            discount: Decimal::new(101, 2),
            ..valid_configuration()
        };
        let errors = validate_configuration(&config).unwrap_err();
        assert_eq!(errors.field("discount"), ["The maximum value of Discount is 1."]);

        let config = Configuration {
            discount: Decimal::new(-1, 2),
            ..valid_configuration()
        };
        let errors = validate_configuration(&config).unwrap_err();
        assert_eq!(errors.field("discount"), ["The minimum value of Discount is 0."]);
    }

    #[test]
    fn test_precision_beyond_storage_scale_rejected() {
        let config = Configuration {
            discount: Decimal::new(125, 3),
            ..valid_configuration()
        };
        let errors = validate_configuration(&config).unwrap_err();
        assert_eq!(errors.field("discount"), ["Discount must have at most 2 decimal places."]);

        // Trailing zeroes do not count
        let config = Configuration {
            salary_per_paycheck: Decimal::new(2000500, 3),
            ..valid_configuration()
        };
        assert!(validate_configuration(&config).is_ok());
    }

    #[test]
    fn test_display_lists_every_message() {
        let mut errors = ValidationErrors::new();
        errors.add("employeeName", "Employee name is required.");
        errors.add("dependentNames[0]", "Dependent name is required.");

        assert_eq!(
            errors.to_string(),
            "dependentNames[0]: Dependent name is required.; employeeName: Employee name is required."
        );
    }
}
