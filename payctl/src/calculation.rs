//! Benefits cost estimate for one employee and their dependents.
//!
//! Pure arithmetic over a [`Configuration`]: the annual salary, less the benefit cost of the
//! employee and of each dependent. Anyone whose name starts with an `A` (either case) gets the
//! configured discount on their benefit cost.
//!
//! All amounts are [`Decimal`]; rounding only happens when formatting with [`to_money`].

use crate::api::models::configuration::Configuration;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

/// Benefit cost of one person covered by the estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBenefit {
    pub name: String,
    pub cost: Decimal,
    pub discount_applied: bool,
}

/// Breakdown of an employee's yearly pay after benefits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitsEstimate {
    pub annual_salary: Decimal,
    pub employee: PersonBenefit,
    pub dependents: Vec<PersonBenefit>,
    pub total: Decimal,
}

impl BenefitsEstimate {
    /// Sum of the employee's and dependents' benefit costs.
    pub fn total_benefit_cost(&self) -> Decimal {
        self.employee.cost + self.dependents.iter().map(|d| d.cost).sum::<Decimal>()
    }
}

impl fmt::Display for BenefitsEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn person(f: &mut fmt::Formatter<'_>, role: &str, p: &PersonBenefit) -> fmt::Result {
            let name = if p.name.is_empty() { "(unnamed)" } else { p.name.as_str() };
            let marker = if p.discount_applied { "  (discount)" } else { "" };
            writeln!(f, "{role:<10} {name:<50} {:>14}{marker}", to_money(p.cost))
        }

        writeln!(f, "{:<61} {:>14}", "Annual salary", to_money(self.annual_salary))?;
        person(f, "Employee", &self.employee)?;
        for dependent in &self.dependents {
            person(f, "Dependent", dependent)?;
        }
        write!(f, "{:<61} {:>14}", "Total", to_money(self.total))
    }
}

/// Whether a name qualifies for the benefits discount.
pub fn is_discount_applied(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|first| first.to_uppercase().eq(std::iter::once('A')))
}

/// Reduce a cost by a fractional discount.
pub fn apply_discount(cost: Decimal, discount: Decimal) -> Decimal {
    cost * (Decimal::ONE - discount)
}

fn person_benefit(name: &str, cost: Decimal, discount: Decimal) -> PersonBenefit {
    let discount_applied = is_discount_applied(name);
    PersonBenefit {
        name: name.to_string(),
        cost: if discount_applied { apply_discount(cost, discount) } else { cost },
        discount_applied,
    }
}

/// Compute the estimate for an employee and their dependents, in the given order.
pub fn calculate(config: &Configuration, employee_name: &str, dependent_names: &[String]) -> BenefitsEstimate {
    let annual_salary = config.salary_per_paycheck * Decimal::from(config.number_of_paychecks_per_year);
    let employee = person_benefit(employee_name, config.employee_benefit_cost, config.discount);
    let dependents: Vec<PersonBenefit> = dependent_names
        .iter()
        .map(|name| person_benefit(name, config.dependent_benefit_cost, config.discount))
        .collect();

    let mut estimate = BenefitsEstimate {
        annual_salary,
        employee,
        dependents,
        total: Decimal::ZERO,
    };
    estimate.total = annual_salary - estimate.total_benefit_cost();
    estimate
}

/// Format an amount with two decimals and thousands separators, e.g. `1,000.50`.
///
/// Midpoints round away from zero. Negative amounts keep their sign.
pub fn to_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn configuration() -> Configuration {
        Configuration {
            salary_per_paycheck: dec("2000"),
            number_of_paychecks_per_year: 26,
            employee_benefit_cost: dec("1000"),
            dependent_benefit_cost: dec("500"),
            discount: dec("0.10"),
        }
    }

    #[test]
    fn test_discount_eligibility() {
        assert!(is_discount_applied("Andrew"));
        assert!(is_discount_applied("andrew"));
        assert!(!is_discount_applied("Brent"));
        assert!(!is_discount_applied(""));
        assert!(!is_discount_applied(" Andrew"));
    }

    #[test]
    fn test_apply_discount() {
        assert_eq!(apply_discount(dec("1000"), dec("0.10")), dec("900"));
        assert_eq!(apply_discount(dec("500"), Decimal::ZERO), dec("500"));
        assert_eq!(apply_discount(dec("500"), Decimal::ONE), Decimal::ZERO);
    }

    #[test]
    fn test_worked_example() {
        let dependents = vec!["Austin".to_string(), "Tania".to_string()];
        let estimate = calculate(&configuration(), "Amilia", &dependents);

        assert_eq!(estimate.annual_salary, dec("52000"));
        assert_eq!(estimate.employee.cost, dec("900"));
        assert!(estimate.employee.discount_applied);
        assert_eq!(estimate.dependents.len(), 2);
        assert_eq!(estimate.dependents[0].name, "Austin");
        assert_eq!(estimate.dependents[0].cost, dec("450"));
        assert!(estimate.dependents[0].discount_applied);
        assert_eq!(estimate.dependents[1].name, "Tania");
        assert_eq!(estimate.dependents[1].cost, dec("500"));
        assert!(!estimate.dependents[1].discount_applied);
        assert_eq!(estimate.total_benefit_cost(), dec("1850"));
        assert_eq!(estimate.total, dec("50150"));
        assert_eq!(to_money(estimate.total), "50,150.00");
    }

    #[test]
    fn test_no_dependents_and_empty_name() {
        let estimate = calculate(&configuration(), "", &[]);
        assert_eq!(estimate.employee.cost, dec("1000"));
        assert!(estimate.dependents.is_empty());
        assert_eq!(estimate.total, dec("51000"));
    }

    #[test]
    fn test_total_can_go_negative() {
        let config = Configuration {
            salary_per_paycheck: dec("10"),
            number_of_paychecks_per_year: 1,
            ..configuration()
        };
        let estimate = calculate(&config, "Brent", &[]);
        assert_eq!(estimate.total, dec("-990"));
        assert_eq!(to_money(estimate.total), "-990.00");
    }

    #[test]
    fn test_display_lists_each_person() {
        let dependents = vec!["Austin".to_string(), String::new()];
        let rendered = calculate(&configuration(), "Brent", &dependents).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Annual salary") && lines[0].ends_with("52,000.00"));
        assert!(lines[1].starts_with("Employee") && lines[1].contains("Brent") && lines[1].ends_with("1,000.00"));
        assert!(lines[2].contains("Austin") && lines[2].ends_with("450.00  (discount)"));
        assert!(lines[3].contains("(unnamed)") && lines[3].ends_with("500.00"));
        assert!(lines[4].starts_with("Total") && lines[4].ends_with("50,050.00"));
    }

    #[test]
    fn test_to_money() {
        assert_eq!(to_money(dec("1000.50123")), "1,000.50");
        assert_eq!(to_money(dec("0")), "0.00");
        assert_eq!(to_money(dec("12.345")), "12.35");
        assert_eq!(to_money(dec("-12.345")), "-12.35");
        assert_eq!(to_money(dec("999.995")), "1,000.00");
        assert_eq!(to_money(dec("1234567.8")), "1,234,567.80");
        assert_eq!(to_money(dec("123456")), "123,456.00");
        assert_eq!(to_money(dec("-0.001")), "0.00");
    }
}
