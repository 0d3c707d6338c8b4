//! Database repository for the singleton benefits configuration.

use crate::db::{
    errors::{DbError, Result},
    models::configuration::{ConfigurationDBRequest, ConfigurationDBResponse},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Identity of the only configuration row.
const CONFIGURATION_ID: i16 = 1;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct ConfigurationRow {
    pub salary_per_paycheck: Decimal,
    pub number_of_paychecks_per_year: i32,
    pub employee_benefit_cost: Decimal,
    pub dependent_benefit_cost: Decimal,
    pub discount: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<ConfigurationRow> for ConfigurationDBResponse {
    fn from(row: ConfigurationRow) -> Self {
        Self {
            salary_per_paycheck: row.salary_per_paycheck,
            number_of_paychecks_per_year: row.number_of_paychecks_per_year,
            employee_benefit_cost: row.employee_benefit_cost,
            dependent_benefit_cost: row.dependent_benefit_cost,
            discount: row.discount,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the `configuration` table.
///
/// The table holds exactly one row, provisioned by [`Configurations::seed`] at startup. Reads and
/// updates assume the row exists and report [`DbError::NotFound`] otherwise.
pub struct Configurations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Configurations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn get(&mut self) -> Result<ConfigurationDBResponse> {
        let row = sqlx::query_as::<_, ConfigurationRow>(
            r#"
            SELECT salary_per_paycheck, number_of_paychecks_per_year, employee_benefit_cost,
                   dependent_benefit_cost, discount, updated_at
            FROM configuration
            WHERE id = $1
            "#,
        )
        .bind(CONFIGURATION_ID)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row.into())
    }

    /// Overwrite every field of the configuration row in place. Last write wins.
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, request: &ConfigurationDBRequest) -> Result<ConfigurationDBResponse> {
        let row = sqlx::query_as::<_, ConfigurationRow>(
            r#"
            UPDATE configuration SET
                salary_per_paycheck = $2,
                number_of_paychecks_per_year = $3,
                employee_benefit_cost = $4,
                dependent_benefit_cost = $5,
                discount = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING salary_per_paycheck, number_of_paychecks_per_year, employee_benefit_cost,
                      dependent_benefit_cost, discount, updated_at
            "#,
        )
        .bind(CONFIGURATION_ID)
        .bind(request.salary_per_paycheck)
        .bind(request.number_of_paychecks_per_year)
        .bind(request.employee_benefit_cost)
        .bind(request.dependent_benefit_cost)
        .bind(request.discount)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row.into())
    }

    /// Provision the configuration row if it does not exist yet.
    ///
    /// Never overwrites an existing row. Returns `true` if the row was inserted.
    #[instrument(skip(self, request), err)]
    pub async fn seed(&mut self, request: &ConfigurationDBRequest) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO configuration (id, salary_per_paycheck, number_of_paychecks_per_year,
                                       employee_benefit_cost, dependent_benefit_cost, discount)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(CONFIGURATION_ID)
        .bind(request.salary_per_paycheck)
        .bind(request.number_of_paychecks_per_year)
        .bind(request.employee_benefit_cost)
        .bind(request.dependent_benefit_cost)
        .bind(request.discount)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn configuration(salary: i64, paychecks: i32, employee: i64, dependent: i64, discount_pct: i64) -> ConfigurationDBRequest {
        ConfigurationDBRequest {
            salary_per_paycheck: Decimal::new(salary, 0),
            number_of_paychecks_per_year: paychecks,
            employee_benefit_cost: Decimal::new(employee, 0),
            dependent_benefit_cost: Decimal::new(dependent, 0),
            discount: Decimal::new(discount_pct, 2),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_before_seed_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Configurations::new(&mut conn);

        let result = repo.get().await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_before_seed_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Configurations::new(&mut conn);

        let result = repo.update(&configuration(300, 20, 200, 100, 50)).await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_seed_then_get(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Configurations::new(&mut conn);

        assert!(repo.seed(&configuration(300, 20, 200, 100, 50)).await.unwrap());

        let config = repo.get().await.unwrap();
        assert_eq!(config.salary_per_paycheck, Decimal::new(300, 0));
        assert_eq!(config.number_of_paychecks_per_year, 20);
        assert_eq!(config.employee_benefit_cost, Decimal::new(200, 0));
        assert_eq!(config.dependent_benefit_cost, Decimal::new(100, 0));
        assert_eq!(config.discount, Decimal::new(5, 1));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_seed_never_overwrites_or_adds_rows(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Configurations::new(&mut conn);

        assert!(repo.seed(&configuration(300, 20, 200, 100, 50)).await.unwrap());
        assert!(!repo.seed(&configuration(9999, 52, 1, 1, 0)).await.unwrap());

        let config = repo.get().await.unwrap();
        assert_eq!(config.salary_per_paycheck, Decimal::new(300, 0));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM configuration")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_round_trips(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Configurations::new(&mut conn);
        repo.seed(&configuration(300, 20, 200, 100, 50)).await.unwrap();

        let update = ConfigurationDBRequest {
            salary_per_paycheck: Decimal::new(300050, 2),
            number_of_paychecks_per_year: 200,
            employee_benefit_cost: Decimal::new(2000, 0),
            dependent_benefit_cost: Decimal::new(1000, 0),
            discount: Decimal::new(8, 1),
        };
        let updated = repo.update(&update).await.unwrap();
        assert_eq!(updated.salary_per_paycheck, update.salary_per_paycheck);

        let config = repo.get().await.unwrap();
        assert_eq!(config.salary_per_paycheck, Decimal::new(300050, 2));
        assert_eq!(config.number_of_paychecks_per_year, 200);
        assert_eq!(config.employee_benefit_cost, Decimal::new(2000, 0));
        assert_eq!(config.dependent_benefit_cost, Decimal::new(1000, 0));
        assert_eq!(config.discount, Decimal::new(8, 1));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_check_constraint_rejects_discount_above_one(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Configurations::new(&mut conn);
        repo.seed(&configuration(300, 20, 200, 100, 50)).await.unwrap();

        let result = repo.update(&configuration(300, 20, 200, 100, 150)).await;
        assert!(matches!(result, Err(DbError::CheckViolation { .. })));
    }
}
