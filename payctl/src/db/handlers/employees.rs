//! Database repository for employees and their dependents.
//!
//! An employee owns an ordered list of dependents. The list is never diffed: every write that
//! touches it deletes the existing rows and reinserts the given names with `sort_order` set to
//! their position. Multi-statement writes run inside a single transaction.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::employees::{EmployeeCreateDBRequest, EmployeeDBResponse, EmployeeSummaryDBResponse, EmployeeUpdateDBRequest},
};
use crate::types::EmployeeId;
use chrono::{DateTime, Utc};
use sqlx::{Connection, FromRow, PgConnection};
use tracing::instrument;

// Database entity models
#[derive(Debug, Clone, FromRow)]
struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
}

impl From<(Employee, Vec<String>)> for EmployeeDBResponse {
    fn from((employee, dependent_names): (Employee, Vec<String>)) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            dependent_names,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

impl From<EmployeeSummary> for EmployeeSummaryDBResponse {
    fn from(summary: EmployeeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
        }
    }
}

pub struct Employees<'c> {
    db: &'c mut PgConnection,
}

/// Insert dependents for an employee, assigning sort orders 0..N-1 by position.
async fn insert_dependents(conn: &mut PgConnection, employee_id: EmployeeId, names: &[String]) -> Result<()> {
    for (sort_order, name) in names.iter().enumerate() {
        let sort_order = i32::try_from(sort_order).map_err(|e| DbError::Other(e.into()))?;
        sqlx::query("INSERT INTO dependents (employee_id, name, sort_order) VALUES ($1, $2, $3)")
            .bind(employee_id)
            .bind(name)
            .bind(sort_order)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn delete_dependents(conn: &mut PgConnection, employee_id: EmployeeId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM dependents WHERE employee_id = $1")
        .bind(employee_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

#[async_trait::async_trait]
impl<'c> Repository for Employees<'c> {
    type CreateRequest = EmployeeCreateDBRequest;
    type UpdateRequest = EmployeeUpdateDBRequest;
    type Response = EmployeeDBResponse;
    type Summary = EmployeeSummaryDBResponse;
    type Id = EmployeeId;

    #[instrument(skip(self, request), fields(dependents = request.dependent_names.len()), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        // The employee and all of its dependents persist together or not at all
        let mut tx = self.db.begin().await?;

        let employee = sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
        )
        .bind(&request.name)
        .fetch_one(&mut *tx)
        .await?;

        insert_dependents(&mut tx, employee.id, &request.dependent_names).await?;

        tx.commit().await?;

        Ok(EmployeeDBResponse::from((employee, request.dependent_names.clone())))
    }

    #[instrument(skip(self), fields(employee_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let mut tx = self.db.begin().await?;

        let employee = sqlx::query_as::<_, Employee>("SELECT id, name, created_at, updated_at FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(employee) = employee else {
            tx.commit().await?;
            return Ok(None);
        };

        let dependent_names: Vec<String> = sqlx::query_scalar("SELECT name FROM dependents WHERE employee_id = $1 ORDER BY sort_order")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        // Read-only, but committing releases the transaction cleanly
        tx.commit().await?;

        Ok(Some(EmployeeDBResponse::from((employee, dependent_names))))
    }

    /// All employees ordered by name (store collation), ties broken by id.
    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Summary>> {
        let employees = sqlx::query_as::<_, EmployeeSummary>("SELECT id, name FROM employees ORDER BY name, id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(employees.into_iter().map(EmployeeSummaryDBResponse::from).collect())
    }

    /// Delete an employee and its dependents. Deleting an absent employee is not an error.
    #[instrument(skip(self), fields(employee_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        // Dependents first: the foreign key does not cascade
        delete_dependents(&mut tx, id).await?;

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace the employee's name and its entire dependent list.
    #[instrument(skip(self, request), fields(employee_id = id, dependents = request.dependent_names.len()), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Delete and reinsert share one transaction so a failure cannot lose dependents
        let mut tx = self.db.begin().await?;

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                name = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        delete_dependents(&mut tx, id).await?;
        insert_dependents(&mut tx, id, &request.dependent_names).await?;

        tx.commit().await?;

        Ok(EmployeeDBResponse::from((employee, request.dependent_names.clone())))
    }
}

impl<'c> Employees<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}
