//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed SQLx connection and provides strongly-typed operations that
//! return domain models from [`crate::db::models`]. Repositories that write to more than one
//! table open their own transaction on the borrowed connection, so callers get atomic writes
//! whether they pass a pooled connection or an outer transaction.
//!
//! - [`Configurations`]: The singleton benefits configuration
//! - [`Employees`]: Employees and their ordered dependents (implements [`Repository`])
//!
//! ```ignore
//! use payctl::db::handlers::{Employees, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Employees::new(&mut conn);
//!     let employees = repo.list().await?;
//!     Ok(())
//! }
//! ```

pub mod configuration;
pub mod employees;
pub mod repository;

pub use configuration::Configurations;
pub use employees::Employees;
pub use repository::Repository;
