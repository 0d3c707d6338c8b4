//! Database record models.
//!
//! Database models are distinct from API models so storage and wire representations can evolve
//! independently. Repositories in [`crate::db::handlers`] accept the `*DBRequest` types and return
//! the `*DBResponse` types; API handlers convert them with `From` impls.
//!
//! - [`configuration`]: The singleton benefits configuration row
//! - [`employees`]: Employees and their ordered dependents

pub mod configuration;
pub mod employees;
