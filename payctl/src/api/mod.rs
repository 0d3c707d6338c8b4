//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! Everything is served under `/api`, with camelCase JSON field names:
//!
//! - **Configuration** (`/api/configuration`): Global payroll and benefit parameters
//! - **Employees** (`/api/employee/*`): Employees and their ordered dependents
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa` annotations. The document is served at
//! `/api/openapi.json` and rendered at `/api/docs` when the server is running.

pub mod handlers;
pub mod models;
