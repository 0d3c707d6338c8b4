//! HTTP request handlers for all API endpoints.
//!
//! Each handler acquires its own pooled connection, builds the repository it needs and maps
//! the outcome to a response. Request bodies are validated before anything touches the store.
//!
//! # Handler Modules
//!
//! - [`configuration`]: Read and overwrite the benefits configuration
//! - [`employees`]: Employee and dependent CRUD
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which converts to the matching HTTP status, with a
//! JSON body of field messages for validation failures.

pub mod configuration;
pub mod employees;
