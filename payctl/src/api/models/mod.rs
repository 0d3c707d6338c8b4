//! API request and response data models.
//!
//! These structures define the public JSON contract. They are distinct from the database models
//! in [`crate::db::models`] and convert to and from them with `From`/`TryFrom` impls. Field names
//! are camelCase on the wire; every model is annotated with `utoipa` for the OpenAPI document.
//!
//! - [`configuration`]: The singleton benefits configuration
//! - [`employees`]: Employee create/update payloads, edit-form view and management list rows

pub mod configuration;
pub mod employees;
