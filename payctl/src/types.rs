//! Common type definitions.
//!
//! # ID Types
//!
//! Entity IDs are store-assigned integers wrapped in type aliases:
//!
//! - [`EmployeeId`]: Employee identifier
//! - [`DependentId`]: Dependent identifier
//!
//! # Limits
//!
//! - [`MAX_NAME_LENGTH`]: Maximum length of employee and dependent names, matching the
//!   `VARCHAR(50)` columns.

// Type aliases for IDs
pub type EmployeeId = i32;
pub type DependentId = i32;

/// Maximum number of characters in an employee or dependent name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Number of fractional digits stored for money amounts and the discount rate.
pub const DECIMAL_SCALE: u32 = 2;
