//! Member type validation
//!
//! - [`types`]: the [`ScalarType`] allow-list
//! - [`check`]: the validation pass producing [`ValidStruct`]s
//! - [`report`]: rejections and the batched [`ValidationError`]
//!
//! A struct is valid when every member is `<allowed type> <identifier>` and
//! no earlier struct in the same input has its name.

pub mod check;
pub mod report;
pub mod types;

pub use check::{validate, Field, ValidStruct, Validation};
pub use report::{allowed_types_listing, Issue, Rejection, ValidationError};
pub use types::ScalarType;
