//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - The unified error type and its HTTP classification
//! - Typed numeric identifiers for database rows
//!
//! Only things whose meaning is the same in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
