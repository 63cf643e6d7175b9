//! TypeScript-compatible type descriptions for the template analyzer.
//! This crate is the boundary to the host type oracle.

pub mod assignability;
pub mod program;
pub mod simple_type;
pub mod type_checker;

pub use assignability::*;
pub use program::*;
pub use simple_type::*;
pub use type_checker::*;
