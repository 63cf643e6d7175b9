//! Helpers shared by rules.

pub mod directive;
pub mod suggest;
pub mod types;

pub use directive::is_directive;
pub use suggest::suggest_similar;
pub use types::{
    is_assignable, is_assignable_in_attribute, is_boolean_type, is_complex_type, member_for,
    type_a, type_b,
};
