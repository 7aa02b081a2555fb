//! Form domain layer
//!
//! This module provides type-safe form handling for create views.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{Form, FormState, StudentCreateForm, StudentFormButton};
