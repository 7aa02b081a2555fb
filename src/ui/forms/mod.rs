//! Form rendering

mod field_renderer;
mod student_form;

pub use student_form::draw_student_create;
