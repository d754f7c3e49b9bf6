//! One module per dashboard screen. Each `show` renders into the central
//! panel and records what the user did as [`UiAction`]s for the reducer.
//!
//! [`UiAction`]: crate::controller::reducer::UiAction

pub mod enrolment_form;
pub mod enrolments;
pub mod help_orders;
pub mod student_form;
pub mod students;
