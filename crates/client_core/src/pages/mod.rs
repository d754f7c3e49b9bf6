//! Screen state shared by the admin dashboard and the student companion:
//! list/pagination/dialog/toast primitives plus one module per screen.

pub mod confirm;
pub mod controller;
pub mod enrolments;
pub mod form;
pub mod help_orders;
pub mod list;
pub mod pagination;
pub mod students;
pub mod toast;

pub use confirm::ConfirmDialog;
pub use controller::{DeletableResource, ListController, ListResource};
pub use form::{FormErrors, SaveError};
pub use list::{FetchOutcome, FetchTicket, ListBody, ListPage, Listed, LoadState};
pub use pagination::Pagination;
pub use toast::{Toast, ToastLevel, Toasts};
