//! kucharka-ui library - recipe list controller and its backend calls

pub mod alerts;
pub mod calls;
pub mod controller;
pub mod http;
pub mod identity;

pub use alerts::{Alert, AlertQueue, Priority, ALERT_SUCCESS_DURATION};
pub use calls::{BackendCallError, BackendCalls};
pub use controller::{ModalState, RecipeController, FILTER_FIELDS, PAGE_SIZE, TEXT_FILTER};
pub use http::HttpCalls;
pub use identity::Identity;
