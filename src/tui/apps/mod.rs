pub mod form_app;

pub use form_app::{FormApp, FormParams};
