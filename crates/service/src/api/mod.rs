pub mod documents;
pub mod health;

pub use documents::{generate_document, save_parameters};
pub use health::health_check;
