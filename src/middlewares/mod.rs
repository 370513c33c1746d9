pub mod existence;
pub mod timeout;
pub mod validation;

pub use existence::ensure_exists;
pub use timeout::request_timeout_layer;
pub use validation::{BodyPolicy, Choice, Valid, ValidatedBody};
