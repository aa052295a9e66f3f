pub mod models;
pub mod pii;

pub use models::{Member, Venue};
pub use pii::Masked;
