pub mod party;

pub use party::{Member, Venue};
