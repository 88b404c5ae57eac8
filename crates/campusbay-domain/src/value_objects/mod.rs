//! Domain value objects.

mod availability;
mod category;
mod email;
mod listing;

pub use availability::*;
pub use category::*;
pub use email::*;
pub use listing::*;
