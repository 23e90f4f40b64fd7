// HTTP routes
pub mod health;
pub mod sites;

pub use health::*;
pub use sites::*;
