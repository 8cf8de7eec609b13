// HTTP routes
pub mod careers;
pub mod health;
pub mod jobs;

pub use careers::*;
pub use health::*;
pub use jobs::*;
