pub mod health;
pub mod matches;
pub mod stats;
pub mod utils;

pub use health::health;
