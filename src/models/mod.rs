pub mod challenge;
pub mod config;
pub mod trend;
pub mod user;

pub use challenge::Challenge;
pub use trend::{DailyTrend, FoodEntry};
pub use user::UserProfile;
