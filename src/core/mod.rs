pub mod activity;
pub mod challenge;
pub mod dates;
pub mod meal;
pub mod profile;
pub mod status;
pub mod streak;
pub mod trend;
pub mod water_cache;
