pub mod ai;
pub mod apod;
