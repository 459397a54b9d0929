pub mod errors;
pub mod fortune;
pub mod upstreams;

// Re-exports
pub use errors::{FetchError, GenerationError};
pub use fortune::{ApodEntry, DailyFortune, MediaType, Notice, NoticeLevel};
