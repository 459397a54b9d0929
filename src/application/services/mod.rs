pub mod fortune;
pub mod sessions;

pub use fortune::FortuneService;
pub use sessions::{SessionId, SessionStore};
