mod fortune;

pub use fortune::{FortuneView, NoticeView};
