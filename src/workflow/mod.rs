pub mod dashboard;
pub mod notice;

pub use dashboard::{Dashboard, MarksInput, Profile};
pub use notice::{Notice, NoticeKind};
