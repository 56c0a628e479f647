pub mod marks;
pub mod report;
pub mod student;
pub mod user;

pub use marks::{MarksEntry, MarksForm};
pub use report::{ClassPerformance, Reports, SubjectPerformance, TopPerformer};
pub use student::{Student, StudentForm, StudentMarksheet, StudentOption};
pub use user::{Role, Token, User};
