pub mod auth_service;
pub mod marks_service;
pub mod marksheet_service;
pub mod marksheet_writer;
pub mod report_service;
pub mod student_service;

pub use auth_service::AuthService;
pub use marks_service::MarksService;
pub use marksheet_service::MarksheetService;
pub use marksheet_writer::MarksheetWriter;
pub use report_service::ReportService;
pub use student_service::StudentService;

/// 保存操作的结果：新增还是更新
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn verb(self) -> &'static str {
        match self {
            SaveOutcome::Created => "新增",
            SaveOutcome::Updated => "更新",
        }
    }
}
