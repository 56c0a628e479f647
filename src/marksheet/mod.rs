//! 成绩单聚合（纯计算，无 I/O）
//!
//! - `grade` - 百分比 → 等级
//! - `summarize` - 科目成绩列表 → 成绩单（逐科 + 合计）

pub mod grade;
pub mod summary;

pub use grade::{grade, Grade, GRADE_BANDS};
pub use summary::{percentage, summarize, MarkRecord, Marksheet, MarksheetRow, Summary};
