//! 展示层：把数据渲染成纯文本表格
//!
//! 这里的函数都只返回 `String`，不做任何输出。

pub mod marksheet;
pub mod records;
pub mod table;

pub use marksheet::{render_marksheet, render_printable};
pub use records::{
    render_marks, render_profile, render_reports, render_student, render_students,
};
pub use table::Table;
