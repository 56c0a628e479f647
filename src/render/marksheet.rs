use chrono::{DateTime, Local};

use crate::marksheet::{Grade, Summary};
use crate::models::StudentMarksheet;
use crate::render::table::Table;

pub const NO_MARKS: &str = "暂无成绩";

/// 成绩单表格：逐科一行，末尾为合计行
pub fn render_marksheet(summary: &Summary) -> String {
    let sheet = match summary {
        Summary::NoData => return format!("{}\n", NO_MARKS),
        Summary::Sheet(sheet) => sheet,
    };

    let mut table = Table::new(["科目", "得分", "满分", "百分比", "等级"]);
    for row in &sheet.rows {
        table.row([
            row.subject.clone(),
            row.marks.to_string(),
            row.max_marks.to_string(),
            format_percentage(row.percentage),
            format_grade(row.grade),
        ]);
    }
    table.footer([
        "合计".to_string(),
        sheet.total_marks.to_string(),
        sheet.total_max_marks.to_string(),
        format_percentage(sheet.total_percentage),
        format_grade(sheet.overall_grade),
    ]);

    let mut rendered = table.render();
    if sheet.excluded_rows > 0 {
        rendered.push_str(&format!(
            "注: {} 个科目满分无效，未计入总百分比\n",
            sheet.excluded_rows
        ));
    }
    rendered
}

/// 可打印的成绩单：学生信息 + 成绩表
pub fn render_printable(sheet: &StudentMarksheet, generated_at: DateTime<Local>) -> String {
    let student = &sheet.student;
    let rule = "=".repeat(48);
    format!(
        "{rule}\n学生成绩单\n{rule}\n姓名: {}\n学号: {}\n班级: {}\n组别: {}\n\n{}\n打印时间: {}\n",
        student.name,
        student.roll_number,
        student.class_name,
        student.section,
        render_marksheet(&sheet.summary),
        generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

pub(crate) fn format_percentage(percentage: Option<f64>) -> String {
    percentage
        .map(|p| format!("{:.2}%", p))
        .unwrap_or_else(|| "-".to_string())
}

fn format_grade(grade: Option<Grade>) -> String {
    grade
        .map(|g| g.to_string())
        .unwrap_or_else(|| "-".to_string())
}
