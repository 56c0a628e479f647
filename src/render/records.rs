//! 学生、成绩、报表、个人信息的表格渲染

use crate::models::{MarksEntry, Reports, Student, StudentMarksheet, User};
use crate::render::marksheet::{format_percentage, render_marksheet};
use crate::render::table::Table;

const NOT_AVAILABLE: &str = "N/A";
const NO_DATA: &str = "暂无数据";

pub fn render_students(students: &[Student]) -> String {
    let mut table = Table::new(["学号", "姓名", "班级", "组别"]);
    for s in students {
        table.row([
            s.roll_number.as_str(),
            s.name.as_str(),
            s.class_name.as_str(),
            s.section.as_str(),
        ]);
    }
    render_or_no_data(&table)
}

pub fn render_student(student: &Student) -> String {
    format!(
        "姓名: {}\n学号: {}\n班级: {}\n组别: {}\n",
        student.name, student.roll_number, student.class_name, student.section
    )
}

pub fn render_marks(marks: &[MarksEntry]) -> String {
    let mut table = Table::new(["记录ID", "学号", "姓名", "科目", "得分", "满分", "考试日期"]);
    for m in marks {
        table.row([
            m.id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            m.student_id.clone(),
            m.student_name
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            m.subject.clone(),
            m.marks.to_string(),
            m.max_marks.to_string(),
            m.exam_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ]);
    }
    render_or_no_data(&table)
}

fn render_or_no_data(table: &Table) -> String {
    if table.is_empty() {
        format!("{}\n", NO_DATA)
    } else {
        table.render()
    }
}

/// 三张报表依次输出
pub fn render_reports(reports: &Reports) -> String {
    let mut class_table = Table::new(["班级", "平均分", "学生人数", "及格率"]);
    for c in &reports.class_performance {
        class_table.row([
            label(&c.class_name),
            format!("{:.2}", c.average_score),
            c.total_students.to_string(),
            format_percentage(Some(c.pass_rate * 100.0)),
        ]);
    }

    let mut subject_table = Table::new(["科目", "平均分", "最高分", "最低分"]);
    for s in &reports.subject_performance {
        subject_table.row([
            label(&s.subject),
            format!("{:.2}", s.average_score),
            s.highest_score.to_string(),
            s.lowest_score.to_string(),
        ]);
    }

    let mut top_table = Table::new(["姓名", "班级", "平均分"]);
    for t in &reports.top_performers {
        top_table.row([
            label(&t.student_name),
            label(&t.class_name),
            format!("{:.2}", t.average_score),
        ]);
    }

    format!(
        "【班级表现】\n{}\n【科目表现】\n{}\n【优秀学生】\n{}",
        class_table.render(),
        subject_table.render(),
        render_or_no_data(&top_table)
    )
}

/// 个人信息；学生账号附带成绩单
pub fn render_profile(user: &User, marksheet: Option<&StudentMarksheet>) -> String {
    let mut out = format!(
        "用户名: {}\n姓名: {}\n邮箱: {}\n角色: {}\n",
        user.username, user.full_name, user.email, user.role
    );
    if let Some(sheet) = marksheet {
        out.push('\n');
        out.push_str(&render_student(&sheet.student));
        out.push('\n');
        out.push_str(&render_marksheet(&sheet.summary));
    }
    out
}

fn label(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
