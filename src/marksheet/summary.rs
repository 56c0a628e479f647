//! 成绩单汇总
//!
//! 合计行是对各科分数、满分的直接求和，总百分比 = 总分 / 总满分，
//! 不是各科百分比的平均值。满分无效的科目仍计入合计，但不参与总百分比。

use serde::{Deserialize, Serialize};

use super::grade::{grade, Grade};

/// 单科成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkRecord {
    pub subject: String,
    pub marks: f64,
    pub max_marks: f64,
}

impl MarkRecord {
    pub fn new(subject: impl Into<String>, marks: f64, max_marks: f64) -> Self {
        Self {
            subject: subject.into(),
            marks,
            max_marks,
        }
    }
}

/// 成绩单中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarksheetRow {
    pub subject: String,
    pub marks: f64,
    pub max_marks: f64,
    /// 满分不是正数时无定义
    pub percentage: Option<f64>,
    pub grade: Option<Grade>,
}

/// 成绩单
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marksheet {
    pub rows: Vec<MarksheetRow>,
    pub total_marks: f64,
    pub total_max_marks: f64,
    /// 只按有百分比的科目计算；没有这样的科目时无定义
    pub total_percentage: Option<f64>,
    pub overall_grade: Option<Grade>,
    /// 满分无效、未计入总百分比的科目数
    pub excluded_rows: usize,
}

/// 汇总结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "marksheet", rename_all = "snake_case")]
pub enum Summary {
    /// 没有任何成绩
    NoData,
    Sheet(Marksheet),
}

impl Summary {
    pub fn sheet(&self) -> Option<&Marksheet> {
        match self {
            Summary::NoData => None,
            Summary::Sheet(sheet) => Some(sheet),
        }
    }
}

/// 得分率（%）；分母不是有限正数时返回 None
pub fn percentage(marks: f64, max_marks: f64) -> Option<f64> {
    if !(max_marks.is_finite() && max_marks > 0.0) {
        return None;
    }
    let p = marks / max_marks * 100.0;
    p.is_finite().then_some(p)
}

/// 汇总成绩单
pub fn summarize(records: &[MarkRecord]) -> Summary {
    if records.is_empty() {
        return Summary::NoData;
    }

    let rows: Vec<MarksheetRow> = records
        .iter()
        .map(|r| {
            let percentage = percentage(r.marks, r.max_marks);
            MarksheetRow {
                subject: r.subject.clone(),
                marks: r.marks,
                max_marks: r.max_marks,
                percentage,
                grade: percentage.map(grade),
            }
        })
        .collect();

    let total_marks: f64 = rows.iter().map(|r| r.marks).sum();
    let total_max_marks: f64 = rows.iter().map(|r| r.max_marks).sum();

    let (graded_marks, graded_max) = rows
        .iter()
        .filter(|r| r.percentage.is_some())
        .fold((0.0, 0.0), |(m, x), r| (m + r.marks, x + r.max_marks));
    let total_percentage = percentage(graded_marks, graded_max);
    let excluded_rows = rows.iter().filter(|r| r.percentage.is_none()).count();

    Summary::Sheet(Marksheet {
        rows,
        total_marks,
        total_max_marks,
        total_percentage,
        overall_grade: total_percentage.map(grade),
        excluded_rows,
    })
}
