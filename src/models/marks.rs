use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::marksheet::MarkRecord;
use crate::models::student::StudentOption;

/// 成绩记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarksEntry {
    /// 后端生成的记录ID，提交时不携带
    #[serde(rename = "_id", default, skip_serializing)]
    pub id: Option<String>,
    /// 学生学号
    pub student_id: String,
    pub subject: String,
    pub marks: f64,
    pub max_marks: f64,
    #[serde(default, deserialize_with = "deserialize_exam_date")]
    pub exam_date: Option<DateTime<Utc>>,
    /// 仅列表接口返回
    #[serde(default, skip_serializing)]
    pub student_name: Option<String>,
}

impl From<&MarksEntry> for MarkRecord {
    fn from(entry: &MarksEntry) -> Self {
        MarkRecord::new(entry.subject.clone(), entry.marks, entry.max_marks)
    }
}

/// 后端可能返回带时区的 RFC 3339，也可能返回不带时区的时间（按 UTC 处理）
fn deserialize_exam_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// 成绩表单
#[derive(Debug, Clone, PartialEq)]
pub struct MarksForm {
    /// 下拉框中选中的学生
    pub student: Option<StudentOption>,
    pub subject: String,
    pub marks: f64,
    pub max_marks: f64,
}

impl MarksForm {
    /// 校验表单并生成待提交的成绩记录
    ///
    /// 分数与满分保留两位小数，考试日期取 `now`。
    pub fn validate(&self, now: DateTime<Utc>) -> Result<MarksEntry, ValidationError> {
        let roll_number = self
            .student
            .as_ref()
            .map(|s| s.roll_number.trim())
            .filter(|r| !r.is_empty())
            .ok_or(ValidationError::NoStudentSelected)?;

        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if !self.marks.is_finite() || self.marks < 0.0 {
            return Err(ValidationError::InvalidMarks { value: self.marks });
        }
        if !self.max_marks.is_finite() || self.max_marks <= 0.0 {
            return Err(ValidationError::InvalidMaxMarks {
                value: self.max_marks,
            });
        }
        if self.marks > self.max_marks {
            return Err(ValidationError::MarksExceedMax {
                marks: self.marks,
                max_marks: self.max_marks,
            });
        }

        // 极大的有限值放大 100 倍后会溢出
        let marks = round2(self.marks);
        if !marks.is_finite() {
            return Err(ValidationError::InvalidMarks { value: self.marks });
        }
        let max_marks = round2(self.max_marks);
        if !max_marks.is_finite() {
            return Err(ValidationError::InvalidMaxMarks {
                value: self.max_marks,
            });
        }

        Ok(MarksEntry {
            id: None,
            student_id: roll_number.to_string(),
            subject: subject.to_string(),
            marks,
            max_marks,
            exam_date: Some(now),
            student_name: None,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
