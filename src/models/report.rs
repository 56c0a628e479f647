//! 统计报表接口的响应结构
//!
//! 后端用 `_id` 作为分组键，缺失的数值字段按 0 处理。

use serde::{Deserialize, Serialize};

/// 班级表现
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPerformance {
    #[serde(rename = "_id", default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub total_students: u64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub average_score: f64,
    /// 0..=1
    #[serde(default, deserialize_with = "nullable_f64")]
    pub pass_rate: f64,
}

/// 科目表现
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPerformance {
    #[serde(rename = "_id", default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub average_score: f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub highest_score: f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub lowest_score: f64,
    #[serde(default)]
    pub total_students: u64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub pass_rate: f64,
}

/// 优秀学生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    /// 学号
    #[serde(rename = "_id", default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub average_score: f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub total_marks: f64,
    #[serde(default)]
    pub subjects_count: u64,
}

/// 三张报表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reports {
    pub class_performance: Vec<ClassPerformance>,
    pub subject_performance: Vec<SubjectPerformance>,
    pub top_performers: Vec<TopPerformer>,
}

// 聚合结果里可能出现 `null`
fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
