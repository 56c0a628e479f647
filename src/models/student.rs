use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::marksheet::Summary;

/// 学生档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// 后端生成的记录ID，提交时不携带
    #[serde(rename = "_id", default, skip_serializing)]
    pub id: Option<String>,
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    #[serde(default)]
    pub subjects: Map<String, Value>,
}

/// 学生表单（新增与修改共用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentForm {
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
}

impl StudentForm {
    /// 去除首尾空白并校验必填项
    pub fn validate(&self) -> Result<Student, ValidationError> {
        let name = self.name.trim();
        let roll_number = self.roll_number.trim();
        let class_name = self.class_name.trim();
        let section = self.section.trim();

        if [name, roll_number, class_name, section]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ValidationError::MissingStudentFields);
        }

        Ok(Student {
            id: None,
            name: name.to_string(),
            roll_number: roll_number.to_string(),
            class_name: class_name.to_string(),
            section: section.to_string(),
            subjects: Map::new(),
        })
    }
}

/// 学生下拉选项
///
/// 学号作为独立字段保存，不从显示文字里解析。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentOption {
    pub id: Option<String>,
    pub roll_number: String,
    pub label: String,
}

impl From<&Student> for StudentOption {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            roll_number: student.roll_number.clone(),
            label: format!("{} ({})", student.name, student.roll_number),
        }
    }
}

/// 某个学生的成绩单
#[derive(Debug, Clone, PartialEq)]
pub struct StudentMarksheet {
    pub student: Student,
    pub summary: Summary,
}
