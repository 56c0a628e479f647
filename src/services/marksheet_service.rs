//! 成绩单服务 - 业务能力层
//!
//! 取学生档案和成绩，交给 `marksheet::summarize` 汇总

use tracing::info;

use crate::clients::ApiClient;
use crate::error::Result;
use crate::marksheet::{summarize, MarkRecord, Summary};
use crate::models::StudentMarksheet;
use crate::session::SessionCtx;

pub struct MarksheetService {
    client: ApiClient,
}

impl MarksheetService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 加载某个学生的成绩单
    pub async fn load(&self, session: &SessionCtx, roll_number: &str) -> Result<StudentMarksheet> {
        let roll_number = roll_number.trim();
        let student = self.client.get_student(session, roll_number).await?;
        let marks = self.client.marks_by_roll(session, roll_number).await?;

        let records: Vec<MarkRecord> = marks.iter().map(MarkRecord::from).collect();
        let summary = summarize(&records);

        match &summary {
            Summary::NoData => info!("[学号 {}] 暂无成绩", roll_number),
            Summary::Sheet(sheet) => info!(
                "[学号 {}] ✓ 成绩单: {} 科, 总分 {}/{}",
                roll_number,
                sheet.rows.len(),
                sheet.total_marks,
                sheet.total_max_marks
            ),
        }

        Ok(StudentMarksheet { student, summary })
    }
}
