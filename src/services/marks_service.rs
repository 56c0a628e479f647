//! 成绩服务 - 业务能力层
//!
//! 单条成绩记录的增删改查。记录本身用后端ID定位，
//! 某个学生的全部成绩用学号定位。

use chrono::Utc;
use tracing::info;

use crate::clients::{ApiClient, ApiMessage};
use crate::error::Result;
use crate::models::{MarksEntry, MarksForm};
use crate::services::SaveOutcome;
use crate::session::SessionCtx;

/// 成绩服务
pub struct MarksService {
    client: ApiClient,
}

impl MarksService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, session: &SessionCtx) -> Result<Vec<MarksEntry>> {
        let marks = self.client.list_marks(session).await?;
        info!("✓ 已加载 {} 条成绩", marks.len());
        Ok(marks)
    }

    pub async fn get(&self, session: &SessionCtx, marks_id: &str) -> Result<MarksEntry> {
        self.client.get_marks(session, marks_id).await
    }

    /// 保存成绩
    ///
    /// 传入 `marks_id` 时更新该记录，否则新增。
    pub async fn save(
        &self,
        session: &SessionCtx,
        form: &MarksForm,
        marks_id: Option<&str>,
    ) -> Result<SaveOutcome> {
        let entry = form.validate(Utc::now())?;

        match marks_id {
            Some(id) => {
                self.client.update_marks(session, id, &entry).await?;
                info!(
                    "[学号 {}] 已更新成绩 {} ({}: {}/{})",
                    entry.student_id, id, entry.subject, entry.marks, entry.max_marks
                );
                Ok(SaveOutcome::Updated)
            }
            None => {
                self.client.add_marks(session, &entry).await?;
                info!(
                    "[学号 {}] 已新增成绩 ({}: {}/{})",
                    entry.student_id, entry.subject, entry.marks, entry.max_marks
                );
                Ok(SaveOutcome::Created)
            }
        }
    }

    pub async fn delete(&self, session: &SessionCtx, marks_id: &str) -> Result<ApiMessage> {
        let message = self.client.delete_marks(session, marks_id).await?;
        info!("已删除成绩 {}", marks_id);
        Ok(message)
    }

    /// 某个学生的全部成绩
    pub async fn for_student(
        &self,
        session: &SessionCtx,
        roll_number: &str,
    ) -> Result<Vec<MarksEntry>> {
        self.client.marks_by_roll(session, roll_number).await
    }
}
