//! 学生服务 - 业务能力层
//!
//! 学生档案的查询、保存、删除。学号是唯一的对外标识。

use tracing::info;

use crate::clients::{ApiClient, ApiMessage};
use crate::error::Result;
use crate::models::{Student, StudentForm, StudentOption};
use crate::services::SaveOutcome;
use crate::session::SessionCtx;

/// 学生服务
pub struct StudentService {
    client: ApiClient,
}

impl StudentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, session: &SessionCtx) -> Result<Vec<Student>> {
        let students = self.client.list_students(session).await?;
        info!("✓ 已加载 {} 名学生", students.len());
        Ok(students)
    }

    pub async fn get(&self, session: &SessionCtx, roll_number: &str) -> Result<Student> {
        self.client.get_student(session, roll_number.trim()).await
    }

    /// 保存学生
    ///
    /// 学号已存在则按学号更新，否则新增。
    pub async fn save(
        &self,
        session: &SessionCtx,
        form: &StudentForm,
    ) -> Result<(SaveOutcome, Student)> {
        let student = form.validate()?;

        let existing = self.client.list_students(session).await?;
        let exists = existing
            .iter()
            .any(|s| s.roll_number == student.roll_number);

        let (outcome, saved) = if exists {
            info!("[学号 {}] 更新学生档案", student.roll_number);
            let saved = self
                .client
                .update_student(session, &student.roll_number, &student)
                .await?;
            (SaveOutcome::Updated, saved)
        } else {
            info!("[学号 {}] 新增学生档案", student.roll_number);
            let saved = self.client.create_student(session, &student).await?;
            (SaveOutcome::Created, saved)
        };

        Ok((outcome, saved))
    }

    /// 按学号删除学生及其成绩
    pub async fn delete(&self, session: &SessionCtx, roll_number: &str) -> Result<ApiMessage> {
        let roll_number = roll_number.trim();
        let message = self.client.delete_student(session, roll_number).await?;
        info!("[学号 {}] 已删除", roll_number);
        Ok(message)
    }

    /// 生成下拉选项
    pub fn options(students: &[Student]) -> Vec<StudentOption> {
        students.iter().map(StudentOption::from).collect()
    }
}
