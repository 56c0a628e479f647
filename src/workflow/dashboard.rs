//! 仪表盘流程 - 流程层
//!
//! 核心职责：持有会话，按角色放行操作，编排各个业务能力
//!
//! - 登录建立会话，登出清除会话
//! - 学生账号只能看自己的档案和成绩单
//! - 学生 / 成绩的增删改、报表、查看他人成绩单需要管理员
//! - 不持有 HTTP 客户端之外的任何资源

use tracing::{info, warn};

use crate::clients::ApiClient;
use crate::error::{AuthError, Result, ValidationError};
use crate::models::{
    MarksEntry, MarksForm, Reports, Student, StudentForm, StudentMarksheet, StudentOption, User,
};
use crate::services::{
    AuthService, MarksService, MarksheetService, ReportService, SaveOutcome, StudentService,
};
use crate::session::SessionCtx;
use crate::workflow::notice::Notice;

/// 个人信息：学生账号附带自己的成绩单
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub marksheet: Option<StudentMarksheet>,
}

/// 成绩表单的输入（学号而不是下拉选项）
#[derive(Debug, Clone, PartialEq)]
pub struct MarksInput {
    pub roll_number: String,
    pub subject: String,
    pub marks: f64,
    pub max_marks: f64,
}

/// 仪表盘
pub struct Dashboard {
    auth: AuthService,
    students: StudentService,
    marks: MarksService,
    marksheets: MarksheetService,
    reports: ReportService,
    session: Option<SessionCtx>,
}

impl Dashboard {
    /// 创建新的仪表盘（未登录）
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            students: StudentService::new(client.clone()),
            marks: MarksService::new(client.clone()),
            marksheets: MarksheetService::new(client.clone()),
            reports: ReportService::new(client),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&SessionCtx> {
        self.session.as_ref()
    }

    // ========== 会话 ==========

    /// 登录；已有会话时先登出
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&SessionCtx> {
        self.logout();
        let session = self.auth.login(username, password).await?;
        Ok(self.session.insert(session))
    }

    /// 登出，返回之前是否处于登录状态
    pub fn logout(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.auth.logout(session);
                true
            }
            None => false,
        }
    }

    fn require_session(&self) -> Result<&SessionCtx> {
        self.session
            .as_ref()
            .ok_or_else(|| AuthError::NotLoggedIn.into())
    }

    fn require_admin(&self) -> Result<&SessionCtx> {
        let session = self.require_session()?;
        if !session.is_admin() {
            warn!("{} 尝试执行管理员操作", session);
            return Err(AuthError::AdminRequired.into());
        }
        Ok(session)
    }

    // ========== 个人信息 / 成绩单 ==========

    /// 当前用户信息；学生账号同时加载自己的成绩单
    pub async fn profile(&self) -> Result<Profile> {
        let session = self.require_session()?;
        let marksheet = if session.is_admin() {
            None
        } else {
            Some(self.marksheets.load(session, session.username()).await?)
        };
        Ok(Profile {
            user: session.user().clone(),
            marksheet,
        })
    }

    /// 查看成绩单
    ///
    /// 不指定学号时查看自己的（仅学生账号）；指定他人学号需要管理员。
    pub async fn marksheet(&self, roll_number: Option<&str>) -> Result<StudentMarksheet> {
        let session = self.require_session()?;
        let roll_number = match roll_number.map(str::trim) {
            Some(roll) if roll == session.username() => roll,
            Some(roll) => {
                self.require_admin()?;
                roll
            }
            None if session.is_admin() => return Err(ValidationError::NoStudentSelected.into()),
            None => session.username(),
        };
        self.marksheets.load(session, roll_number).await
    }

    // ========== 学生 ==========

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        let session = self.require_admin()?;
        self.students.list(session).await
    }

    pub async fn student(&self, roll_number: &str) -> Result<Student> {
        let session = self.require_session()?;
        if roll_number.trim() != session.username() {
            self.require_admin()?;
        }
        self.students.get(session, roll_number).await
    }

    /// 成绩表单用的学生下拉选项
    pub async fn student_options(&self) -> Result<Vec<StudentOption>> {
        let students = self.list_students().await?;
        Ok(StudentService::options(&students))
    }

    pub async fn save_student(&self, form: &StudentForm) -> Result<Notice> {
        let session = self.require_admin()?;
        let (outcome, saved) = self.students.save(session, form).await?;
        Ok(Notice::success(format!(
            "学生 {} ({}) 已{}",
            saved.name,
            saved.roll_number,
            outcome.verb()
        )))
    }

    pub async fn delete_student(&self, roll_number: &str) -> Result<Notice> {
        let session = self.require_admin()?;
        self.students.delete(session, roll_number).await?;
        Ok(Notice::success(format!(
            "学生 {} 及其成绩已删除",
            roll_number.trim()
        )))
    }

    // ========== 成绩 ==========

    pub async fn list_marks(&self) -> Result<Vec<MarksEntry>> {
        let session = self.require_admin()?;
        self.marks.list(session).await
    }

    pub async fn marks_entry(&self, marks_id: &str) -> Result<MarksEntry> {
        let session = self.require_admin()?;
        self.marks.get(session, marks_id).await
    }

    /// 保存成绩
    ///
    /// 学号先在学生列表中定位到下拉选项，再走表单校验。
    pub async fn save_marks(&self, input: &MarksInput, marks_id: Option<&str>) -> Result<Notice> {
        let session = self.require_admin()?;

        let roll_number = input.roll_number.trim();
        if roll_number.is_empty() {
            return Err(ValidationError::NoStudentSelected.into());
        }
        let options = StudentService::options(&self.students.list(session).await?);
        let student = options
            .into_iter()
            .find(|o| o.roll_number == roll_number)
            .ok_or_else(|| ValidationError::UnknownStudent {
                roll_number: roll_number.to_string(),
            })?;

        info!("[学号 {}] 保存成绩: {}", student.roll_number, student.label);

        let form = MarksForm {
            student: Some(student),
            subject: input.subject.clone(),
            marks: input.marks,
            max_marks: input.max_marks,
        };
        let outcome: SaveOutcome = self.marks.save(session, &form, marks_id).await?;
        Ok(Notice::success(format!("成绩已{}", outcome.verb())))
    }

    pub async fn delete_marks(&self, marks_id: &str) -> Result<Notice> {
        let session = self.require_admin()?;
        self.marks.delete(session, marks_id).await?;
        Ok(Notice::success("成绩已删除"))
    }

    // ========== 报表 ==========

    pub async fn reports(&self) -> Result<Reports> {
        let session = self.require_admin()?;
        self.reports.load_all(session).await
    }
}
