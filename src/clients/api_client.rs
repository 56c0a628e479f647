/// 成绩管理后端 API 客户端
///
/// 封装所有与后端 REST 接口相关的调用逻辑，是唯一持有 HTTP 客户端的地方。
use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AuthError, Result};
use crate::models::{
    ClassPerformance, MarksEntry, Student, SubjectPerformance, Token, TopPerformer, User,
};
use crate::session::SessionCtx;
use crate::utils::logging::truncate_text;

/// 删除 / 更新类接口的响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// 后端 API 客户端
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ApiError::InvalidUrl {
                url: config.api_base_url.clone(),
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(base_url.as_str(), e))?;

        Ok(Self { http, base_url })
    }

    // ========== 认证 ==========

    /// 用户名密码换取访问令牌
    pub async fn issue_token(&self, username: &str, password: &str) -> Result<Token> {
        let url = self.url(&["token"])?;
        let request = self
            .http
            .post(url.clone())
            .form(&[("username", username), ("password", password)]);
        self.send(request, &url).await
    }

    /// 查询用户信息
    pub async fn get_user(&self, session: &SessionCtx, username: &str) -> Result<User> {
        self.get(session, &["users", username]).await
    }

    /// 用刚拿到的令牌查询用户信息（会话尚未建立时使用）
    pub async fn get_user_with_token(&self, token: &Token, username: &str) -> Result<User> {
        let url = self.url(&["users", username])?;
        let request = self.http.get(url.clone()).bearer_auth(&token.access_token);
        self.send(request, &url).await
    }

    // ========== 学生 ==========

    pub async fn list_students(&self, session: &SessionCtx) -> Result<Vec<Student>> {
        self.get(session, &["students", ""]).await
    }

    pub async fn create_student(&self, session: &SessionCtx, student: &Student) -> Result<Student> {
        let url = self.url(&["students", ""])?;
        let request = self.http.post(url.clone()).json(student);
        self.send_authed(session, request, &url).await
    }

    /// 按学号查询学生
    pub async fn get_student(&self, session: &SessionCtx, roll_number: &str) -> Result<Student> {
        self.get(session, &["students", roll_number]).await
    }

    /// 按学号更新学生
    pub async fn update_student(
        &self,
        session: &SessionCtx,
        roll_number: &str,
        student: &Student,
    ) -> Result<Student> {
        let url = self.url(&["students", "by-roll", roll_number])?;
        let request = self.http.put(url.clone()).json(student);
        self.send_authed(session, request, &url).await
    }

    /// 按学号删除学生（后端会一并删除其成绩）
    pub async fn delete_student(&self, session: &SessionCtx, roll_number: &str) -> Result<ApiMessage> {
        let url = self.url(&["students", "by-roll", roll_number])?;
        let request = self.http.delete(url.clone());
        self.send_authed(session, request, &url).await
    }

    // ========== 成绩 ==========

    pub async fn list_marks(&self, session: &SessionCtx) -> Result<Vec<MarksEntry>> {
        self.get(session, &["marks", ""]).await
    }

    pub async fn add_marks(&self, session: &SessionCtx, entry: &MarksEntry) -> Result<MarksEntry> {
        let url = self.url(&["marks", ""])?;
        let request = self.http.post(url.clone()).json(entry);
        self.send_authed(session, request, &url).await
    }

    /// 按记录ID查询单条成绩
    pub async fn get_marks(&self, session: &SessionCtx, marks_id: &str) -> Result<MarksEntry> {
        self.get(session, &["marks", "id", marks_id]).await
    }

    pub async fn update_marks(
        &self,
        session: &SessionCtx,
        marks_id: &str,
        entry: &MarksEntry,
    ) -> Result<ApiMessage> {
        let url = self.url(&["marks", marks_id])?;
        let request = self.http.put(url.clone()).json(entry);
        self.send_authed(session, request, &url).await
    }

    pub async fn delete_marks(&self, session: &SessionCtx, marks_id: &str) -> Result<ApiMessage> {
        let url = self.url(&["marks", marks_id])?;
        let request = self.http.delete(url.clone());
        self.send_authed(session, request, &url).await
    }

    /// 按学号查询该学生的全部成绩
    pub async fn marks_by_roll(
        &self,
        session: &SessionCtx,
        roll_number: &str,
    ) -> Result<Vec<MarksEntry>> {
        self.get(session, &["marks", "by-roll", roll_number]).await
    }

    // ========== 报表 ==========

    pub async fn class_performance(&self, session: &SessionCtx) -> Result<Vec<ClassPerformance>> {
        self.get(session, &["reports", "class-performance"]).await
    }

    pub async fn subject_performance(
        &self,
        session: &SessionCtx,
    ) -> Result<Vec<SubjectPerformance>> {
        self.get(session, &["reports", "subject-performance"]).await
    }

    pub async fn top_performers(&self, session: &SessionCtx) -> Result<Vec<TopPerformer>> {
        self.get(session, &["reports", "top-performers"]).await
    }

    // ========== 内部方法 ==========

    /// 拼接接口地址，路径段会被转义
    ///
    /// 末尾的空段对应带斜杠的路径，例如 `["students", ""]` → `/students/`。
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, session: &SessionCtx, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        let request = self.http.get(url.clone());
        self.send_authed(session, request, &url).await
    }

    async fn send_authed<T: DeserializeOwned>(
        &self,
        session: &SessionCtx,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T> {
        self.send(request.bearer_auth(session.bearer()), url).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<T> {
        let endpoint = url.path().to_string();
        debug!("请求接口: {}", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        debug!(
            "接口响应 {} ({}): {}",
            endpoint,
            status.as_u16(),
            truncate_text(&body, 200)
        );

        if !status.is_success() {
            let detail = extract_detail(&body);
            warn!(
                "接口返回错误 {} ({}): {}",
                endpoint,
                status.as_u16(),
                detail.as_deref().unwrap_or("-")
            );
            if status == StatusCode::UNAUTHORIZED {
                return Err(AuthError::Unauthorized { endpoint, detail }.into());
            }
            return Err(ApiError::BadResponse {
                endpoint,
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        serde_json::from_str(&body)
            .map_err(|source| ApiError::JsonParseFailed { endpoint, source }.into())
    }
}

/// 提取后端错误响应中的 `detail`
///
/// 字符串直接返回；参数校验失败时是数组，原样转成 JSON 文本。
/// 非 JSON 的响应体截断后返回。
pub fn extract_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        },
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| truncate_text(trimmed, 200))
        }
    }
}
