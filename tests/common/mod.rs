//! 进程内的假后端，行为与成绩管理系统的 REST 接口一致

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use marksheet_client::Config;

pub struct Account {
    pub username: String,
    pub password: String,
    pub profile: Value,
}

#[derive(Default)]
pub struct Backend {
    pub accounts: Vec<Account>,
    pub students: Vec<Value>,
    pub marks: Vec<Value>,
    /// 写操作记录，例如 `PUT /students/by-roll/R001`
    pub writes: Vec<String>,
    next_id: u64,
}

pub type Shared = Arc<Mutex<Backend>>;

impl Backend {
    /// 一个管理员、两名学生、三条成绩
    pub fn seeded() -> Self {
        let mut backend = Backend::default();
        backend.account("admin", "admin123", "Admin User", "admin");
        backend.account("R001", "R001", "Asha Rao", "student");
        backend.account("R002", "R002", "Ravi Kumar", "student");

        backend.insert_student(json!({
            "name": "Asha Rao", "roll_number": "R001", "class_name": "10", "section": "B", "subjects": {}
        }));
        backend.insert_student(json!({
            "name": "Ravi Kumar", "roll_number": "R002", "class_name": "10", "section": "A", "subjects": {}
        }));

        backend.insert_marks(json!({
            "student_id": "R001", "subject": "English", "marks": 80.0, "max_marks": 100.0,
            "exam_date": "2024-03-01T09:30:00"
        }));
        backend.insert_marks(json!({
            "student_id": "R001", "subject": "Math", "marks": 45.0, "max_marks": 50.0,
            "exam_date": "2024-03-02T09:30:00"
        }));
        backend.insert_marks(json!({
            "student_id": "R002", "subject": "Science", "marks": 30.0, "max_marks": 50.0,
            "exam_date": "2024-03-02T09:30:00"
        }));
        backend
    }

    fn account(&mut self, username: &str, password: &str, full_name: &str, role: &str) {
        self.accounts.push(Account {
            username: username.to_string(),
            password: password.to_string(),
            profile: json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "full_name": full_name,
                "role": role,
                "disabled": false
            }),
        });
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn insert_student(&mut self, mut student: Value) -> Value {
        student["_id"] = json!(self.next_id("s"));
        self.students.push(student.clone());
        student
    }

    fn insert_marks(&mut self, mut marks: Value) -> Value {
        marks["_id"] = json!(self.next_id("m"));
        self.marks.push(marks.clone());
        marks
    }

    pub fn marks_for(&self, roll: &str) -> Vec<Value> {
        self.marks
            .iter()
            .filter(|m| m["student_id"] == roll)
            .cloned()
            .collect()
    }
}

/// 启动假后端，返回基地址
pub async fn spawn(backend: Backend) -> (String, Shared) {
    let shared = Arc::new(Mutex::new(backend));
    let app = router(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), shared)
}

pub fn config(base_url: &str, username: &str, password: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        username: Some(username.to_string()),
        password: Some(password.to_string()),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

fn router(shared: Shared) -> Router {
    Router::new()
        .route("/token", post(token))
        .route("/users/{username}", get(get_user))
        .route("/students/", get(list_students).post(create_student))
        .route("/students/{id}", get(get_student))
        .route(
            "/students/by-roll/{roll}",
            axum::routing::put(update_student).delete(delete_student),
        )
        .route("/marks/", get(list_marks).post(add_marks))
        .route("/marks/id/{id}", get(get_marks))
        .route(
            "/marks/{id}",
            axum::routing::put(update_marks).delete(delete_marks),
        )
        .route("/marks/by-roll/{roll}", get(marks_by_roll))
        .route("/reports/class-performance", get(class_performance))
        .route("/reports/subject-performance", get(subject_performance))
        .route("/reports/top-performers", get(top_performers))
        .with_state(shared)
}

// ── 鉴权 ───────────────────────────────────────────────────────────

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn current_user(backend: &Backend, headers: &HeaderMap) -> Result<Value, Response> {
    let unauthorized = || detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    let username = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer token-"))
        .ok_or_else(unauthorized)?;
    backend
        .accounts
        .iter()
        .find(|a| a.username == username)
        .map(|a| a.profile.clone())
        .ok_or_else(unauthorized)
}

fn require_admin(backend: &Backend, headers: &HeaderMap) -> Result<Value, Response> {
    let user = current_user(backend, headers)?;
    if user["role"] != "admin" {
        return Err(detail(StatusCode::FORBIDDEN, "Not authorized"));
    }
    Ok(user)
}

// ── 认证 ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn token(State(shared): State<Shared>, Form(form): Form<LoginForm>) -> Response {
    let backend = shared.lock().unwrap();
    let ok = backend
        .accounts
        .iter()
        .any(|a| a.username == form.username && a.password == form.password);
    if !ok {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    }
    Json(json!({ "access_token": format!("token-{}", form.username), "token_type": "bearer" }))
        .into_response()
}

async fn get_user(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> Response {
    let backend = shared.lock().unwrap();
    let user = match current_user(&backend, &headers) {
        Ok(u) => u,
        Err(r) => return r,
    };
    if user["username"] != username.as_str() && user["role"] != "admin" {
        return detail(StatusCode::FORBIDDEN, "Not authorized to view this user");
    }
    match backend.accounts.iter().find(|a| a.username == username) {
        Some(a) => Json(a.profile.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "User not found"),
    }
}

// ── 学生 ───────────────────────────────────────────────────────────

async fn list_students(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    Json(backend.students.clone()).into_response()
}

async fn create_student(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    backend.writes.push("POST /students/".to_string());
    Json(backend.insert_student(body)).into_response()
}

async fn get_student(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let backend = shared.lock().unwrap();
    let user = match current_user(&backend, &headers) {
        Ok(u) => u,
        Err(r) => return r,
    };
    let student = backend
        .students
        .iter()
        .find(|s| s["_id"] == id.as_str() || s["roll_number"] == id.as_str());
    match student {
        None => detail(StatusCode::NOT_FOUND, "Student not found"),
        Some(s) if user["role"] == "student" && s["roll_number"] != user["username"] => {
            detail(StatusCode::FORBIDDEN, "Not authorized to view this student")
        }
        Some(s) => Json(s.clone()).into_response(),
    }
}

async fn update_student(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(roll): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    backend.writes.push(format!("PUT /students/by-roll/{}", roll));
    match backend
        .students
        .iter_mut()
        .find(|s| s["roll_number"] == roll.as_str())
    {
        Some(existing) => {
            body["_id"] = existing["_id"].clone();
            *existing = body.clone();
            Json(body).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Student not found"),
    }
}

async fn delete_student(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(roll): Path<String>,
) -> Response {
    let mut backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    backend.writes.push(format!("DELETE /students/by-roll/{}", roll));
    let before = backend.students.len();
    backend.students.retain(|s| s["roll_number"] != roll.as_str());
    if backend.students.len() == before {
        return detail(StatusCode::NOT_FOUND, "Student not found");
    }
    backend.marks.retain(|m| m["student_id"] != roll.as_str());
    Json(json!({ "message": "Student and related marks deleted successfully" })).into_response()
}

// ── 成绩 ───────────────────────────────────────────────────────────

async fn list_marks(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    let marks: Vec<Value> = backend
        .marks
        .iter()
        .map(|m| {
            let name = backend
                .students
                .iter()
                .find(|s| s["roll_number"] == m["student_id"])
                .map(|s| s["name"].clone())
                .unwrap_or_else(|| json!("Unknown Student"));
            let mut m = m.clone();
            m["student_name"] = name;
            m
        })
        .collect();
    Json(marks).into_response()
}

async fn add_marks(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    let roll = body["student_id"].as_str().unwrap_or_default().to_string();
    if !backend.students.iter().any(|s| s["roll_number"] == roll.as_str()) {
        return detail(
            StatusCode::NOT_FOUND,
            &format!("Student with roll number {} not found", roll),
        );
    }
    backend.writes.push("POST /marks/".to_string());
    Json(backend.insert_marks(body)).into_response()
}

async fn get_marks(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let backend = shared.lock().unwrap();
    if let Err(r) = current_user(&backend, &headers) {
        return r;
    }
    match backend.marks.iter().find(|m| m["_id"] == id.as_str()) {
        Some(m) => Json(m.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Marks not found"),
    }
}

async fn update_marks(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    backend.writes.push(format!("PUT /marks/{}", id));
    match backend.marks.iter_mut().find(|m| m["_id"] == id.as_str()) {
        Some(existing) => {
            body["_id"] = json!(id);
            *existing = body;
            Json(json!({ "message": "Marks updated successfully" })).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Marks record not found"),
    }
}

async fn delete_marks(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    backend.writes.push(format!("DELETE /marks/{}", id));
    let before = backend.marks.len();
    backend.marks.retain(|m| m["_id"] != id.as_str());
    if backend.marks.len() == before {
        return detail(StatusCode::NOT_FOUND, "Marks record not found");
    }
    Json(json!({ "message": "Marks deleted successfully" })).into_response()
}

async fn marks_by_roll(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(roll): Path<String>,
) -> Response {
    let backend = shared.lock().unwrap();
    let user = match current_user(&backend, &headers) {
        Ok(u) => u,
        Err(r) => return r,
    };
    if user["role"] == "student" && user["username"] != roll.as_str() {
        return detail(StatusCode::FORBIDDEN, "Not authorized to view these marks");
    }
    Json(backend.marks_for(&roll)).into_response()
}

// ── 报表 ───────────────────────────────────────────────────────────

async fn class_performance(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    Json(json!([
        { "_id": "10", "total_students": 2, "average_score": 51.666666, "pass_rate": 0.6666666 }
    ]))
    .into_response()
}

async fn subject_performance(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    Json(json!([
        { "_id": "English", "average_score": 80.0, "highest_score": 80.0, "lowest_score": 80.0, "total_students": 1, "pass_rate": 1.0 },
        { "_id": "Math", "average_score": 45.0, "highest_score": 45.0, "lowest_score": 45.0, "total_students": 1, "pass_rate": 1.0 },
        { "_id": "Science", "average_score": 30.0, "highest_score": 30.0, "lowest_score": 30.0, "total_students": 1, "pass_rate": 0.0 }
    ]))
    .into_response()
}

async fn top_performers(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let backend = shared.lock().unwrap();
    if let Err(r) = require_admin(&backend, &headers) {
        return r;
    }
    Json(json!([
        { "_id": "R001", "student_name": "Asha Rao", "class_name": "10", "average_score": 62.5, "total_marks": 125.0, "subjects_count": 2 },
        { "_id": "R002", "student_name": "Ravi Kumar", "class_name": "10", "average_score": 30.0, "total_marks": 30.0, "subjects_count": 1 }
    ]))
    .into_response()
}
