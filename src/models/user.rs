use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "管理员"),
            Role::Student => write!(f, "学生"),
        }
    }
}

/// 登录用户；学生账号的用户名即学号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub disabled: Option<bool>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// `/token` 的响应
#[derive(Clone, PartialEq, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

// 不在日志里输出令牌
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .finish()
    }
}
