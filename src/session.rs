//! 登录会话上下文
//!
//! 封装"当前是谁、用哪个令牌"这一信息。只能由登录成功创建，
//! 所有需要鉴权的请求都显式接收它。

use std::fmt::Display;

use crate::models::{Role, Token, User};

/// 登录会话
#[derive(Debug, Clone)]
pub struct SessionCtx {
    user: User,
    token: Token,
}

impl SessionCtx {
    /// 创建新的会话
    pub fn new(user: User, token: Token) -> Self {
        Self { user, token }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    /// Bearer 令牌
    pub fn bearer(&self) -> &str {
        &self.token.access_token
    }
}

impl Display for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[用户 {} ({})]", self.user.username, self.user.role)
    }
}
