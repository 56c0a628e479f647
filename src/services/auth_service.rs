//! 认证服务 - 业务能力层
//!
//! 只负责"登录 / 登出"能力：换取令牌、查询用户、建立会话

use tracing::{debug, info};

use crate::clients::ApiClient;
use crate::error::{AppError, AuthError, Result};
use crate::session::SessionCtx;

/// 认证服务
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    /// 创建新的认证服务
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 登录并建立会话
    ///
    /// 用户名为空白或密码为空时直接拒绝，不发请求。
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionCtx> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        debug!("正在登录: {}", username);

        let token = match self.client.issue_token(username, password).await {
            Err(AppError::Auth(AuthError::Unauthorized { .. })) => {
                return Err(AuthError::InvalidCredentials.into())
            }
            other => other?,
        };

        let user = self.client.get_user_with_token(&token, username).await?;
        let session = SessionCtx::new(user, token);

        info!("✓ 登录成功 {}", session);
        Ok(session)
    }

    /// 结束会话
    pub fn logout(&self, session: SessionCtx) {
        info!("👋 已登出 {}", session);
    }
}
