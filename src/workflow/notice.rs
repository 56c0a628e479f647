//! 用户可见的提示消息
//!
//! 所有失败都在这里收口：一次捕获，转换成一条错误提示。

use std::fmt::Display;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// 提示消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// 有服务端 detail 时优先展示 detail
    pub fn from_error(err: &AppError) -> Self {
        let message = err
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        Self::error(message)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NoticeKind::Success => write!(f, "✅ {}", self.message),
            NoticeKind::Error => write!(f, "❌ {}", self.message),
        }
    }
}
