use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 登录 / 权限错误
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 表单校验错误
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（含超时）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非 2xx 响应
    #[error("API返回错误响应 ({endpoint}): status={status}, detail={}", .detail.as_deref().unwrap_or("-"))]
    BadResponse {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 无效的接口地址
    #[error("无效的接口地址: {url}")]
    InvalidUrl { url: String },
}

/// 登录 / 权限错误
#[derive(Debug, Error)]
pub enum AuthError {
    /// 用户名或密码错误
    #[error("用户名或密码错误")]
    InvalidCredentials,
    /// 用户名或密码为空
    #[error("用户名和密码不能为空")]
    MissingCredentials,
    /// 未登录
    #[error("尚未登录")]
    NotLoggedIn,
    /// 需要管理员权限
    #[error("该操作需要管理员权限")]
    AdminRequired,
    /// 令牌失效或服务端拒绝
    #[error("登录已失效 ({endpoint}): {}", .detail.as_deref().unwrap_or("-"))]
    Unauthorized {
        endpoint: String,
        detail: Option<String>,
    },
}

/// 表单校验错误
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// 学生表单存在空字段
    #[error("所有字段均为必填项")]
    MissingStudentFields,
    /// 未选择学生
    #[error("请选择学生")]
    NoStudentSelected,
    /// 学号不在学生列表中
    #[error("学号 {roll_number} 不存在")]
    UnknownStudent { roll_number: String },
    /// 科目为空
    #[error("科目不能为空")]
    MissingSubject,
    /// 分数无效
    #[error("请输入有效的分数: {value}")]
    InvalidMarks { value: f64 },
    /// 满分无效
    #[error("请输入有效的满分: {value}")]
    InvalidMaxMarks { value: f64 },
    /// 分数大于满分
    #[error("分数 {marks} 不能大于满分 {max_marks}")]
    MarksExceedMax { marks: f64, max_marks: f64 },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 缺少必需的配置项
    #[error("缺少配置项: {name}")]
    Missing { name: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 服务端返回的 detail 信息（如果有）
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Api(ApiError::BadResponse { detail, .. })
            | AppError::Auth(AuthError::Unauthorized { detail, .. }) => detail.as_deref(),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
