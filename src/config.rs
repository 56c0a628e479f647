use crate::error::{AppError, ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 后端 API 地址
    pub api_base_url: String,
    /// 登录用户名
    pub username: Option<String>,
    /// 登录密码
    pub password: Option<String>,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 打印成绩单的输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            username: None,
            password: None,
            request_timeout_secs: 30,
            output_dir: "marksheets".to_string(),
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件，所有字段可选，缺省时沿用已有值
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    request_timeout_secs: Option<u64>,
    output_dir: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载配置：默认值 → 配置文件（可选）→ 环境变量
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => Self::from_toml_file(p)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// 从 TOML 文件加载，未出现的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::default().merge_toml(&content, &path.display().to_string())
    }

    fn merge_toml(self, content: &str, origin: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            })?;

        Ok(Self {
            api_base_url: file.api_base_url.unwrap_or(self.api_base_url),
            username: file.username.or(self.username),
            password: file.password.or(self.password),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(self.request_timeout_secs),
            output_dir: file.output_dir.unwrap_or(self.output_dir),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        })
    }

    /// 用环境变量覆盖当前配置
    ///
    /// `lookup` 一般为 `std::env::var`，测试时可替换。
    pub fn with_env<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_base_url: lookup("MARKSHEET_API_URL").unwrap_or(self.api_base_url),
            username: lookup("MARKSHEET_USERNAME").or(self.username),
            password: lookup("MARKSHEET_PASSWORD").or(self.password),
            request_timeout_secs: parse_env(&lookup, "MARKSHEET_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            output_dir: lookup("MARKSHEET_OUTPUT_DIR").unwrap_or(self.output_dir),
            verbose_logging: parse_env(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
        })
    }

    /// 取出登录凭据
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let username = self.username.as_deref().ok_or_else(|| ConfigError::Missing {
            name: "username".to_string(),
        })?;
        let password = self.password.as_deref().ok_or_else(|| ConfigError::Missing {
            name: "password".to_string(),
        })?;
        Ok((username, password))
    }
}

fn parse_env<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}
