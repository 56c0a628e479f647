//! 命令行参数

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

/// 学生成绩管理客户端
#[derive(Parser, Debug)]
#[command(name = "marksheet", about = "学生成绩管理客户端", version)]
pub struct Cli {
    /// TOML 配置文件
    #[arg(long, env = "MARKSHEET_CONFIG")]
    pub config: Option<PathBuf>,

    /// 后端 API 地址（覆盖配置）
    #[arg(long)]
    pub api_url: Option<String>,

    /// 登录用户名（覆盖配置）
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// 登录密码（覆盖配置）
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// 显示详细日志
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// 命令行参数最后覆盖配置
    pub fn apply(&self, config: Config) -> Config {
        Config {
            api_base_url: self.api_url.clone().unwrap_or(config.api_base_url),
            username: self.username.clone().or(config.username),
            password: self.password.clone().or(config.password),
            verbose_logging: self.verbose || config.verbose_logging,
            ..config
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 查看个人信息（学生账号附带成绩单）
    Me,
    /// 查看成绩单
    Marksheet {
        /// 学号；学生账号可省略
        #[arg(long)]
        roll: Option<String>,
        /// 打印到输出目录
        #[arg(long, default_value_t = false)]
        print: bool,
        /// 打印到指定文件
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// 学生管理
    #[command(subcommand)]
    Students(StudentsCommand),
    /// 成绩管理
    #[command(subcommand)]
    Marks(MarksCommand),
    /// 统计报表
    Reports,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum StudentsCommand {
    /// 学生列表
    List,
    /// 查看学生
    Show {
        #[arg(long)]
        roll: String,
    },
    /// 新增或更新学生（按学号）
    Save(StudentArgs),
    /// 删除学生及其成绩
    Delete {
        #[arg(long)]
        roll: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct StudentArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub roll: String,
    #[arg(long = "class")]
    pub class_name: String,
    #[arg(long)]
    pub section: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum MarksCommand {
    /// 全部成绩
    List,
    /// 查看单条成绩
    Show {
        #[arg(long)]
        id: String,
    },
    /// 新增成绩；指定 --id 时更新
    Save(MarksArgs),
    /// 删除成绩
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct MarksArgs {
    /// 要更新的记录ID
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub roll: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub marks: f64,
    #[arg(long)]
    pub max_marks: f64,
}
