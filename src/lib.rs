//! # Marksheet Client
//!
//! 学生成绩管理系统的命令行客户端：登录、学生与成绩的增删改查、成绩单、统计报表
//!
//! ## 架构设计
//!
//! ### ① 纯计算（Core）
//! - `marksheet/` - 等级换算 `grade` 与成绩单汇总 `summarize`，无任何 I/O
//!
//! ### ② 基础设施层（Infrastructure）
//! - `clients/` - `ApiClient`，唯一持有 HTTP 客户端，每个后端接口一个方法
//! - `session` - `SessionCtx`，登录后的用户与令牌，鉴权请求显式传入
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只负责一种能力
//! - `AuthService` / `StudentService` / `MarksService` / `MarksheetService` / `ReportService`
//! - `MarksheetWriter` - 打印成绩单到文件
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - `Dashboard` 持有会话并按角色放行，`Notice` 为用户可见提示
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - `App`，登录 → 执行命令 → 登出，失败统一收口为提示
//!
//! ### 展示层
//! - `render/` - 纯文本表格渲染
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod marksheet;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod session;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ApiClient;
pub use config::Config;
pub use error::{AppError, Result};
pub use marksheet::{grade, summarize, Grade, MarkRecord, Marksheet, Summary};
pub use orchestrator::{App, CommandOutput};
pub use session::SessionCtx;
pub use workflow::{Dashboard, Notice};
