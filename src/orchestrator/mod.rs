//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一条命令)
//!     ↓
//! workflow::Dashboard (会话 + 权限)
//!     ↓
//! services (能力层：auth / students / marks / marksheet / reports)
//!     ↓
//! clients::ApiClient (基础设施：HTTP)
//! ```
//!
//! 纯计算（`marksheet`）和展示（`render`）不依赖以上任何一层。

pub mod app;

pub use app::{App, CommandOutput};
