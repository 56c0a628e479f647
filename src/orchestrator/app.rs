//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：输出启动信息、创建 API 客户端和仪表盘
//! 2. **命令分发**：登录 → 执行一条命令 → 登出
//! 3. **错误收口**：命令失败只转换成一条错误提示，不向上抛出
//!
//! 不做具体业务判断，只做调度和输出。

use chrono::Local;
use tracing::{error, info};

use crate::cli::{Cli, Command, MarksCommand, StudentsCommand};
use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::StudentForm;
use crate::render;
use crate::services::MarksheetWriter;
use crate::utils::logging::{self, log_startup};
use crate::workflow::{Dashboard, MarksInput, Notice};

/// 一条命令的输出
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// 写到标准输出的内容
    pub text: Option<String>,
    pub notice: Notice,
}

impl CommandOutput {
    fn text(text: String, notice: Notice) -> Self {
        Self {
            text: Some(text),
            notice,
        }
    }

    fn notice(notice: Notice) -> Self {
        Self { text: None, notice }
    }

    /// 任何阶段的失败都收口为一条错误提示
    pub fn from_error(err: &AppError) -> Self {
        Self::notice(Notice::from_error(err))
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    dashboard: Dashboard,
    writer: MarksheetWriter,
}

impl App {
    /// 按命令行启动：加载配置 → 初始化日志 → 初始化应用
    ///
    /// 配置优先级：默认值 → 配置文件 → 环境变量 → 命令行
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = cli.apply(Config::load(cli.config.as_deref())?);
        logging::init(config.verbose_logging);
        Self::initialize(config)
    }

    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = ApiClient::new(&config)?;
        let writer = MarksheetWriter::new(&config.output_dir);

        Ok(Self {
            config,
            dashboard: Dashboard::new(client),
            writer,
        })
    }

    /// 执行一条命令
    ///
    /// 无论成功与否，结束时都会登出。
    pub async fn run(&mut self, command: Command) -> CommandOutput {
        let result = self.execute(command).await;
        self.dashboard.logout();

        match result {
            Ok(output) => output,
            Err(e) => {
                error!("❌ 命令执行失败: {}", e);
                CommandOutput::from_error(&e)
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Result<CommandOutput> {
        let (username, password) = self.config.credentials()?;
        let (username, password) = (username.to_string(), password.to_string());
        self.dashboard.login(&username, &password).await?;

        let dashboard = &self.dashboard;
        let output = match command {
            Command::Me => {
                let profile = dashboard.profile().await?;
                CommandOutput::text(
                    render::render_profile(&profile.user, profile.marksheet.as_ref()),
                    Notice::success(format!("欢迎, {}", profile.user.full_name)),
                )
            }
            Command::Marksheet { roll, print, out } => {
                let sheet = dashboard.marksheet(roll.as_deref()).await?;
                let text = format!(
                    "{}\n{}",
                    render::render_student(&sheet.student),
                    render::render_marksheet(&sheet.summary)
                );
                let notice = if let Some(path) = out {
                    self.writer.write_to(&path, &sheet, Local::now()).await?;
                    Notice::success(format!("成绩单已保存至 {}", path.display()))
                } else if print {
                    let path = self.writer.write(&sheet, Local::now()).await?;
                    Notice::success(format!("成绩单已保存至 {}", path.display()))
                } else {
                    Notice::success(format!("已加载 {} 的成绩单", sheet.student.name))
                };
                CommandOutput::text(text, notice)
            }
            Command::Students(cmd) => match cmd {
                StudentsCommand::List => {
                    let students = dashboard.list_students().await?;
                    let notice = Notice::success(format!("共 {} 名学生", students.len()));
                    CommandOutput::text(render::render_students(&students), notice)
                }
                StudentsCommand::Show { roll } => {
                    let student = dashboard.student(&roll).await?;
                    CommandOutput::text(
                        render::render_student(&student),
                        Notice::success(format!("已加载学生 {}", student.roll_number)),
                    )
                }
                StudentsCommand::Save(args) => {
                    let form = StudentForm {
                        name: args.name,
                        roll_number: args.roll,
                        class_name: args.class_name,
                        section: args.section,
                    };
                    CommandOutput::notice(dashboard.save_student(&form).await?)
                }
                StudentsCommand::Delete { roll } => {
                    CommandOutput::notice(dashboard.delete_student(&roll).await?)
                }
            },
            Command::Marks(cmd) => match cmd {
                MarksCommand::List => {
                    let marks = dashboard.list_marks().await?;
                    let notice = Notice::success(format!("共 {} 条成绩", marks.len()));
                    CommandOutput::text(render::render_marks(&marks), notice)
                }
                MarksCommand::Show { id } => {
                    let entry = dashboard.marks_entry(&id).await?;
                    CommandOutput::text(
                        render::render_marks(std::slice::from_ref(&entry)),
                        Notice::success(format!("已加载成绩 {}", id)),
                    )
                }
                MarksCommand::Save(args) => {
                    let input = MarksInput {
                        roll_number: args.roll,
                        subject: args.subject,
                        marks: args.marks,
                        max_marks: args.max_marks,
                    };
                    CommandOutput::notice(
                        dashboard.save_marks(&input, args.id.as_deref()).await?,
                    )
                }
                MarksCommand::Delete { id } => {
                    CommandOutput::notice(dashboard.delete_marks(&id).await?)
                }
            },
            Command::Reports => {
                let reports = dashboard.reports().await?;
                CommandOutput::text(
                    render::render_reports(&reports),
                    Notice::success("报表已加载"),
                )
            }
        };

        info!("✓ {}", output.notice.message);
        Ok(output)
    }
}
