mod common;

use marksheet_client::cli::{Command, StudentsCommand};
use marksheet_client::App;

use common::{spawn, Backend};

#[tokio::test]
async fn test_marksheet_command_writes_file() {
    let (url, _) = spawn(Backend::seeded()).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("asha.txt");

    let mut app = App::initialize(common::config(&url, "admin", "admin123")).unwrap();
    let output = app
        .run(Command::Marksheet {
            roll: Some("R001".to_string()),
            print: false,
            out: Some(out.clone()),
        })
        .await;

    assert!(!output.notice.is_error(), "{}", output.notice);
    let text = output.text.unwrap();
    assert!(text.contains("English"));
    assert!(text.contains("合计"));

    let printed = std::fs::read_to_string(&out).unwrap();
    assert!(printed.contains("Asha Rao"));
    assert!(printed.contains("83.33"));
}

#[tokio::test]
async fn test_print_goes_to_output_dir() {
    let (url, _) = spawn(Backend::seeded()).await;
    let dir = tempfile::tempdir().unwrap();

    let mut config = common::config(&url, "R002", "R002");
    config.output_dir = dir.path().join("sheets").display().to_string();

    let mut app = App::initialize(config).unwrap();
    let output = app
        .run(Command::Marksheet {
            roll: None,
            print: true,
            out: None,
        })
        .await;
    assert!(!output.notice.is_error(), "{}", output.notice);

    let files: Vec<_> = std::fs::read_dir(dir.path().join("sheets"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("marksheet_R002_"));
}

#[tokio::test]
async fn test_bad_login_becomes_error_notice() {
    let (url, _) = spawn(Backend::seeded()).await;

    let mut app = App::initialize(common::config(&url, "admin", "nope")).unwrap();
    let output = app.run(Command::Reports).await;

    assert!(output.notice.is_error());
    assert!(output.text.is_none());
    assert!(output.notice.message.contains("用户名或密码错误"));
}

#[tokio::test]
async fn test_server_detail_reaches_notice() {
    let (url, _) = spawn(Backend::seeded()).await;

    let mut app = App::initialize(common::config(&url, "admin", "admin123")).unwrap();
    let output = app
        .run(Command::Students(StudentsCommand::Delete {
            roll: "R404".to_string(),
        }))
        .await;

    assert!(output.notice.is_error());
    assert_eq!(output.notice.message, "Student not found");
}

#[tokio::test]
async fn test_students_list_renders_table() {
    let (url, _) = spawn(Backend::seeded()).await;

    let mut app = App::initialize(common::config(&url, "admin", "admin123")).unwrap();
    let output = app.run(Command::Students(StudentsCommand::List)).await;

    assert_eq!(output.notice.message, "共 2 名学生");
    let text = output.text.unwrap();
    assert!(text.contains("Ravi Kumar"));

    // 同一个 App 可以连续执行命令，每次重新登录
    let output = app.run(Command::Reports).await;
    assert_eq!(output.notice.message, "报表已加载");
    assert!(output.text.unwrap().contains("【优秀学生】"));
}

#[tokio::test]
async fn test_startup_failure_becomes_error_notice() {
    use clap::Parser;
    use marksheet_client::cli::Cli;
    use marksheet_client::CommandOutput;

    let cli = Cli::try_parse_from(["marksheet", "--api-url", "not a url", "reports"]).unwrap();
    let err = match App::from_cli(&cli) {
        Ok(_) => panic!("无效的接口地址应导致启动失败"),
        Err(e) => e,
    };

    let output = CommandOutput::from_error(&err);
    assert!(output.notice.is_error());
    assert!(output.text.is_none());
    assert!(output.notice.message.contains("无效的接口地址"));
}
