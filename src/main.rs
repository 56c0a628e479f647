use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use marksheet_client::cli::Cli;
use marksheet_client::{App, CommandOutput};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化并运行应用；启动失败同样只输出一条错误提示
    let output = match App::from_cli(&cli) {
        Ok(mut app) => app.run(cli.command).await,
        Err(e) => CommandOutput::from_error(&e),
    };

    if let Some(text) = &output.text {
        writeln!(std::io::stdout().lock(), "{}", text).context("写入标准输出失败")?;
    }
    eprintln!("{}", output.notice);

    if output.notice.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
