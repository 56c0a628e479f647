//! 成绩单打印服务 - 业务能力层
//!
//! 只负责把渲染好的成绩单写成文本文件，不关心数据从哪来

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::StudentMarksheet;
use crate::render::marksheet::render_printable;

/// 成绩单打印服务
pub struct MarksheetWriter {
    output_dir: PathBuf,
}

impl MarksheetWriter {
    /// 创建新的打印服务
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写入输出目录，文件名由学号和时间生成
    pub async fn write(&self, sheet: &StudentMarksheet, now: DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let path = self.output_dir.join(file_name(&sheet.student.roll_number, now));
        self.write_to(&path, sheet, now).await?;
        Ok(path)
    }

    /// 写入指定文件
    pub async fn write_to(
        &self,
        path: &Path,
        sheet: &StudentMarksheet,
        now: DateTime<Local>,
    ) -> Result<()> {
        let content = render_printable(sheet, now);
        debug!("写入成绩单: {} ({} 字节)", path.display(), content.len());

        fs::write(path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
    }
}

/// `marksheet_<学号>_<时间>.txt`，学号中的非字母数字字符替换为 `_`
fn file_name(roll_number: &str, now: DateTime<Local>) -> String {
    let safe: String = roll_number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("marksheet_{}_{}.txt", safe, now.format("%Y%m%d_%H%M%S"))
}
