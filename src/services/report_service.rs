//! 报表服务 - 业务能力层
//!
//! 三张报表一起请求，任意一张失败则整体失败

use futures::future::try_join3;
use tracing::info;

use crate::clients::ApiClient;
use crate::error::Result;
use crate::models::Reports;
use crate::session::SessionCtx;

pub struct ReportService {
    client: ApiClient,
}

impl ReportService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 加载班级、科目、优秀学生三张报表
    pub async fn load_all(&self, session: &SessionCtx) -> Result<Reports> {
        let (class_performance, subject_performance, top_performers) = try_join3(
            self.client.class_performance(session),
            self.client.subject_performance(session),
            self.client.top_performers(session),
        )
        .await?;

        info!(
            "✓ 报表已加载: 班级 {} 个, 科目 {} 个, 优秀学生 {} 名",
            class_performance.len(),
            subject_performance.len(),
            top_performers.len()
        );

        Ok(Reports {
            class_performance,
            subject_performance,
            top_performers,
        })
    }
}
