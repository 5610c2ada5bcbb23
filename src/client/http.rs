use crate::client::tracker::AnalyticsSink;
use crate::client::ClientError;
use crate::models::{HeartbeatRequest, RecordPageViewRequest};
use async_trait::async_trait;
use serde::Serialize;

/// 서버의 `/api/v1/analytics/*` 엔드포인트로 이벤트를 보내는 sink
#[derive(Debug, Clone)]
pub struct HttpAnalytics {
    client: reqwest::Client,
    /// 예: `"https://markdown-site.fly.dev"` (끝의 `/` 없이 저장)
    base_url: String,
}

impl HttpAnalytics {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// 타임아웃 등을 설정한 클라이언트를 직접 넘길 때 사용합니다.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/api/v1/analytics/{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalyticsSink for HttpAnalytics {
    async fn record_page_view(&self, event: RecordPageViewRequest) -> Result<(), ClientError> {
        self.post_json("page-view", &event).await
    }

    async fn heartbeat(&self, event: HeartbeatRequest) -> Result<(), ClientError> {
        self.post_json("heartbeat", &event).await
    }
}
