//! # 페이지뷰 / 하트비트 트래커
//!
//! 페이지를 옮길 때마다 `track(path)`를 호출합니다.
//!
//! ```text
//! track("/a")
//!   ├─ 경로가 바뀌었으면 page-view 이벤트 1건
//!   ├─ 즉시 heartbeat 시도 (디바운스 규칙 적용)
//!   └─ 기존 30초 타이머 취소 → "/a"용 새 타이머 시작
//! ```
//!
//! ## 하트비트 디바운스
//! - 이전 하트비트가 아직 전송 중이면 건너뜁니다.
//! - 같은 경로로 5초 안에 보낸 적이 있으면 건너뜁니다.
//!
//! 모든 전송은 fire-and-forget입니다. 실패는 debug 로그만 남기고 무시합니다.
//! `track()`은 tokio 런타임 안에서 호출해야 합니다 (`tokio::spawn` 사용).

use crate::client::ClientError;
use crate::models::{HeartbeatRequest, PageType, RecordPageViewRequest};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// 같은 경로에 머무는 동안 하트비트를 보내는 주기
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
/// 같은 경로로 하트비트를 다시 보내기까지의 최소 간격
pub const HEARTBEAT_DEBOUNCE: Duration = Duration::from_secs(5);

/// 트래커 이벤트를 받는 쪽
///
/// 실제 구현은 `HttpAnalytics`이고, 테스트에서는 기록용 sink를 넣습니다.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record_page_view(&self, event: RecordPageViewRequest) -> Result<(), ClientError>;
    async fn heartbeat(&self, event: HeartbeatRequest) -> Result<(), ClientError>;
}

/// 트래커 하나가 소유하는 하트비트 디바운스 상태
#[derive(Debug, Default)]
pub struct HeartbeatState {
    pending: bool,
    last_sent_at: Option<Instant>,
    last_path: Option<String>,
}

impl HeartbeatState {
    /// 지금 `path`로 하트비트를 보내도 되는지 판단합니다.
    ///
    /// 보내도 되면 전송 중(pending)으로 표시하고 true를 반환합니다.
    /// 전송이 끝나면 반드시 `finish()`를 호출해야 합니다.
    pub fn try_begin(&mut self, path: &str, now: Instant) -> bool {
        if self.pending {
            return false;
        }
        let recently_sent = self
            .last_sent_at
            .is_some_and(|sent| now.saturating_duration_since(sent) < HEARTBEAT_DEBOUNCE);
        if recently_sent && self.last_path.as_deref() == Some(path) {
            return false;
        }

        self.pending = true;
        self.last_sent_at = Some(now);
        self.last_path = Some(path.to_string());
        true
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

fn lock(state: &Mutex<HeartbeatState>) -> MutexGuard<'_, HeartbeatState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct PageTracker {
    sink: Arc<dyn AnalyticsSink>,
    session_id: String,
    heartbeat: Arc<Mutex<HeartbeatState>>,
    last_recorded_path: Option<String>,
    interval: Option<JoinHandle<()>>,
}

impl PageTracker {
    /// # 매개변수
    /// - `sink`: 이벤트를 보낼 곳
    /// - `session_id`: 보통 `SessionIdStore::get_or_create()`의 결과
    pub fn new(sink: Arc<dyn AnalyticsSink>, session_id: impl Into<String>) -> Self {
        Self {
            sink,
            session_id: session_id.into(),
            heartbeat: Arc::new(Mutex::new(HeartbeatState::default())),
            last_recorded_path: None,
            interval: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// 현재 경로를 알립니다.
    pub fn track(&mut self, path: &str) {
        if self.last_recorded_path.as_deref() != Some(path) {
            self.last_recorded_path = Some(path.to_string());

            let event = RecordPageViewRequest {
                path: path.to_string(),
                page_type: PageType::from_path(path),
                session_id: self.session_id.clone(),
            };
            let sink = Arc::clone(&self.sink);
            tokio::spawn(async move {
                if let Err(e) = sink.record_page_view(event).await {
                    tracing::debug!("Page view not recorded: {}", e);
                }
            });
        }

        send_heartbeat(&self.sink, &self.heartbeat, &self.session_id, path);

        // 이전 경로의 타이머를 멈추고 현재 경로용 타이머를 새로 겁니다.
        self.cleanup();
        let sink = Arc::clone(&self.sink);
        let heartbeat = Arc::clone(&self.heartbeat);
        let session_id = self.session_id.clone();
        let path = path.to_string();
        self.interval = Some(tokio::spawn(async move {
            // interval_at: 첫 tick도 30초 뒤 (즉시 한 번 보내는 건 위에서 이미 했음)
            let mut ticker =
                tokio::time::interval_at(Instant::now() + HEARTBEAT_INTERVAL, HEARTBEAT_INTERVAL);
            loop {
                ticker.tick().await;
                send_heartbeat(&sink, &heartbeat, &session_id, &path);
            }
        }));
    }

    /// 반복 타이머를 멈춥니다. 이미 전송 중인 하트비트는 끝까지 진행됩니다.
    pub fn cleanup(&mut self) {
        if let Some(handle) = self.interval.take() {
            handle.abort();
        }
    }
}

impl Drop for PageTracker {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// 디바운스 규칙을 통과하면 하트비트를 별도 태스크로 보냅니다.
///
/// 전송은 타이머 태스크와 분리된 태스크에서 실행되므로,
/// 타이머가 abort되어도 `finish()`는 호출됩니다.
fn send_heartbeat(
    sink: &Arc<dyn AnalyticsSink>,
    state: &Arc<Mutex<HeartbeatState>>,
    session_id: &str,
    path: &str,
) {
    // 잠금은 이 블록 안에서만 잡고, .await 전에 풀립니다.
    if !lock(state).try_begin(path, Instant::now()) {
        return;
    }

    let event = HeartbeatRequest {
        session_id: session_id.to_string(),
        current_path: path.to_string(),
    };
    let sink = Arc::clone(sink);
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let result = sink.heartbeat(event).await;
        lock(&state).finish();
        if let Err(e) = result {
            tracing::debug!("Heartbeat failed: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 호출을 기록하는 sink. `delay`만큼 하트비트 응답을 늦추고, `fail`이면 에러를 돌려줍니다.
    #[derive(Default)]
    struct RecordingSink {
        page_views: Mutex<Vec<RecordPageViewRequest>>,
        heartbeats: Mutex<Vec<HeartbeatRequest>>,
        delay: Option<Duration>,
        fail: bool,
    }

    impl RecordingSink {
        fn page_views(&self) -> Vec<RecordPageViewRequest> {
            self.page_views.lock().unwrap().clone()
        }

        fn heartbeat_paths(&self) -> Vec<String> {
            self.heartbeats
                .lock()
                .unwrap()
                .iter()
                .map(|h| h.current_path.clone())
                .collect()
        }
    }

    #[async_trait]
    impl AnalyticsSink for RecordingSink {
        async fn record_page_view(&self, event: RecordPageViewRequest) -> Result<(), ClientError> {
            self.page_views.lock().unwrap().push(event);
            if self.fail {
                return Err(ClientError::Status(503));
            }
            Ok(())
        }

        async fn heartbeat(&self, event: HeartbeatRequest) -> Result<(), ClientError> {
            self.heartbeats.lock().unwrap().push(event);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(ClientError::Status(503));
            }
            Ok(())
        }
    }

    fn tracker(sink: &Arc<RecordingSink>) -> PageTracker {
        PageTracker::new(sink.clone(), "session-1")
    }

    /// 생성된 태스크들이 실행될 기회를 줍니다 (멈춘 시계를 1ms 진행).
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[test]
    fn test_debounce_same_path_within_window() {
        let start = Instant::now();
        let mut state = HeartbeatState::default();

        assert!(state.try_begin("/a", start));
        assert!(!state.try_begin("/a", start), "pending blocks everything");
        assert!(!state.try_begin("/b", start), "pending blocks other paths too");
        state.finish();

        assert!(!state.try_begin("/a", start + Duration::from_secs(4)));
        assert!(state.try_begin("/b", start + Duration::from_secs(4)));
        state.finish();
        assert!(state.try_begin("/b", start + Duration::from_secs(10)));
        assert!(state.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_track_sends_page_view_and_heartbeat() {
        let sink = Arc::new(RecordingSink::default());
        let mut tracker = tracker(&sink);

        tracker.track("/");
        settle().await;

        let views = sink.page_views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].page_type, PageType::Home);
        assert_eq!(views[0].session_id, "session-1");
        assert_eq!(sink.heartbeat_paths(), vec!["/"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_path_is_recorded_once_and_debounced() {
        let sink = Arc::new(RecordingSink::default());
        let mut tracker = tracker(&sink);

        tracker.track("/post");
        settle().await;
        tracker.track("/post");
        settle().await;

        assert_eq!(sink.page_views().len(), 1);
        assert_eq!(sink.heartbeat_paths(), vec!["/post"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_repeats_until_cleanup() {
        let sink = Arc::new(RecordingSink::default());
        let mut tracker = tracker(&sink);

        tracker.track("/post");
        settle().await;
        tokio::time::sleep(HEARTBEAT_INTERVAL + Duration::from_secs(1)).await;
        assert_eq!(sink.heartbeat_paths().len(), 2);

        tokio::time::sleep(HEARTBEAT_INTERVAL).await;
        assert_eq!(sink.heartbeat_paths().len(), 3);

        tracker.cleanup();
        tokio::time::sleep(HEARTBEAT_INTERVAL * 3).await;
        assert_eq!(sink.heartbeat_paths().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_path_change_rearms_timer_for_new_path() {
        let sink = Arc::new(RecordingSink::default());
        let mut tracker = tracker(&sink);

        tracker.track("/a");
        settle().await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        tracker.track("/b");
        settle().await;

        // "/a" 타이머(30초 시점)는 취소되었고, "/b" 타이머는 40초 시점에 울립니다.
        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(sink.heartbeat_paths(), vec!["/a", "/b"]);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(sink.heartbeat_paths(), vec!["/a", "/b", "/b"]);
        assert_eq!(sink.page_views().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_heartbeat_suppresses_next() {
        let sink = Arc::new(RecordingSink {
            delay: Some(Duration::from_secs(10)),
            ..Default::default()
        });
        let mut tracker = tracker(&sink);

        tracker.track("/a");
        settle().await;
        tracker.track("/b");
        settle().await;

        assert_eq!(sink.heartbeat_paths(), vec!["/a"]);
        assert_eq!(sink.page_views().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_swallowed_and_release_pending() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let mut tracker = tracker(&sink);

        tracker.track("/a");
        settle().await;
        tracker.track("/b");
        settle().await;

        assert_eq!(sink.heartbeat_paths(), vec!["/a", "/b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let sink = Arc::new(RecordingSink::default());
        {
            let mut tracker = tracker(&sink);
            tracker.track("/a");
            settle().await;
        }
        tokio::time::sleep(HEARTBEAT_INTERVAL * 3).await;
        assert_eq!(sink.heartbeat_paths().len(), 1);
    }
}
