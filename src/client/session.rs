//! # 익명 세션 ID
//!
//! 로그인 없이 "내 댓글", "내 리액션"을 구분하기 위한 무작위 ID입니다.
//! 저장소에 한 번 저장되면 계속 같은 값을 씁니다.
//!
//! 저장소를 쓸 수 없으면 호출할 때마다 새 ID를 만듭니다 (이 경우 소유권이 유지되지 않음).

use crate::client::storage::KeyValueStorage;
use std::sync::Arc;
use uuid::Uuid;

/// 세션 ID가 저장되는 키
pub const SESSION_ID_KEY: &str = "markdown_blog_session_id";

#[derive(Clone)]
pub struct SessionIdStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionIdStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// 저장된 세션 ID를 반환하고, 없으면 새로 만들어 저장합니다.
    pub fn get_or_create(&self) -> String {
        match self.storage.get(SESSION_ID_KEY) {
            Ok(Some(id)) if !id.is_empty() => id,
            Ok(_) => {
                let id = generate_session_id();
                if let Err(e) = self.storage.set(SESSION_ID_KEY, &id) {
                    tracing::debug!("Could not persist session id: {}", e);
                }
                id
            }
            Err(e) => {
                tracing::debug!("Session storage unavailable: {}", e);
                generate_session_id()
            }
        }
    }
}

/// UUID v4 문자열 (예: `"3f2b8c1e-9a4d-4e7f-b1c2-8d9e0f1a2b3c"`)
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::{MemoryStorage, UnavailableStorage};

    #[test]
    fn test_id_is_created_once_and_reused() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let first = SessionIdStore::new(Arc::clone(&storage)).get_or_create();
        let second = SessionIdStore::new(Arc::clone(&storage)).get_or_create();

        assert_eq!(first, second);
        assert_eq!(storage.get(SESSION_ID_KEY).unwrap(), Some(first.clone()));
        assert_eq!(Uuid::parse_str(&first).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_unavailable_storage_gives_fresh_ids() {
        let store = SessionIdStore::new(Arc::new(UnavailableStorage));
        assert_ne!(store.get_or_create(), store.get_or_create());
    }

    #[test]
    fn test_empty_stored_value_is_replaced() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SESSION_ID_KEY, "").unwrap();

        let id = SessionIdStore::new(storage.clone()).get_or_create();
        assert!(!id.is_empty());
        assert_eq!(storage.get(SESSION_ID_KEY).unwrap(), Some(id));
    }
}
