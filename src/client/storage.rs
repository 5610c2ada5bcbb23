//! # 키-값 저장소
//!
//! 브라우저의 localStorage처럼 문자열 키에 문자열 값을 저장합니다.
//! 세션 ID와 테마가 이 저장소를 사용합니다.
//!
//! | 구현 | 용도 |
//! |------|------|
//! | `MemoryStorage` | 테스트, 프로세스 수명 동안만 유지 |
//! | `FileStorage` | JSON 객체 파일 하나에 영구 저장 |
//! | `UnavailableStorage` | 저장소를 쓸 수 없는 환경 (모든 호출이 실패) |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage is unavailable")]
    Unavailable,

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not a JSON object: {0}")]
    Format(#[from] serde_json::Error),
}

/// 문자열 키-값 저장소
///
/// `Send + Sync`: 트래커가 여러 tokio 태스크에서 공유할 수 있어야 합니다.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// 다른 스레드가 잠금 중 panic해도 맵 자체는 일관된 상태이므로 그대로 씁니다.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON 파일 기반 저장소
///
/// 열 때 파일 전체를 읽어 메모리에 두고, `set`마다 파일 전체를 다시 씁니다.
/// 파일 형식: `{"blog-theme": "dark", "markdown_blog_session_id": "..."}`
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// 저장 파일을 엽니다. 파일이 없으면 빈 저장소로 시작합니다.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&*entries)?)?;
        Ok(())
    }
}

/// 항상 실패하는 저장소 (시크릿 모드처럼 저장소가 막힌 환경)
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl KeyValueStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
