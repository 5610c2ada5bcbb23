//! # 테마 저장소
//!
//! 네 가지 테마 중 하나를 골라 저장소의 `blog-theme` 키에 기억합니다.
//! 저장된 값이 없거나 알 수 없는 값이면 기본 테마(`tan`)를 씁니다.

use crate::client::storage::KeyValueStorage;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const THEME_KEY: &str = "blog-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
    Tan,
    Cloud,
}

impl Theme {
    /// `toggle()`이 순환하는 순서
    pub const ALL: [Theme; 4] = [Theme::Dark, Theme::Light, Theme::Tan, Theme::Cloud];
    pub const DEFAULT: Theme = Theme::Tan;

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Tan => "tan",
            Theme::Cloud => "cloud",
        }
    }

    /// `<meta name="theme-color">`에 넣을 색
    pub fn meta_color(self) -> &'static str {
        match self {
            Theme::Dark => "#111111",
            Theme::Light => "#ffffff",
            Theme::Tan => "#faf8f5",
            Theme::Cloud => "#f5f5f5",
        }
    }

    /// dark → light → tan → cloud → dark
    pub fn next(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Tan,
            Theme::Tan => Theme::Cloud,
            Theme::Cloud => Theme::Dark,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::DEFAULT
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| format!("unknown theme: {s}"))
    }
}

/// 현재 테마와 저장소를 함께 들고 있는 상태
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStorage>,
    current: Theme,
}

impl ThemeStore {
    /// 저장소에서 테마를 읽어옵니다. 읽기 실패도 기본 테마로 처리합니다.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let current = match storage.get(THEME_KEY) {
            Ok(Some(saved)) => saved.parse().unwrap_or_default(),
            Ok(None) => Theme::DEFAULT,
            Err(e) => {
                tracing::debug!("Theme storage unavailable: {}", e);
                Theme::DEFAULT
            }
        };
        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// 테마를 바꾸고 저장합니다. 저장에 실패해도 현재 테마는 바뀝니다.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            tracing::debug!("Could not persist theme: {}", e);
        }
    }

    /// 다음 테마로 넘기고 바뀐 테마를 반환합니다.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.next();
        self.set(next);
        next
    }
}
