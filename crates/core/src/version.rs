//! 컴포넌트 버전 정보
//!
//! 빌드 시 `HUBBLE_GIT_REVISION` 환경변수가 설정되어 있으면 리비전으로 사용합니다.

use std::fmt;

use serde::Serialize;

/// 크레이트 버전 (코어 버전)
const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// 빌드 시점의 Git 커밋 SHA
const GIT_REVISION: Option<&str> = option_env!("HUBBLE_GIT_REVISION");

/// 컴포넌트별 상세 버전
///
/// `Display`는 `cilium v1.9.0-gabc123` 형식을 출력합니다.
/// 컴포넌트명이 없으면 빈 문자열, 코어 버전이 없으면 컴포넌트명만 출력합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Version {
    /// 컴포넌트명 (예: cilium, hubble-relay)
    component: String,
    /// 코어 버전 (예: 1.9.0)
    pub core: String,
    /// 소프트웨어 리비전, 보통 Git 커밋 SHA
    pub revision: String,
}

impl Version {
    /// 버전 정보를 생성합니다.
    pub fn new(
        component: impl Into<String>,
        core: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            core: core.into(),
            revision: revision.into(),
        }
    }

    /// 서버(에이전트에 내장된 Hubble) 버전
    pub fn server() -> Self {
        Self::new("cilium", CORE_VERSION, GIT_REVISION.unwrap_or_default())
    }

    /// Hubble Relay 버전
    pub fn relay() -> Self {
        Self::new("hubble-relay", CORE_VERSION, GIT_REVISION.unwrap_or_default())
    }

    /// 컴포넌트명을 반환합니다.
    pub fn component(&self) -> &str {
        &self.component
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.component.is_empty() {
            return Ok(());
        }
        write!(f, "{}", self.component)?;
        if self.core.is_empty() {
            return Ok(());
        }
        write!(f, " v{}", self.core)?;
        if !self.revision.is_empty() {
            write!(f, "-g{}", self.revision)?;
        }
        Ok(())
    }
}
