//! 설정 관리 -- hubble.toml 파싱 및 런타임 설정
//!
//! [`HubbleConfig`]는 CLI와 필터 엔진이 공유하는 최상위 설정 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`HUBBLE_FILTER_SPEC_PATH=/etc/hubble/filters.yaml` 형식)
//! 3. 설정 파일 (`hubble.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), hubble_core::error::HubbleError> {
//! use hubble_core::config::HubbleConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = HubbleConfig::load("hubble.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = HubbleConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, HubbleError};

/// 허용되는 로그 레벨
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
/// 허용되는 로그 형식
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Hubble 통합 설정
///
/// `hubble.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubbleConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 필터 설정
    #[serde(default)]
    pub filter: FilterConfig,
}

impl HubbleConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, HubbleError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값으로 시작하는 [`load`](Self::load) 변형입니다.
    ///
    /// 환경변수 오버라이드와 유효성 검증은 두 경우 모두 적용됩니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, HubbleError> {
        let mut config = match Self::from_file(path.as_ref()).await {
            Ok(config) => config,
            Err(HubbleError::Config(ConfigError::FileNotFound { path })) => {
                tracing::debug!(path = %path, "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    ///
    /// 유효성 검증은 하지 않습니다. 검증은 오버라이드가 모두 적용된 뒤
    /// [`load`](Self::load)에서 수행합니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, HubbleError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HubbleError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                HubbleError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, HubbleError> {
        toml::from_str(toml_str).map_err(|e| {
            HubbleError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `HUBBLE_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "HUBBLE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "HUBBLE_GENERAL_LOG_FORMAT");
        override_string(&mut self.filter.spec_path, "HUBBLE_FILTER_SPEC_PATH");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), HubbleError> {
        if !VALID_LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
            }
            .into());
        }

        if !VALID_LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_FORMATS.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 필터 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// 허용/차단 목록이 담긴 명세 파일 경로 (YAML 또는 JSON, 비어 있으면 미사용)
    pub spec_path: String,
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}
