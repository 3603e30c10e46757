//! 에러 타입 -- 도메인별 에러 정의

/// Hubble 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum HubbleError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 필터 생성 에러 (패턴 컴파일, 명세 로딩 등)
    #[error("filter error: {0}")]
    Filter(String),

    /// 이벤트 역직렬화 에러
    #[error("event decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
