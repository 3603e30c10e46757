//! 필터 에러 타입
//!
//! 모든 에러는 필터 리스트 *생성* 시점에만 발생합니다. 매칭은 항상 bool을 반환합니다.
//! `From<FilterError> for HubbleError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use hubble_core::error::HubbleError;

/// 패턴 컴파일 에러
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// 정규화 후 빈 FQDN 패턴
    #[error("empty pattern")]
    EmptyPattern,

    /// 마지막 점 하나를 제거한 뒤에도 점으로 끝나는 FQDN 패턴
    #[error("multiple trailing dots")]
    MultipleTrailingDots,

    /// FQDN 패턴 알파벳 밖의 문자
    #[error("{0:?}: invalid rune in pattern")]
    InvalidPatternRune(char),

    /// 노드명 패턴 알파벳 밖의 바이트
    #[error("{:?}: invalid byte in node name pattern", byte_char(.0))]
    InvalidPatternByte(u8),

    /// 생성된 정규식 컴파일 실패
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// 필터 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// 속성 필터 빌더의 패턴 검증 실패
    #[error("{attribute} filter: {source}")]
    BuilderFailure {
        /// 필터 속성명 (node_name, source_fqdn 등)
        attribute: String,
        /// 원인 패턴 에러
        #[source]
        source: PatternError,
    },

    /// 속성 고유의 명세 검증 실패
    #[error("{attribute} filter: {reason}")]
    InvalidSpec {
        /// 필터 속성명
        attribute: String,
        /// 검증 실패 사유
        reason: String,
    },

    /// 명세 파일 로딩 실패
    #[error("filter spec load error: {path}: {reason}")]
    SpecLoad {
        /// 명세 파일 경로
        path: String,
        /// 로딩 실패 사유
        reason: String,
    },
}

fn byte_char(b: &u8) -> char {
    char::from(*b)
}

impl FilterError {
    /// 패턴 에러를 속성명과 함께 감쌉니다.
    pub fn builder(attribute: impl Into<String>, source: PatternError) -> Self {
        Self::BuilderFailure {
            attribute: attribute.into(),
            source,
        }
    }
}

impl From<FilterError> for HubbleError {
    fn from(err: FilterError) -> Self {
        HubbleError::Filter(err.to_string())
    }
}
