#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`patterns`]: FQDN/노드명 glob 패턴 정규화 및 정규식 컴파일
//! - [`builder`]: 속성 필터 빌더 확장 포인트와 기본 빌더 (노드명, FQDN, 이벤트 타입)
//! - [`filter_list`]: 명세 내 AND / 명세 간 OR 조합, 허용/차단 목록 적용
//! - [`loader`]: YAML/JSON 허용/차단 목록 파일 로딩
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! FlowFilter[] --(OnBuildFilter[])--> FilterGroup[] (AND) --> FilterList (OR) --> match_one(event)
//!                     |
//!              patterns::compile_*
//! ```

pub mod builder;
pub mod error;
pub mod filter_list;
pub mod loader;
pub mod patterns;

// --- 주요 타입 re-export ---

// 에러
pub use error::{FilterError, PatternError};

// 패턴
pub use patterns::{canonicalize_fqdn_pattern, compile_fqdn_pattern, compile_node_name_pattern};

// 빌더
pub use builder::{
    EventTypeFilter, FilterFunc, FlowPredicate, FqdnFilter, NodeNameFilter, OnBuildFilter,
    default_filters,
};

// 필터 리스트
pub use filter_list::{FilterGroup, FilterList, apply};

// 로더
pub use loader::{CompiledFilters, FilterSpecLoader, FilterSpecSet};
