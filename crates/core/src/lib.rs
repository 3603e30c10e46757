#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod types;
pub mod version;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, HubbleError};

// 설정
pub use config::HubbleConfig;

// 도메인 타입
pub use types::{
    CiliumEventType, Event, EventPayload, EventTypeFilter, Flow, FlowFilter, LostEvents, Verdict,
};

// 버전
pub use version::Version;
