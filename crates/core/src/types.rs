//! 도메인 타입 -- 플로우 이벤트와 필터 명세
//!
//! 업스트림 컴포넌트가 생성한 이벤트와 사용자가 작성한 필터 명세를 정의합니다.
//! 두 타입 모두 JSON/YAML로 (역)직렬화되며 필드명은 snake_case를 따릅니다.
//!
//! # 이벤트 JSON 형식
//! ```json
//! {"timestamp": "2020-06-01T12:00:00Z", "flow": {"node_name": "k8s1", "destination_names": ["cilium.io"]}}
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 모니터 메시지 타입: 패킷 드롭
pub const MESSAGE_TYPE_DROP: i32 = 1;
/// 모니터 메시지 타입: 디버그
pub const MESSAGE_TYPE_DEBUG: i32 = 2;
/// 모니터 메시지 타입: 캡처
pub const MESSAGE_TYPE_CAPTURE: i32 = 3;
/// 모니터 메시지 타입: 트레이스
pub const MESSAGE_TYPE_TRACE: i32 = 4;
/// 모니터 메시지 타입: 정책 판정
pub const MESSAGE_TYPE_POLICY_VERDICT: i32 = 5;
/// 모니터 메시지 타입: L7 접근 로그
pub const MESSAGE_TYPE_ACCESS_LOG: i32 = 129;
/// 모니터 메시지 타입: 에이전트 알림
pub const MESSAGE_TYPE_AGENT: i32 = 130;

/// 파이프라인을 흐르는 단일 이벤트
///
/// 플로우 이외의 이벤트(유실 알림 등)도 같은 스트림으로 전달되므로
/// 페이로드는 열거형으로 표현합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// 이벤트 수신 시각
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// 이벤트 본문
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl Event {
    /// 플로우 이벤트를 생성합니다.
    pub fn from_flow(flow: Flow) -> Self {
        Self {
            timestamp: flow.time,
            payload: EventPayload::Flow(flow),
        }
    }

    /// 플로우 페이로드를 반환합니다. 플로우가 아니면 `None`입니다.
    pub fn flow(&self) -> Option<&Flow> {
        match &self.payload {
            EventPayload::Flow(flow) => Some(flow),
            EventPayload::LostEvents(_) => None,
        }
    }

    /// 플로우의 노드명을 반환합니다. 플로우가 아니면 빈 문자열입니다.
    pub fn node_name(&self) -> &str {
        self.flow().map_or("", |flow| flow.node_name.as_str())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            EventPayload::Flow(flow) => write!(f, "{flow}"),
            EventPayload::LostEvents(lost) => write!(f, "{lost}"),
        }
    }
}

/// 이벤트 페이로드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    /// 관측된 네트워크 플로우
    Flow(Flow),
    /// 버퍼 초과로 유실된 이벤트 알림
    LostEvents(LostEvents),
}

/// 네트워크 플로우
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    /// 관측 시각
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    /// 노드명 (`클러스터명/호스트명` 또는 `호스트명`)
    pub node_name: String,
    /// 모니터 이벤트 타입
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<CiliumEventType>,
    /// 출발지 IP에 대응하는 DNS 이름 목록
    pub source_names: Vec<String>,
    /// 목적지 IP에 대응하는 DNS 이름 목록
    pub destination_names: Vec<String>,
    /// 판정 결과
    pub verdict: Verdict,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self
            .time
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_owned());
        let node = if self.node_name.is_empty() {
            "-"
        } else {
            &self.node_name
        };
        write!(
            f,
            "{time} [{node}] {} -> {} {}",
            join_names(&self.source_names),
            join_names(&self.destination_names),
            self.verdict,
        )
    }
}

fn join_names(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_owned()
    } else {
        names.join(",")
    }
}

/// 유실 이벤트 알림
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LostEvents {
    /// 유실된 이벤트 수
    pub num_events_lost: u64,
}

impl fmt::Display for LostEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lost {} events", self.num_events_lost)
    }
}

/// 모니터 이벤트 타입 (`type`, `sub_type`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiliumEventType {
    /// 메시지 타입 (`MESSAGE_TYPE_*`)
    pub r#type: i32,
    /// 메시지 서브 타입
    pub sub_type: i32,
}

/// 플로우 판정
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// 알 수 없음
    #[default]
    VerdictUnknown,
    /// 전달됨
    Forwarded,
    /// 드롭됨
    Dropped,
    /// 처리 중 에러
    Error,
    /// 감사 모드에서 허용됨
    Audit,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerdictUnknown => write!(f, "UNKNOWN"),
            Self::Forwarded => write!(f, "FORWARDED"),
            Self::Dropped => write!(f, "DROPPED"),
            Self::Error => write!(f, "ERROR"),
            Self::Audit => write!(f, "AUDIT"),
        }
    }
}

/// 필터 명세 -- 속성별로 허용되는 값/패턴을 지정합니다.
///
/// 비어 있는 필드는 "해당 속성으로 필터링하지 않음"을 뜻합니다.
///
/// # YAML 예시
/// ```yaml
/// node_name: ["k8s*", "cluster-name/**.com"]
/// destination_fqdn: ["*.cilium.io"]
/// event_type:
///   - type: 129
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowFilter {
    /// 노드명 패턴 목록
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_name: Vec<String>,
    /// 출발지 FQDN 패턴 목록
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_fqdn: Vec<String>,
    /// 목적지 FQDN 패턴 목록
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destination_fqdn: Vec<String>,
    /// 이벤트 타입 목록
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_type: Vec<EventTypeFilter>,
}

impl FlowFilter {
    /// 아무 속성도 제약하지 않는 명세인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.node_name.is_empty()
            && self.source_fqdn.is_empty()
            && self.destination_fqdn.is_empty()
            && self.event_type.is_empty()
    }
}

/// 이벤트 타입 필터
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTypeFilter {
    /// 메시지 타입
    pub r#type: i32,
    /// 서브 타입까지 비교할지 여부
    pub match_sub_type: bool,
    /// 비교할 서브 타입 (`match_sub_type`이 true일 때만 사용)
    pub sub_type: i32,
}

impl EventTypeFilter {
    /// 이벤트 타입이 이 필터와 일치하는지 확인합니다.
    pub fn matches(&self, event_type: &CiliumEventType) -> bool {
        self.r#type == event_type.r#type
            && (!self.match_sub_type || self.sub_type == event_type.sub_type)
    }
}
