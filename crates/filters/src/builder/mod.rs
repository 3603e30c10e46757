//! 속성 필터 빌더 -- 필터 명세에서 속성별 술어를 생성하는 확장 포인트
//!
//! 새 속성을 필터링하려면 [`OnBuildFilter`]를 구현하고 빌더 목록에 등록합니다.
//! [`FilterList`](crate::FilterList)는 수정할 필요가 없습니다.
//!
//! # 구성
//! - [`NodeNameFilter`]: 노드명 glob 패턴
//! - [`FqdnFilter`]: 출발지/목적지 FQDN glob 패턴
//! - [`EventTypeFilter`]: 모니터 이벤트 타입

pub mod event_type;
pub mod fqdn;
pub mod node_name;

pub use event_type::EventTypeFilter;
pub use fqdn::FqdnFilter;
pub use node_name::NodeNameFilter;

use std::fmt;

use hubble_core::types::{Event, FlowFilter};

use crate::error::FilterError;

/// 이벤트에 대한 속성 술어
///
/// 구현체는 컴파일된 매처를 소유하는 불변 값이며 부수 효과가 없어야 합니다.
/// 생성 이후에는 여러 스레드에서 동시에 호출될 수 있습니다.
pub trait FlowPredicate: fmt::Debug + Send + Sync {
    /// 이벤트가 이 속성 조건을 만족하는지 평가합니다.
    fn matches(&self, event: &Event) -> bool;
}

/// 빌더가 생성하는 소유된 술어
pub type FilterFunc = Box<dyn FlowPredicate>;

/// 속성 필터 빌더
pub trait OnBuildFilter: Send + Sync {
    /// 빌더가 담당하는 속성 이름 (로그/에러 메시지용)
    fn name(&self) -> &str;

    /// 필터 명세에서 0개 이상의 술어를 생성합니다.
    ///
    /// 명세가 이 속성을 제약하지 않으면 빈 목록을 반환합니다.
    fn on_build_filter(&self, filter: &FlowFilter) -> Result<Vec<FilterFunc>, FilterError>;
}

/// 기본 빌더 레지스트리를 반환합니다.
pub fn default_filters() -> Vec<Box<dyn OnBuildFilter>> {
    vec![
        Box::new(EventTypeFilter),
        Box::new(NodeNameFilter),
        Box::new(FqdnFilter),
    ]
}
