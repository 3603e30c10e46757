//! 이벤트 타입 필터

use hubble_core::types::{self, Event, FlowFilter};

use super::{FilterFunc, FlowPredicate, OnBuildFilter};
use crate::error::FilterError;

/// 이벤트 타입 필터 빌더
#[derive(Debug, Clone, Copy, Default)]
pub struct EventTypeFilter;

impl OnBuildFilter for EventTypeFilter {
    fn name(&self) -> &str {
        "event_type"
    }

    fn on_build_filter(&self, filter: &FlowFilter) -> Result<Vec<FilterFunc>, FilterError> {
        if filter.event_type.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(bad) = filter.event_type.iter().find(|et| et.r#type < 0) {
            return Err(FilterError::InvalidSpec {
                attribute: "event_type".to_owned(),
                reason: format!("message type must not be negative: {}", bad.r#type),
            });
        }

        Ok(vec![Box::new(EventTypePredicate {
            filters: filter.event_type.clone(),
        })])
    }
}

/// 나열된 이벤트 타입 중 하나와 일치하면 통과시키는 술어
#[derive(Debug, Clone)]
pub struct EventTypePredicate {
    filters: Vec<types::EventTypeFilter>,
}

impl FlowPredicate for EventTypePredicate {
    fn matches(&self, event: &Event) -> bool {
        let Some(event_type) = event.flow().and_then(|flow| flow.event_type.as_ref()) else {
            return false;
        };
        self.filters.iter().any(|f| f.matches(event_type))
    }
}
