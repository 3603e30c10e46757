//! 노드명 필터
//!
//! 노드명은 선택적인 클러스터명 접두사와 슬래시 뒤에 오는 호스트명입니다
//! (예: `k8s1`, `test-cluster/node01.company.com`). 패턴은 파일명 glob과 비슷합니다
//! (예: `k8s*`, `test-cluster/*.company.com`).
//!
//! - 소문자, 숫자, 하이픈, 점, 슬래시는 자기 자신과 매칭됩니다.
//! - `*`는 소문자/숫자/하이픈 0개 이상과 매칭됩니다 (도메인 레이블 하나, 점/슬래시 제외).
//! - `**`는 도메인 레이블 1개 이상과 매칭됩니다.
//! - 그 외 문자는 모두 잘못된 패턴입니다.

use regex::Regex;

use hubble_core::types::{Event, FlowFilter};

use super::{FilterFunc, FlowPredicate, OnBuildFilter};
use crate::error::FilterError;
use crate::patterns::compile_node_name_pattern;

/// 노드명 필터 빌더
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeNameFilter;

impl OnBuildFilter for NodeNameFilter {
    fn name(&self) -> &str {
        "node_name"
    }

    fn on_build_filter(&self, filter: &FlowFilter) -> Result<Vec<FilterFunc>, FilterError> {
        if filter.node_name.is_empty() {
            return Ok(Vec::new());
        }

        let predicate = NodeNamePredicate::new(&filter.node_name)?;
        Ok(vec![Box::new(predicate)])
    }
}

/// 노드명 패턴 집합 중 하나와 일치하는 이벤트를 통과시키는 술어
#[derive(Debug, Clone)]
pub struct NodeNamePredicate {
    pattern: Regex,
}

impl NodeNamePredicate {
    /// 노드명 패턴 목록을 컴파일합니다.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FilterError> {
        let pattern = compile_node_name_pattern(patterns)
            .map_err(|e| FilterError::builder("node_name", e))?;
        Ok(Self { pattern })
    }
}

impl FlowPredicate for NodeNamePredicate {
    fn matches(&self, event: &Event) -> bool {
        let node_name = event.node_name();
        // 노드명이 없는 이벤트는 어떤 패턴과도 매칭되지 않음
        !node_name.is_empty() && self.pattern.is_match(node_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubble_core::types::{EventPayload, Flow, LostEvents};

    fn event(node_name: &str) -> Event {
        Event::from_flow(Flow {
            node_name: node_name.to_owned(),
            ..Default::default()
        })
    }

    fn build(patterns: &[&str]) -> Result<Vec<FilterFunc>, FilterError> {
        NodeNameFilter.on_build_filter(&FlowFilter {
            node_name: patterns.iter().map(|p| (*p).to_owned()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn no_patterns_no_predicate() {
        assert!(build(&[]).unwrap().is_empty());
    }

    #[test]
    fn one_predicate_for_pattern_set() {
        let funcs = build(&["k8s1", "runtime1"]).unwrap();
        assert_eq!(funcs.len(), 1);
        assert!(funcs[0].matches(&event("k8s1")));
        assert!(funcs[0].matches(&event("runtime1")));
        assert!(!funcs[0].matches(&event("k8s2")));
    }

    #[test]
    fn empty_node_name_never_matches() {
        let funcs = build(&["**", "*"]).unwrap();
        assert!(!funcs[0].matches(&event("")));
    }

    #[test]
    fn non_flow_event_never_matches() {
        let funcs = build(&["*"]).unwrap();
        let lost = Event {
            timestamp: None,
            payload: EventPayload::LostEvents(LostEvents::default()),
        };
        assert!(!funcs[0].matches(&lost));
    }

    #[test]
    fn invalid_pattern_is_builder_failure() {
        let err = build(&["cluster_name"]).unwrap_err();
        assert!(matches!(
            &err,
            FilterError::BuilderFailure { attribute, .. } if attribute == "node_name"
        ));
        assert!(err.to_string().contains("invalid byte in node name pattern"));
    }
}
