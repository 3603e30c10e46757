//! 필터 리스트 -- 필터 명세 목록을 하나의 평가기로 조합합니다.
//!
//! 조합 규칙:
//! - 명세 하나 안의 술어들은 AND로 결합됩니다. 술어가 없는 명세는 모든 이벤트와 매칭됩니다.
//! - 명세들 사이는 OR로 결합됩니다. 명세가 하나도 없는 리스트는 어떤 이벤트와도 매칭되지 않습니다.
//!
//! # 사용 예시
//! ```
//! use hubble_core::types::{Event, Flow, FlowFilter};
//! use hubble_filters::{FilterList, default_filters};
//!
//! let specs = vec![FlowFilter {
//!     node_name: vec!["k8s*".to_owned()],
//!     ..Default::default()
//! }];
//! let list = FilterList::build(&specs, &default_filters()).unwrap();
//!
//! let ev = Event::from_flow(Flow { node_name: "k8s1".to_owned(), ..Default::default() });
//! assert!(list.match_one(&ev));
//! ```

use hubble_core::types::{Event, FlowFilter};

use crate::builder::{FilterFunc, OnBuildFilter};
use crate::error::FilterError;

/// 명세 하나에서 생성된 술어 그룹 (AND 결합)
#[derive(Debug, Default)]
pub struct FilterGroup {
    funcs: Vec<FilterFunc>,
}

impl FilterGroup {
    /// 그룹의 모든 술어가 만족되는지 평가합니다. 술어가 없으면 true입니다.
    pub fn matches(&self, event: &Event) -> bool {
        self.funcs.iter().all(|f| f.matches(event))
    }

    /// 그룹에 포함된 술어 수
    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    /// 술어가 없는 그룹인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

/// 컴파일된 필터 리스트 (그룹 간 OR 결합)
///
/// 생성 이후에는 불변이며 여러 스레드에서 동시에 평가할 수 있습니다.
#[derive(Debug, Default)]
pub struct FilterList {
    groups: Vec<FilterGroup>,
}

impl FilterList {
    /// 모든 명세에 모든 빌더를 적용하여 필터 리스트를 생성합니다.
    ///
    /// 빌더 하나라도 실패하면 부분 결과 없이 해당 에러를 반환합니다.
    pub fn build(
        filters: &[FlowFilter],
        builders: &[Box<dyn OnBuildFilter>],
    ) -> Result<Self, FilterError> {
        let mut groups = Vec::with_capacity(filters.len());

        for (idx, filter) in filters.iter().enumerate() {
            let mut funcs = Vec::new();
            for builder in builders {
                let built = builder.on_build_filter(filter).inspect_err(|e| {
                    tracing::debug!(
                        spec = idx,
                        builder = builder.name(),
                        error = %e,
                        "filter builder failed"
                    );
                })?;
                funcs.extend(built);
            }
            groups.push(FilterGroup { funcs });
        }

        tracing::debug!(
            specs = filters.len(),
            builders = builders.len(),
            predicates = groups.iter().map(FilterGroup::len).sum::<usize>(),
            "built filter list"
        );

        Ok(Self { groups })
    }

    /// 하나 이상의 명세 그룹과 매칭되면 true를 반환합니다.
    ///
    /// 빈 리스트는 false입니다. 첫 번째로 매칭된 그룹에서 평가를 멈춥니다.
    pub fn match_one(&self, event: &Event) -> bool {
        self.groups.iter().any(|g| g.matches(event))
    }

    /// 어떤 명세 그룹과도 매칭되지 않으면 true를 반환합니다.
    pub fn match_none(&self, event: &Event) -> bool {
        !self.match_one(event)
    }

    /// 명세 그룹 수
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// 명세가 없는 리스트인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 명세 그룹을 순서대로 반환합니다.
    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }
}

/// 허용 목록과 차단 목록을 함께 적용합니다.
///
/// 허용 목록이 비어 있으면 모든 이벤트를 허용 대상으로 보고,
/// 차단 목록과 매칭되는 이벤트는 항상 제외합니다.
pub fn apply(allowlist: &FilterList, denylist: &FilterList, event: &Event) -> bool {
    (allowlist.is_empty() || allowlist.match_one(event)) && denylist.match_none(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{NodeNameFilter, default_filters};
    use hubble_core::types::Flow;

    fn event(node_name: &str) -> Event {
        Event::from_flow(Flow {
            node_name: node_name.to_owned(),
            ..Default::default()
        })
    }

    fn node_spec(patterns: &[&str]) -> FlowFilter {
        FlowFilter {
            node_name: patterns.iter().map(|p| (*p).to_owned()).collect(),
            ..Default::default()
        }
    }

    fn node_builders() -> Vec<Box<dyn OnBuildFilter>> {
        vec![Box::new(NodeNameFilter)]
    }

    #[test]
    fn empty_list_matches_nothing() {
        let list = FilterList::build(&[], &default_filters()).unwrap();
        assert!(list.is_empty());
        assert!(!list.match_one(&event("k8s1")));
        assert!(list.match_none(&event("k8s1")));
    }

    #[test]
    fn unconstrained_spec_matches_everything() {
        let list = FilterList::build(&[FlowFilter::default()], &default_filters()).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.groups()[0].is_empty());
        assert!(list.match_one(&event("k8s1")));
        assert!(list.match_one(&event("")));
    }

    #[test]
    fn or_across_specs() {
        let list = FilterList::build(
            &[node_spec(&["k8s1"]), node_spec(&["runtime1"])],
            &node_builders(),
        )
        .unwrap();
        assert!(list.match_one(&event("k8s1")));
        assert!(list.match_one(&event("runtime1")));
        assert!(!list.match_one(&event("k8s2")));
    }

    #[test]
    fn and_within_spec() {
        let spec = FlowFilter {
            node_name: vec!["k8s*".to_owned()],
            destination_fqdn: vec!["*.cilium.io".to_owned()],
            ..Default::default()
        };
        let list = FilterList::build(&[spec], &default_filters()).unwrap();
        assert_eq!(list.groups()[0].len(), 2);

        let both = Event::from_flow(Flow {
            node_name: "k8s1".to_owned(),
            destination_names: vec!["docs.cilium.io".to_owned()],
            ..Default::default()
        });
        let node_only = event("k8s1");
        assert!(list.match_one(&both));
        assert!(!list.match_one(&node_only));
    }

    #[test]
    fn any_builder_failure_aborts_build() {
        let result = FilterList::build(
            &[node_spec(&["k8s1"]), node_spec(&["bad_name"])],
            &node_builders(),
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid byte in node name pattern"));
    }

    #[test]
    fn apply_allow_and_deny() {
        let builders = node_builders();
        let allow = FilterList::build(&[node_spec(&["k8s*"])], &builders).unwrap();
        let deny = FilterList::build(&[node_spec(&["k8s2"])], &builders).unwrap();
        let none = FilterList::default();

        assert!(apply(&allow, &deny, &event("k8s1")));
        assert!(!apply(&allow, &deny, &event("k8s2")));
        assert!(!apply(&allow, &deny, &event("runtime1")));

        // 빈 허용 목록은 차단되지 않은 모든 이벤트를 통과시킴
        assert!(apply(&none, &deny, &event("runtime1")));
        assert!(!apply(&none, &deny, &event("k8s2")));
        assert!(apply(&none, &none, &event("")));
    }

    #[test]
    fn filter_list_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FilterList>();
    }
}
