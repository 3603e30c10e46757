//! FQDN 필터 -- 플로우의 출발지/목적지 DNS 이름을 FQDN 패턴과 비교합니다.

use regex::Regex;

use hubble_core::types::{Event, Flow, FlowFilter};

use super::{FilterFunc, FlowPredicate, OnBuildFilter};
use crate::error::FilterError;
use crate::patterns::compile_fqdn_pattern;

/// FQDN 필터 빌더 (`source_fqdn`, `destination_fqdn`)
#[derive(Debug, Clone, Copy, Default)]
pub struct FqdnFilter;

impl OnBuildFilter for FqdnFilter {
    fn name(&self) -> &str {
        "fqdn"
    }

    fn on_build_filter(&self, filter: &FlowFilter) -> Result<Vec<FilterFunc>, FilterError> {
        let mut funcs: Vec<FilterFunc> = Vec::new();

        if !filter.source_fqdn.is_empty() {
            funcs.push(Box::new(FqdnPredicate::new(
                FqdnSide::Source,
                &filter.source_fqdn,
            )?));
        }

        if !filter.destination_fqdn.is_empty() {
            funcs.push(Box::new(FqdnPredicate::new(
                FqdnSide::Destination,
                &filter.destination_fqdn,
            )?));
        }

        Ok(funcs)
    }
}

/// 비교할 이름 목록의 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FqdnSide {
    /// `Flow::source_names`
    Source,
    /// `Flow::destination_names`
    Destination,
}

impl FqdnSide {
    fn attribute(self) -> &'static str {
        match self {
            Self::Source => "source_fqdn",
            Self::Destination => "destination_fqdn",
        }
    }

    fn names(self, flow: &Flow) -> &[String] {
        match self {
            Self::Source => &flow.source_names,
            Self::Destination => &flow.destination_names,
        }
    }
}

/// 한쪽 방향의 이름 중 하나라도 FQDN 패턴과 일치하면 통과시키는 술어
#[derive(Debug, Clone)]
pub struct FqdnPredicate {
    side: FqdnSide,
    pattern: Regex,
}

impl FqdnPredicate {
    /// FQDN 패턴 목록을 컴파일합니다.
    pub fn new<S: AsRef<str>>(side: FqdnSide, patterns: &[S]) -> Result<Self, FilterError> {
        let pattern =
            compile_fqdn_pattern(patterns).map_err(|e| FilterError::builder(side.attribute(), e))?;
        Ok(Self { side, pattern })
    }
}

impl FlowPredicate for FqdnPredicate {
    fn matches(&self, event: &Event) -> bool {
        let Some(flow) = event.flow() else {
            return false;
        };
        self.side
            .names(flow)
            .iter()
            .any(|name| self.pattern.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(source: &[&str], destination: &[&str]) -> Event {
        Event::from_flow(Flow {
            source_names: source.iter().map(|s| (*s).to_owned()).collect(),
            destination_names: destination.iter().map(|s| (*s).to_owned()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn destination_fqdn_matches_any_name() {
        let funcs = FqdnFilter
            .on_build_filter(&FlowFilter {
                destination_fqdn: vec!["*.cilium.io".to_owned()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(funcs.len(), 1);

        assert!(funcs[0].matches(&event(&[], &["ebpf.io", "www.cilium.io"])));
        assert!(!funcs[0].matches(&event(&[], &["cilium.io"])));
        // 출발지 이름은 보지 않음
        assert!(!funcs[0].matches(&event(&["www.cilium.io"], &[])));
    }

    #[test]
    fn flow_without_names_never_matches() {
        let funcs = FqdnFilter
            .on_build_filter(&FlowFilter {
                source_fqdn: vec!["*".to_owned()],
                ..Default::default()
            })
            .unwrap();
        assert!(!funcs[0].matches(&event(&[], &[])));
        assert!(funcs[0].matches(&event(&["anything.example"], &[])));
    }

    #[test]
    fn both_sides_produce_two_predicates() {
        let funcs = FqdnFilter
            .on_build_filter(&FlowFilter {
                source_fqdn: vec!["client.local".to_owned()],
                destination_fqdn: vec!["CILIUM.IO.".to_owned()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(funcs.len(), 2);

        let ev = event(&["client.local"], &["cilium.io"]);
        assert!(funcs.iter().all(|f| f.matches(&ev)));
    }

    #[test]
    fn invalid_pattern_names_attribute() {
        let err = FqdnFilter
            .on_build_filter(&FlowFilter {
                destination_fqdn: vec!["cilium.io..".to_owned()],
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "destination_fqdn filter: multiple trailing dots"
        );
    }
}
