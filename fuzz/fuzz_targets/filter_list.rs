#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use hubble_core::types::{CiliumEventType, Event, EventTypeFilter, Flow, FlowFilter};
use hubble_filters::{FilterList, default_filters};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 필터 명세 목록 (최대 8개로 제한)
    specs: Vec<FuzzSpec>,
    node_name: String,
    source_names: Vec<String>,
    destination_names: Vec<String>,
    event_type: Option<(i32, i32)>,
}

#[derive(Arbitrary, Debug)]
struct FuzzSpec {
    node_name: Vec<String>,
    source_fqdn: Vec<String>,
    destination_fqdn: Vec<String>,
    event_type: Vec<(i32, bool, i32)>,
}

impl FuzzSpec {
    fn into_flow_filter(self) -> FlowFilter {
        FlowFilter {
            node_name: self.node_name,
            source_fqdn: self.source_fqdn,
            destination_fqdn: self.destination_fqdn,
            event_type: self
                .event_type
                .into_iter()
                .map(|(r#type, match_sub_type, sub_type)| EventTypeFilter {
                    r#type,
                    match_sub_type,
                    sub_type,
                })
                .collect(),
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let specs: Vec<FlowFilter> = input
        .specs
        .into_iter()
        .take(8)
        .map(FuzzSpec::into_flow_filter)
        .collect();

    // 빌드 실패는 정상적인 결과
    let Ok(list) = FilterList::build(&specs, &default_filters()) else {
        return;
    };

    let event = Event::from_flow(Flow {
        node_name: input.node_name,
        source_names: input.source_names,
        destination_names: input.destination_names,
        event_type: input
            .event_type
            .map(|(r#type, sub_type)| CiliumEventType { r#type, sub_type }),
        ..Default::default()
    });

    // 매칭은 절대 실패하지 않으며 match_none은 match_one의 부정
    assert_eq!(list.match_one(&event), !list.match_none(&event));
    if specs.is_empty() {
        assert!(!list.match_one(&event));
    }
});
