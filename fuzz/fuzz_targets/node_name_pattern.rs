#![no_main]

use hubble_filters::compile_node_name_pattern;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<String>, String)| {
    let (patterns, node_name) = input;
    let patterns: Vec<_> = patterns.into_iter().take(16).collect();

    // 실패해도 패닉 없이 에러를 반환해야 함
    if let Ok(re) = compile_node_name_pattern(&patterns) {
        let _ = re.is_match(&node_name);
    }
});
