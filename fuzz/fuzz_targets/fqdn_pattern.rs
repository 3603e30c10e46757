#![no_main]

use hubble_filters::{canonicalize_fqdn_pattern, compile_fqdn_pattern};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|patterns: Vec<String>| {
    let patterns: Vec<_> = patterns.into_iter().take(16).collect();

    // 컴파일 성공 시 정규화된 리터럴 패턴은 자기 자신과 매칭되어야 함
    let Ok(re) = compile_fqdn_pattern(&patterns) else {
        return;
    };
    for pattern in &patterns {
        let canonical = canonicalize_fqdn_pattern(pattern);
        if !canonical.contains('*') {
            assert!(re.is_match(&canonical), "{canonical:?} should match itself");
        }
    }
});
