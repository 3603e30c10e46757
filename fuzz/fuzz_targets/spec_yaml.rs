#![no_main]

use hubble_filters::{FilterSpecLoader, default_filters};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        if let Ok(specs) = FilterSpecLoader::parse_yaml(yaml_str, "fuzz-input.yaml") {
            let _ = specs.compile(&default_filters());
        }
    }
});
