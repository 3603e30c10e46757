//! 필터 명세 파일 로더 -- 허용/차단 목록을 디스크에서 로드합니다.
//!
//! `.yml`/`.yaml`은 YAML로, `.json`은 JSON으로 파싱합니다.
//!
//! # 파일 형식
//! ```yaml
//! allowlist:
//!   - node_name: ["k8s*"]
//!   - destination_fqdn: ["*.cilium.io"]
//! denylist:
//!   - node_name: ["k8s2"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use hubble_core::types::{Event, FlowFilter};

use crate::builder::OnBuildFilter;
use crate::error::FilterError;
use crate::filter_list::{self, FilterList};

/// 명세 파일 최대 크기
const MAX_SPEC_FILE_SIZE: u64 = 1024 * 1024; // 1MB
/// 목록 하나당 최대 명세 수
const MAX_SPECS_PER_LIST: usize = 1_000;

/// 허용/차단 목록 명세
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSpecSet {
    /// 허용 목록 (비어 있으면 모든 이벤트 허용)
    pub allowlist: Vec<FlowFilter>,
    /// 차단 목록
    pub denylist: Vec<FlowFilter>,
}

impl FilterSpecSet {
    /// 두 목록을 컴파일합니다.
    pub fn compile(
        &self,
        builders: &[Box<dyn OnBuildFilter>],
    ) -> Result<CompiledFilters, FilterError> {
        let allowlist = FilterList::build(&self.allowlist, builders)?;
        let denylist = FilterList::build(&self.denylist, builders)?;
        Ok(CompiledFilters {
            allowlist,
            denylist,
        })
    }

    fn check_limits(&self, source: &str) -> Result<(), FilterError> {
        for (name, list) in [("allowlist", &self.allowlist), ("denylist", &self.denylist)] {
            if list.len() > MAX_SPECS_PER_LIST {
                return Err(FilterError::SpecLoad {
                    path: source.to_owned(),
                    reason: format!("too many {name} entries: max {MAX_SPECS_PER_LIST}"),
                });
            }
        }
        Ok(())
    }
}

/// 컴파일된 허용/차단 목록
#[derive(Debug, Default)]
pub struct CompiledFilters {
    /// 허용 목록
    pub allowlist: FilterList,
    /// 차단 목록
    pub denylist: FilterList,
}

impl CompiledFilters {
    /// 이벤트를 전달해야 하는지 판단합니다.
    pub fn apply(&self, event: &Event) -> bool {
        filter_list::apply(&self.allowlist, &self.denylist, event)
    }
}

/// 명세 파일 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecFormat {
    Yaml,
    Json,
}

/// 필터 명세 파일 로더
pub struct FilterSpecLoader;

impl FilterSpecLoader {
    /// 파일에서 허용/차단 목록을 로드합니다.
    ///
    /// # Errors
    /// - 확장자가 `.yml`, `.yaml`, `.json`이 아닌 경우
    /// - 파일이 `MAX_SPEC_FILE_SIZE`를 초과하거나 읽을 수 없는 경우
    /// - 파싱에 실패한 경우
    pub async fn load_file(path: impl AsRef<Path>) -> Result<FilterSpecSet, FilterError> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => SpecFormat::Yaml,
            Some("json") => SpecFormat::Json,
            _ => {
                return Err(FilterError::SpecLoad {
                    path: source,
                    reason: "unsupported extension (expected .yml, .yaml or .json)".to_owned(),
                });
            }
        };

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FilterError::SpecLoad {
                path: source.clone(),
                reason: format!("failed to read file metadata: {e}"),
            })?;

        if metadata.len() > MAX_SPEC_FILE_SIZE {
            return Err(FilterError::SpecLoad {
                path: source,
                reason: format!(
                    "file too large: {} bytes (max: {MAX_SPEC_FILE_SIZE})",
                    metadata.len()
                ),
            });
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FilterError::SpecLoad {
                    path: source.clone(),
                    reason: format!("failed to read file: {e}"),
                })?;

        let specs = match format {
            SpecFormat::Yaml => Self::parse_yaml(&content, &source)?,
            SpecFormat::Json => Self::parse_json(&content, &source)?,
        };

        tracing::info!(
            path = %source,
            allowlist = specs.allowlist.len(),
            denylist = specs.denylist.len(),
            "loaded filter specs"
        );

        Ok(specs)
    }

    /// YAML 문자열을 파싱합니다.
    pub fn parse_yaml(yaml_str: &str, source: &str) -> Result<FilterSpecSet, FilterError> {
        // 빈 문서는 빈 명세로 취급
        if yaml_str.trim().is_empty() {
            return Ok(FilterSpecSet::default());
        }
        let specs: FilterSpecSet =
            serde_yaml::from_str(yaml_str).map_err(|e| FilterError::SpecLoad {
                path: source.to_owned(),
                reason: format!("YAML parse error: {e}"),
            })?;
        specs.check_limits(source)?;
        Ok(specs)
    }

    /// JSON 문자열을 파싱합니다.
    ///
    /// YAML과 마찬가지로 빈 문서는 빈 명세로 취급합니다.
    pub fn parse_json(json_str: &str, source: &str) -> Result<FilterSpecSet, FilterError> {
        if json_str.trim().is_empty() {
            return Ok(FilterSpecSet::default());
        }
        let specs: FilterSpecSet =
            serde_json::from_str(json_str).map_err(|e| FilterError::SpecLoad {
                path: source.to_owned(),
                reason: format!("JSON parse error: {e}"),
            })?;
        specs.check_limits(source)?;
        Ok(specs)
    }
}
