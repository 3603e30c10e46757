//! `hubble-filter filter` command handler

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{info, warn};

use hubble_core::config::HubbleConfig;
use hubble_core::types::Event;
use hubble_filters::{CompiledFilters, FilterSpecLoader, FilterSpecSet, default_filters};

use crate::cli::FilterArgs;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Per-run counters, logged when the input is exhausted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub read: u64,
    pub passed: u64,
    pub dropped: u64,
    pub malformed: u64,
}

/// Execute the `filter` command.
pub async fn execute(
    args: FilterArgs,
    config: &HubbleConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let filters = load_filters(args.spec.clone(), config).await?;

    let input: Box<dyn AsyncRead + Unpin + Send> = if args.reads_stdin() {
        Box::new(tokio::io::stdin())
    } else {
        Box::new(tokio::fs::File::open(&args.input).await?)
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let stats = filter_stream(BufReader::new(input), &filters, writer, &mut out).await?;
    out.flush()?;

    info!(
        read = stats.read,
        passed = stats.passed,
        dropped = stats.dropped,
        malformed = stats.malformed,
        "filtering finished"
    );
    Ok(())
}

/// Resolve the spec file (CLI flag first, then `filter.spec_path`) and compile it.
///
/// With no spec file at all every event passes.
async fn load_filters(
    spec: Option<PathBuf>,
    config: &HubbleConfig,
) -> Result<CompiledFilters, CliError> {
    let spec_path = spec.or_else(|| {
        (!config.filter.spec_path.is_empty()).then(|| PathBuf::from(&config.filter.spec_path))
    });

    let specs = match spec_path {
        Some(path) => FilterSpecLoader::load_file(&path).await?,
        None => {
            info!("no filter spec configured, all events pass");
            FilterSpecSet::default()
        }
    };

    Ok(specs.compile(&default_filters())?)
}

/// Apply the filters to every JSON line of `reader`, writing passing events to `out`.
///
/// Blank lines are ignored. Malformed lines, including ones that are not
/// valid UTF-8, are logged and skipped.
pub async fn filter_stream<R>(
    reader: R,
    filters: &CompiledFilters,
    writer: &OutputWriter,
    out: &mut dyn Write,
) -> Result<FilterStats, CliError>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut stats = FilterStats::default();
    let mut lines = reader.split(b'\n');
    let mut line_no: u64 = 0;

    while let Some(line) = lines.next_segment().await? {
        line_no += 1;
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        stats.read += 1;

        let event: Event = match serde_json::from_slice(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed event");
                stats.malformed += 1;
                continue;
            }
        };

        if filters.apply(&event) {
            writer.render_line(out, &event)?;
            stats.passed += 1;
        } else {
            stats.dropped += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    const EVENTS: &str = r#"{"flow": {"node_name": "k8s1", "destination_names": ["www.cilium.io"]}}
{"flow": {"node_name": "k8s2"}}

not json
{"lost_events": {"num_events_lost": 3}}
{"flow": {"node_name": "runtime1"}}
"#;

    fn compile(json: &str) -> CompiledFilters {
        FilterSpecLoader::parse_json(json, "test.json")
            .expect("should parse")
            .compile(&default_filters())
            .expect("should compile")
    }

    async fn run(filters: &CompiledFilters, format: OutputFormat) -> (FilterStats, String) {
        let mut out = Vec::new();
        let stats = filter_stream(
            EVENTS.as_bytes(),
            filters,
            &OutputWriter::new(format),
            &mut out,
        )
        .await
        .expect("stream should be processed");
        (stats, String::from_utf8(out).expect("valid UTF-8"))
    }

    #[tokio::test]
    async fn allow_and_deny_lists_are_applied() {
        let filters = compile(
            r#"{"allowlist": [{"node_name": ["k8s*"]}], "denylist": [{"node_name": ["k8s2"]}]}"#,
        );
        let (stats, output) = run(&filters, OutputFormat::Text).await;

        assert_eq!(
            stats,
            FilterStats {
                read: 5,
                passed: 1,
                dropped: 3,
                malformed: 1,
            }
        );
        assert_eq!(output, "- [k8s1] - -> www.cilium.io UNKNOWN\n");
    }

    #[tokio::test]
    async fn empty_spec_passes_everything() {
        let filters = compile("{}");
        let (stats, output) = run(&filters, OutputFormat::Json).await;

        assert_eq!(stats.passed, 4);
        assert_eq!(stats.malformed, 1);
        let events: Vec<Event> = output
            .lines()
            .map(|l| serde_json::from_str(l).expect("each line is an event"))
            .collect();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].node_name(), "k8s1");
        assert!(events[2].flow().is_none(), "lost events pass through");
    }

    #[tokio::test]
    async fn denylist_alone_drops_only_matches() {
        let filters = compile(r#"{"denylist": [{"destination_fqdn": ["*.cilium.io"]}]}"#);
        let (stats, _) = run(&filters, OutputFormat::Text).await;
        assert_eq!(stats.passed, 3);
        assert_eq!(stats.dropped, 1);
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_skipped() {
        let input: &[u8] =
            b"{\"flow\": {\"node_name\": \"k8s1\"}}\n\xff\xfe garbage\r\n{\"flow\": {\"node_name\": \"k8s2\"}}\r\n";
        let filters = compile("{}");

        let mut out = Vec::new();
        let stats = filter_stream(
            input,
            &filters,
            &OutputWriter::new(OutputFormat::Json),
            &mut out,
        )
        .await
        .expect("a bad line must not abort the stream");

        assert_eq!(
            stats,
            FilterStats {
                read: 3,
                passed: 2,
                dropped: 0,
                malformed: 1,
            }
        );
        let events: Vec<Event> = String::from_utf8(out)
            .expect("valid UTF-8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("each line is an event"))
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].node_name(), "k8s2");
    }

    #[tokio::test]
    async fn load_filters_without_spec_allows_all() {
        let filters = load_filters(None, &HubbleConfig::default())
            .await
            .expect("defaults should compile");
        assert!(filters.allowlist.is_empty());
        assert!(filters.denylist.is_empty());
    }

    #[tokio::test]
    async fn load_filters_prefers_cli_spec_over_config() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("filters.json");
        std::fs::write(&path, r#"{"denylist": [{"node_name": ["k8s2"]}]}"#).expect("write");

        let mut config = HubbleConfig::default();
        config.filter.spec_path = "/nonexistent/filters.yaml".to_owned();

        let filters = load_filters(Some(path), &config)
            .await
            .expect("CLI spec should be used");
        assert_eq!(filters.denylist.len(), 1);

        let err = load_filters(None, &config)
            .await
            .expect_err("configured spec path does not exist");
        assert_eq!(err.exit_code(), 3);
    }
}
