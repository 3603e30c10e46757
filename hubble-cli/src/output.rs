//! Output formatting abstraction for text vs JSON rendering
//!
//! Command handlers hand payloads to [`OutputWriter`], which owns format switching.

use std::io::Write;

use serde::Serialize;

use hubble_core::types::Event;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes CLI payloads to stdout in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a report to stdout.
    ///
    /// Text goes through `Render::render_text()`, JSON is pretty-printed.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.render_to(&mut handle, payload)
    }

    /// Render a single streamed record (one line per record).
    ///
    /// JSON output is compact so the result stays valid JSON lines.
    pub fn render_line<T: Render + Serialize>(
        &self,
        w: &mut dyn Write,
        payload: &T,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }

    fn render_to<T: Render + Serialize>(
        &self,
        w: &mut dyn Write,
        payload: &T,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Human-readable text rendering, implemented alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

impl Render for Event {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubble_core::types::{EventPayload, Flow, LostEvents, Verdict};

    #[derive(Serialize)]
    struct TestPayload {
        field1: String,
        field2: u32,
    }

    impl Render for TestPayload {
        fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
            writeln!(w, "Field1: {}", self.field1)?;
            writeln!(w, "Field2: {}", self.field2)
        }
    }

    fn render(format: OutputFormat, payload: &TestPayload) -> String {
        let mut buffer = Vec::new();
        OutputWriter::new(format)
            .render_to(&mut buffer, payload)
            .expect("rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_text_format_uses_render_text() {
        let output = render(
            OutputFormat::Text,
            &TestPayload {
                field1: "test value".to_owned(),
                field2: 42,
            },
        );
        assert!(output.contains("Field1: test value"));
        assert!(output.contains("Field2: 42"));
    }

    #[test]
    fn test_json_format_is_pretty() {
        let output = render(
            OutputFormat::Json,
            &TestPayload {
                field1: "test".to_owned(),
                field2: 100,
            },
        );
        assert!(output.contains('\n'), "pretty JSON should contain newlines");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(parsed["field1"].as_str(), Some("test"));
        assert_eq!(parsed["field2"].as_u64(), Some(100));
    }

    #[test]
    fn test_render_line_json_is_single_line() {
        let event = Event::from_flow(Flow {
            node_name: "k8s1".to_owned(),
            destination_names: vec!["cilium.io".to_owned()],
            verdict: Verdict::Forwarded,
            ..Default::default()
        });

        let mut buffer = Vec::new();
        OutputWriter::new(OutputFormat::Json)
            .render_line(&mut buffer, &event)
            .expect("rendering should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");

        assert_eq!(output.lines().count(), 1);
        let parsed: Event = serde_json::from_str(output.trim()).expect("should parse back");
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_render_line_text_event() {
        let flow = Event::from_flow(Flow {
            node_name: "k8s1".to_owned(),
            source_names: vec!["a.cilium.io".to_owned()],
            verdict: Verdict::Dropped,
            ..Default::default()
        });
        let lost = Event {
            timestamp: None,
            payload: EventPayload::LostEvents(LostEvents {
                num_events_lost: 7,
            }),
        };

        let writer = OutputWriter::new(OutputFormat::Text);
        let mut buffer = Vec::new();
        writer.render_line(&mut buffer, &flow).expect("flow");
        writer.render_line(&mut buffer, &lost).expect("lost");
        let output = String::from_utf8(buffer).expect("valid UTF-8");

        assert_eq!(
            output,
            "- [k8s1] a.cilium.io -> - DROPPED\nlost 7 events\n"
        );
    }
}
