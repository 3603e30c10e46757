//! `hubble-filter version` command handler

use std::io::Write;

use serde::Serialize;

use hubble_core::version::Version;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `version` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    writer.render(&VersionReport::current())
}

#[derive(Debug, Serialize)]
pub struct VersionReport {
    pub server: Version,
    pub relay: Version,
}

impl VersionReport {
    pub fn current() -> Self {
        Self {
            server: Version::server(),
            relay: Version::relay(),
        }
    }
}

impl Render for VersionReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{}", self.server)?;
        writeln!(w, "{}", self.relay)
    }
}
