use std::io::{self, Write};

use serde::Serialize;

use crate::app::{ExportResult, ProgressSink};
use crate::kegg::PathwayEntry;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

pub struct TextProgress;

impl ProgressSink for TextProgress {
    fn pathway(&self, entry: &PathwayEntry) {
        println!("{}", entry.entry_id);
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_export(result: &ExportResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn pathway(&self, _entry: &PathwayEntry) {}
}
