use serde::Serialize;

use super::{Formatter, RunSummary, iso8601_timestamp};

pub struct JsonFormatter;

#[derive(Serialize)]
struct Record<'a> {
    ts: String,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

impl Formatter for JsonFormatter {
    fn format(&self, summary: &RunSummary) -> String {
        let record = Record {
            ts: iso8601_timestamp(),
            summary,
        };
        // Non-finite PSNR values serialize as null
        serde_json::to_string(&record).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
