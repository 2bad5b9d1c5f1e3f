//! Export artifact rendering.
//!
//! The artifact wraps every record in a `{"domains": [...]}` envelope, one entry per
//! line, each entry written as `{"name": "...", "amount": "..."}`. Entries go through
//! `serde_json` so quotes and control characters inside values are escaped.

use crate::domain::model::{ExportArtifact, Record};
use crate::utils::error::Result;
use serde::Serialize;
use std::io;

const HEADER: &[u8] = b"{\"domains\": [\n";
const ENTRY_SEPARATOR: &[u8] = b",\n";
const FOOTER: &[u8] = b"]}\n";

#[derive(Serialize)]
struct ArtifactEntry<'a> {
    name: &'a str,
    amount: String,
}

impl<'a> From<&'a Record> for ArtifactEntry<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            name: &record.name,
            amount: record.amount_text(),
        }
    }
}

/// Compact JSON with a space after `:` and `,` inside objects.
struct EntryFormatter;

impl serde_json::ser::Formatter for EntryFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn render_records(records: &[Record]) -> Result<String> {
    let mut out = Vec::with_capacity(HEADER.len() + FOOTER.len() + records.len() * 48);
    out.extend_from_slice(HEADER);

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(ENTRY_SEPARATOR);
        }
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, EntryFormatter);
        ArtifactEntry::from(record).serialize(&mut serializer)?;
    }

    out.extend_from_slice(FOOTER);

    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

pub fn build_artifact(
    file_name: &str,
    records: &[Record],
    page_count: usize,
) -> Result<ExportArtifact> {
    Ok(ExportArtifact {
        file_name: file_name.to_string(),
        content: render_records(records)?,
        record_count: records.len(),
        page_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ListingPage;
    use serde_json::json;

    #[test]
    fn test_empty_listing_renders_bare_envelope() {
        assert_eq!(render_records(&[]).unwrap(), "{\"domains\": [\n]}\n");
    }

    #[test]
    fn test_entries_one_per_line_in_order() {
        let records = vec![
            Record::new("alpha", "1000"),
            Record::new("beta", json!(250)),
            Record::new("gamma", "12.5"),
        ];

        let rendered = render_records(&records).unwrap();

        assert_eq!(
            rendered,
            concat!(
                "{\"domains\": [\n",
                "{\"name\": \"alpha\", \"amount\": \"1000\"},\n",
                "{\"name\": \"beta\", \"amount\": \"250\"},\n",
                "{\"name\": \"gamma\", \"amount\": \"12.5\"}]}\n"
            )
        );
    }

    #[test]
    fn test_numeric_amounts_keep_source_digits() {
        let body = r#"{"domains":[
            {"name":"a","amount":1e3},
            {"name":"b","amount":1.50},
            {"name":"c","amount":123456789012345678901234}
        ]}"#;
        let page: ListingPage = serde_json::from_str(body).unwrap();

        let rendered = render_records(&page.domains).unwrap();

        assert_eq!(
            rendered,
            concat!(
                "{\"domains\": [\n",
                "{\"name\": \"a\", \"amount\": \"1e3\"},\n",
                "{\"name\": \"b\", \"amount\": \"1.50\"},\n",
                "{\"name\": \"c\", \"amount\": \"123456789012345678901234\"}]}\n"
            )
        );
    }

    #[test]
    fn test_quotes_in_values_stay_valid_json() {
        let records = vec![Record::new("odd\"name", "1\"000\n")];

        let rendered = render_records(&records).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["domains"][0]["name"], "odd\"name");
        assert_eq!(parsed["domains"][0]["amount"], "1\"000\n");
    }

    #[test]
    fn test_build_artifact_counts() {
        let records = vec![Record::new("a", "1"), Record::new("b", "2")];
        let artifact = build_artifact("listed.json", &records, 2).unwrap();

        assert_eq!(artifact.file_name, "listed.json");
        assert_eq!(artifact.record_count, 2);
        assert_eq!(artifact.page_count, 2);
        assert!(artifact.content.ends_with("]}\n"));
    }
}
