//! Lenient markup-table reader.
//!
//! Settlement reports are HTML, not XML: void tags go unclosed, end tags may
//! not match, and `&nbsp;` is common. The reader tolerates all of that and
//! only looks at `table`, `tr`, `td` and `th`. Tag names are compared
//! case-insensitively.

use std::borrow::Cow;

use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::BhavError;

/// Rows of a table, each a list of trimmed cell texts.
pub type Rows = Vec<Vec<String>>;

/// Read the first table of a document.
///
/// Nested tables are skipped. Text of nested elements inside a cell is
/// concatenated.
///
/// # Errors
///
/// [`BhavError::MalformedDocument`] when the text cannot be scanned or holds
/// no table.
///
/// # Examples
///
/// ```
/// use adapter_bhav::table::read_first_table;
///
/// let rows = read_first_table(
///     "<html><body><TABLE><tr><th>Symbol</th></tr><tr><td><b>GOLD</b></td></tr></TABLE>",
/// ).unwrap();
/// assert_eq!(rows, vec![vec!["Symbol".to_string()], vec!["GOLD".to_string()]]);
/// ```
pub fn read_first_table(html: &str) -> Result<Rows, BhavError> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;

    let mut scan = TableScan::default();
    loop {
        let event = reader.read_event().map_err(|e| {
            BhavError::malformed(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;
        match event {
            Event::Start(e) => scan.open(&tag(e.name().as_ref())),
            Event::Empty(e) => {
                let name = tag(e.name().as_ref());
                scan.open(&name);
                scan.close(&name);
            }
            Event::End(e) => scan.close(&tag(e.name().as_ref())),
            Event::Text(e) => scan.text(&decode_text(&e)),
            Event::CData(e) => scan.text(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
        if scan.finished {
            break;
        }
    }

    if !scan.found {
        return Err(BhavError::malformed("no table found"));
    }
    scan.finish_row();
    Ok(scan.rows)
}

#[derive(Default)]
struct TableScan {
    found: bool,
    finished: bool,
    inside: bool,
    nested: usize,
    rows: Rows,
    row: Option<Vec<String>>,
    cell: Option<String>,
}

impl TableScan {
    fn open(&mut self, name: &str) {
        if self.finished {
            return;
        }
        if name == "table" {
            if self.inside {
                self.nested += 1;
            } else {
                self.found = true;
                self.inside = true;
            }
            return;
        }
        if !self.inside || self.nested > 0 {
            return;
        }
        match name {
            "tr" => {
                self.finish_row();
                self.row = Some(Vec::new());
            }
            "td" | "th" => {
                self.finish_cell();
                if self.row.is_none() {
                    self.row = Some(Vec::new());
                }
                self.cell = Some(String::new());
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        if !self.inside || self.finished {
            return;
        }
        match name {
            "table" if self.nested > 0 => self.nested -= 1,
            "table" => {
                self.finish_row();
                self.inside = false;
                self.finished = true;
            }
            _ if self.nested > 0 => {}
            "td" | "th" => self.finish_cell(),
            "tr" => self.finish_row(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.nested > 0 {
            return;
        }
        if let Some(cell) = self.cell.as_mut() {
            cell.push_str(text);
        }
    }

    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            if let Some(row) = self.row.as_mut() {
                row.push(collapse(&cell));
            }
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if let Some(row) = self.row.take() {
            self.rows.push(row);
        }
    }
}

fn tag(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn decode_text(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    let unescaped = unescape_with(&raw, |entity| match entity {
        "nbsp" => Some("\u{a0}"),
        other => resolve_predefined_entity(other),
    })
    .unwrap_or(Cow::Borrowed(raw.as_ref()));
    unescaped.into_owned()
}

/// Trim and collapse runs of whitespace to one space.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerates_unclosed_and_mismatched_tags() {
        let html = "<html><head><meta charset=utf-8><title>Bhav</title></head><body>\
                    <p>Report<br></p>\
                    <table border=1><tr><th>Symbol<th>Close</tr>\
                    <tr><td>GOLD</td><td>1,234.50</td></tr></table></body></html>";
        let rows = read_first_table(html).unwrap();
        assert_eq!(rows, vec![vec!["Symbol", "Close"], vec!["GOLD", "1,234.50"]]);
    }

    #[test]
    fn test_first_table_only_and_nested_skipped() {
        let html = "<div><table><tr><td>A<table><tr><td>inner</td></tr></table></td></tr></table>\
                    <table><tr><td>B</td></tr></table></div>";
        let rows = read_first_table(html).unwrap();
        assert_eq!(rows, vec![vec!["A"]]);
    }

    #[test]
    fn test_entities_and_whitespace() {
        let html = "<table><tr><td>&nbsp;GOLD&nbsp;M </td><td>A &amp; B</td><td/></tr></table>";
        let rows = read_first_table(html).unwrap();
        assert_eq!(rows, vec![vec!["GOLD M", "A & B", ""]]);
    }

    #[test]
    fn test_no_table_is_malformed() {
        let err = read_first_table("<html><body>No data</body></html>").unwrap_err();
        assert!(matches!(err, BhavError::MalformedDocument(_)));
        assert!(read_first_table("plain text").is_err());
    }
}
