//! Portfolio-id to symbol lookup.

use std::collections::HashMap;

use risk_core::normalize_symbol;

use crate::document::SpanDocument;

/// Portfolio element names that carry an id-to-code mapping, in the order
/// they are read. Later entries overwrite earlier ones.
pub const PORTFOLIO_ELEMENTS: [&str; 5] = ["phyPf", "futPf", "optPf", "oofPf", "oopPf"];

/// Immutable mapping from internal portfolio id to underlying symbol.
///
/// Built once per document and passed by reference into extraction.
///
/// # Examples
///
/// ```
/// use adapter_span::{SpanDocument, SymbolTable};
///
/// let doc = SpanDocument::parse(
///     "<spanFile><phyPf><pfId>7</pfId><pfCode>gold m</pfCode></phyPf></spanFile>",
/// ).unwrap();
/// let table = SymbolTable::from_document(&doc);
/// assert_eq!(table.resolve("7"), Some("GOLDM"));
/// assert_eq!(table.resolve("8"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    codes: HashMap<String, String>,
}

impl SymbolTable {
    /// Read every portfolio element of the document.
    pub fn from_document(doc: &SpanDocument) -> Self {
        let mut table = Self::default();
        for name in PORTFOLIO_ELEMENTS {
            for pf in doc.elements_named(name) {
                let id = pf.descendant_text("pfId").unwrap_or_default();
                let code = normalize_symbol(&pf.descendant_text("pfCode").unwrap_or_default());
                if !id.is_empty() && !code.is_empty() {
                    table.codes.insert(id, code);
                }
            }
        }
        tracing::debug!(entries = table.len(), "Built portfolio symbol table");
        table
    }

    /// Insert or overwrite a mapping.
    pub fn insert(&mut self, pf_id: impl Into<String>, code: &str) {
        self.codes.insert(pf_id.into(), normalize_symbol(code));
    }

    /// Symbol for an internal portfolio id.
    pub fn resolve(&self, pf_id: &str) -> Option<&str> {
        self.codes.get(pf_id.trim()).map(String::as_str)
    }

    /// Number of mapped ids.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_entries_win() {
        let doc = SpanDocument::parse(
            "<s>\
               <phyPf><pfId>1</pfId><pfCode>OLD</pfCode></phyPf>\
               <futPf><pfId>1</pfId><pfCode>NEW</pfCode><fut/></futPf>\
             </s>",
        )
        .unwrap();
        let table = SymbolTable::from_document(&doc);
        assert_eq!(table.resolve("1"), Some("NEW"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_incomplete_entries_are_ignored() {
        let doc = SpanDocument::parse(
            "<s><phyPf><pfId>1</pfId></phyPf><phyPf><pfCode>X</pfCode></phyPf></s>",
        )
        .unwrap();
        assert!(SymbolTable::from_document(&doc).is_empty());
    }

    #[test]
    fn test_insert_normalises() {
        let mut table = SymbolTable::default();
        table.insert("9", " crude oil ");
        assert_eq!(table.resolve(" 9 "), Some("CRUDEOIL"));
    }
}
