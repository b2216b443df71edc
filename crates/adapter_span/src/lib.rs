//! # adapter_span: Risk-Scenario Document Adapter
//!
//! Reads exchange risk-scenario (SPAN) XML into a lossless tree, extracts
//! keyed [`risk_core::Contract`] records from it, and writes rewritten trees
//! back to the same markup dialect.
//!
//! ## Usage
//!
//! ```rust
//! use adapter_span::SpanParser;
//!
//! let xml = r#"<spanFile>
//!   <phyPf><pfId>7</pfId><pfCode>XYZ</pfCode></phyPf>
//!   <futPf><fut><pe>20250130</pe><undC><pfId>7</pfId></undC>
//!     <ra><a>10</a><a>-20</a><a>5</a></ra></fut></futPf>
//! </spanFile>"#;
//!
//! let extraction = SpanParser::parse_contracts(xml).unwrap();
//! assert_eq!(extraction.contracts.len(), 1);
//! assert_eq!(extraction.contracts[0].worst_absolute(), 20.0);
//! ```

#![deny(missing_docs)]

pub mod contract;
pub mod document;
pub mod error;
pub mod extract;
mod rewrite;
pub mod symbols;

pub use contract::{contract_elements, ContractElement};
pub use document::{Element, Node, SpanDocument};
pub use error::SpanError;
pub use extract::{extract_contracts, ContractExtraction, ExtractionStats};
pub use symbols::SymbolTable;

/// Risk-scenario document parser.
pub struct SpanParser;

impl SpanParser {
    /// Parse markup text into a document tree.
    ///
    /// # Errors
    ///
    /// [`SpanError::MalformedDocument`] when the text is not well-formed.
    pub fn parse(xml: &str) -> Result<SpanDocument, SpanError> {
        SpanDocument::parse(xml)
    }

    /// Parse markup text and extract its contracts.
    ///
    /// A document without contract elements yields an empty extraction.
    pub fn parse_contracts(xml: &str) -> Result<ContractExtraction, SpanError> {
        let doc = SpanDocument::parse(xml)?;
        let symbols = SymbolTable::from_document(&doc);
        Ok(extract_contracts(&doc, &symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contracts_rejects_malformed_text() {
        let err = SpanParser::parse_contracts("<spanFile><fut></spanFile>").unwrap_err();
        assert!(matches!(err, SpanError::MalformedDocument(_)));
    }

    #[test]
    fn test_parse_contracts_without_contracts() {
        let out = SpanParser::parse_contracts("<spanFile><pointInTime/></spanFile>").unwrap();
        assert!(out.contracts.is_empty());
        assert_eq!(out.stats.contract_elements, 0);
    }
}
