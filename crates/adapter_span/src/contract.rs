//! Typed view over future and option contract elements.

use risk_core::format::{format_two_places, parse_number};
use risk_core::{InstrumentType, MonthKey, OptionRight, ScenarioArray};

use crate::document::{Element, Node, SpanDocument};

/// Tag name of a future contract element.
pub const FUTURE_ELEMENT: &str = "fut";
/// Tag name of an option contract element.
pub const OPTION_ELEMENT: &str = "opt";
/// Tag name of the scenario-array element.
pub const SCENARIO_ARRAY_ELEMENT: &str = "ra";

/// Children of the scenario array that are not scenario values.
const NON_SCENARIO_CHILDREN: [&str; 2] = ["r", "d"];

/// One future or option element, addressed by its position among all
/// contract elements of the document.
#[derive(Clone, Copy, Debug)]
pub struct ContractElement<'a> {
    element: &'a Element,
    instrument: InstrumentType,
    ordinal: usize,
}

impl<'a> ContractElement<'a> {
    /// Wrap an element if it is a contract element.
    pub fn new(element: &'a Element, ordinal: usize) -> Option<Self> {
        let instrument = contract_kind(element)?;
        Some(Self {
            element,
            instrument,
            ordinal,
        })
    }

    /// Position among all contract elements, in document order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Future or option.
    pub fn instrument(&self) -> InstrumentType {
        self.instrument
    }

    /// Underlying element.
    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Exchange contract id (`cId`).
    pub fn contract_id(&self) -> Option<String> {
        self.element.descendant_text("cId")
    }

    /// Raw expiry code (`pe`).
    pub fn expiry_code(&self) -> Option<String> {
        self.element.descendant_text("pe")
    }

    /// Month derived from the expiry code; [`MonthKey::Unknown`] when the
    /// code is absent or malformed.
    pub fn month(&self) -> MonthKey {
        self.expiry_code()
            .map(|code| MonthKey::from_expiry_code(&code))
            .unwrap_or(MonthKey::Unknown)
    }

    /// Portfolio id of the underlying (`undC/pfId`).
    pub fn underlying_pf_id(&self) -> Option<String> {
        self.element
            .first_descendant("undC")?
            .descendant_text("pfId")
            .filter(|id| !id.is_empty())
    }

    /// Strike text (`k`), options only.
    pub fn strike_text(&self) -> Option<String> {
        if self.instrument.is_option() {
            self.element.descendant_text("k")
        } else {
            None
        }
    }

    /// Numeric strike; `0.0` for futures and for missing or non-numeric text.
    pub fn strike(&self) -> f64 {
        self.strike_text()
            .and_then(|k| parse_number(&k))
            .unwrap_or(0.0)
    }

    /// Call/put code (`o`), upper-cased, options only.
    pub fn right_code(&self) -> Option<String> {
        if self.instrument.is_option() {
            self.element
                .descendant_text("o")
                .map(|o| o.to_uppercase())
                .filter(|o| !o.is_empty())
        } else {
            None
        }
    }

    /// Parsed call/put flag.
    pub fn right(&self) -> Option<OptionRight> {
        self.right_code().and_then(|o| OptionRight::from_code(&o))
    }

    /// Price-scan range (`scanRate/priceScan`).
    pub fn price_scan(&self) -> Option<f64> {
        self.element
            .first_descendant("scanRate")?
            .descendant_text("priceScan")
            .and_then(|text| parse_number(&text))
    }

    /// The scenario-array element, if present.
    pub fn scenario_element(&self) -> Option<&'a Element> {
        self.element.first_descendant(SCENARIO_ARRAY_ELEMENT)
    }

    /// Trimmed text of each scenario value, in order.
    ///
    /// `None` when the array element is missing or holds no values.
    pub fn scenario_texts(&self) -> Option<Vec<String>> {
        let texts: Vec<String> = scenario_children(self.scenario_element()?)
            .map(|e| e.text().trim().to_string())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts)
        }
    }

    /// Scenario values with non-numeric text coerced to `0`, plus the number
    /// of coerced entries.
    pub fn scenarios(&self) -> Option<(ScenarioArray, usize)> {
        let texts = self.scenario_texts()?;
        let mut coerced = 0;
        let values = texts
            .iter()
            .map(|t| {
                parse_number(t).unwrap_or_else(|| {
                    coerced += 1;
                    0.0
                })
            })
            .collect();
        Some((ScenarioArray::new(values), coerced))
    }

    /// Document-local identity: contract id, expiry code, strike and
    /// call/put flag.
    ///
    /// Numeric strikes are written with two decimals so `62000` and
    /// `62000.0` match.
    pub fn snapshot_key(&self) -> String {
        let strike = self
            .strike_text()
            .map(|k| parse_number(&k).map(format_two_places).unwrap_or(k))
            .unwrap_or_default();
        format!(
            "{}|{}|{}|{}",
            self.contract_id().unwrap_or_default(),
            self.expiry_code().unwrap_or_default(),
            strike,
            self.right_code().unwrap_or_default()
        )
    }
}

/// Instrument type for a contract tag name.
pub(crate) fn contract_kind(element: &Element) -> Option<InstrumentType> {
    match element.name() {
        FUTURE_ELEMENT => Some(InstrumentType::Future),
        OPTION_ELEMENT => Some(InstrumentType::Option),
        _ => None,
    }
}

/// Scenario-value children of a scenario-array element.
pub(crate) fn scenario_children(array: &Element) -> impl Iterator<Item = &Element> {
    array.child_elements().filter(|e| is_scenario_value(e))
}

pub(crate) fn is_scenario_value(element: &Element) -> bool {
    !NON_SCENARIO_CHILDREN
        .iter()
        .any(|tag| element.name().eq_ignore_ascii_case(tag))
}

/// All contract elements in document order.
///
/// Elements are visited depth-first, parent before children, and numbered
/// from `0` in that order.
pub fn contract_elements(doc: &SpanDocument) -> Vec<ContractElement<'_>> {
    let mut found = Vec::new();
    visit(doc.root(), &mut found);
    found
}

fn visit<'a>(element: &'a Element, found: &mut Vec<ContractElement<'a>>) {
    if let Some(contract) = ContractElement::new(element, found.len()) {
        found.push(contract);
    }
    for child in element.children() {
        if let Node::Element(e) = child {
            visit(e, found);
        }
    }
}
