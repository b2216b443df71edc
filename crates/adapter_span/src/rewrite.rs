//! Functional rewrite of scenario values.
//!
//! The source document is never mutated. A new tree is built in which the
//! chosen contracts carry new scenario text and every other node is cloned.

use std::collections::HashMap;

use crate::contract::{contract_kind, is_scenario_value, SCENARIO_ARRAY_ELEMENT};
use crate::document::{Element, Node, SpanDocument};

impl SpanDocument {
    /// Copy of this document with scenario values replaced.
    ///
    /// `replacements` maps a contract ordinal (see
    /// [`crate::contract_elements`]) to new texts for its leading scenario
    /// values. Entry `i` replaces the `i`-th value of the contract's first
    /// scenario array. Values beyond the replacement list keep their
    /// original text, and extra replacement entries are ignored.
    pub fn with_scenario_values(&self, replacements: &HashMap<usize, Vec<String>>) -> SpanDocument {
        let mut ordinal = 0;
        let nodes = self
            .nodes()
            .iter()
            .map(|node| rewrite_node(node, replacements, &mut ordinal))
            .collect();
        SpanDocument::from_parts(nodes, self.root_index())
    }
}

fn rewrite_node(
    node: &Node,
    replacements: &HashMap<usize, Vec<String>>,
    ordinal: &mut usize,
) -> Node {
    match node {
        Node::Element(e) => Node::Element(rewrite_element(e, replacements, ordinal)),
        other => other.clone(),
    }
}

fn rewrite_element(
    element: &Element,
    replacements: &HashMap<usize, Vec<String>>,
    ordinal: &mut usize,
) -> Element {
    // Same pre-order numbering as contract_elements.
    let own = contract_kind(element).map(|_| {
        let current = *ordinal;
        *ordinal += 1;
        current
    });

    let children = element
        .children()
        .iter()
        .map(|child| rewrite_node(child, replacements, ordinal))
        .collect();
    let rebuilt = element.with_children(children);

    match own.and_then(|n| replacements.get(&n)) {
        Some(texts) => {
            let mut done = false;
            replace_first_array(&rebuilt, texts, &mut done)
        }
        None => rebuilt,
    }
}

fn replace_first_array(element: &Element, texts: &[String], done: &mut bool) -> Element {
    let children = element
        .children()
        .iter()
        .map(|child| match child {
            Node::Element(e) if !*done && e.name() == SCENARIO_ARRAY_ELEMENT => {
                *done = true;
                Node::Element(replace_values(e, texts))
            }
            Node::Element(e) if !*done => Node::Element(replace_first_array(e, texts, done)),
            other => other.clone(),
        })
        .collect();
    element.with_children(children)
}

fn replace_values(array: &Element, texts: &[String]) -> Element {
    let mut index = 0;
    let children = array
        .children()
        .iter()
        .map(|child| match child {
            Node::Element(e) if is_scenario_value(e) => {
                let replaced = match texts.get(index) {
                    Some(text) => e.with_text(text),
                    None => e.clone(),
                };
                index += 1;
                Node::Element(replaced)
            }
            other => other.clone(),
        })
        .collect();
    array.with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::contract_elements;

    const DOC: &str = "<s><fut><cId>1</cId><ra><r>1</r><a>3</a><a>9</a><a>1</a></ra></fut>\
                       <fut><cId>2</cId><ra><a>7</a></ra></fut></s>";

    #[test]
    fn test_replaces_leading_values_only() {
        let doc = SpanDocument::parse(DOC).unwrap();
        let mut replacements = HashMap::new();
        replacements.insert(0, vec!["5".to_string(), "9".to_string()]);

        let out = doc.with_scenario_values(&replacements);
        assert_eq!(
            out.to_xml().unwrap(),
            "<s><fut><cId>1</cId><ra><r>1</r><a>5</a><a>9</a><a>1</a></ra></fut>\
             <fut><cId>2</cId><ra><a>7</a></ra></fut></s>"
        );
        // source untouched
        assert_eq!(doc.to_xml().unwrap(), DOC);
    }

    #[test]
    fn test_targets_by_ordinal() {
        let doc = SpanDocument::parse(DOC).unwrap();
        let mut replacements = HashMap::new();
        replacements.insert(1, vec!["-2.5".to_string(), "ignored".to_string()]);

        let out = doc.with_scenario_values(&replacements);
        let contracts = contract_elements(&out);
        assert_eq!(contracts[0].scenario_texts().unwrap(), vec!["3", "9", "1"]);
        assert_eq!(contracts[1].scenario_texts().unwrap(), vec!["-2.5"]);
    }

    #[test]
    fn test_empty_replacements_clone_document() {
        let doc = SpanDocument::parse(DOC).unwrap();
        assert_eq!(doc.with_scenario_values(&HashMap::new()), doc);
    }
}
