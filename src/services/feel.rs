//! Textual scan of FEEL expressions for `person` / `situation` field paths.
//!
//! This is not a FEEL parser: paths inside string literals are picked up too.

use crate::domain::document::{first_segment, DecisionDocument, FieldReference, RootContext};
use regex::Regex;
use std::collections::BTreeSet;

/// Field path below a root: `name`, `name[]`, `name.sub`, `name[].sub.leaf`.
const PATH: &str = r"(\w+(?:\[\])?(?:\.\w+)*)";

/// The list of people inside a situation. Paths through it are person fields.
const PEOPLE_ACCESSOR: &str = "people";

pub struct FeelScanner {
    person: Regex,
    people: Regex,
    situation: Regex,
}

impl Default for FeelScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FeelScanner {
    pub fn new() -> Self {
        Self {
            person: compile(&format!(r"person\.{PATH}")),
            people: compile(&format!(r"situation\.{PEOPLE_ACCESSOR}\[.*?\]\.{PATH}")),
            situation: compile(&format!(r"situation\.{PATH}")),
        }
    }

    /// Every reference in one expression, in rule order: direct person paths,
    /// person paths through `situation.people[..]`, then situation paths.
    pub fn scan(&self, text: &str) -> Vec<FieldReference> {
        let mut out = Vec::new();
        for caps in self.person.captures_iter(text) {
            out.push(reference(RootContext::Person, &caps[1], false));
        }
        for caps in self.people.captures_iter(text) {
            out.push(reference(RootContext::Person, &caps[1], true));
        }
        for caps in self.situation.captures_iter(text) {
            let path = &caps[1];
            if first_segment(path) == PEOPLE_ACCESSOR {
                continue;
            }
            out.push(reference(RootContext::Situation, path, false));
        }
        out
    }
}

fn compile(pattern: &str) -> Regex {
    // Patterns are fixed at compile time; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid field pattern {pattern}: {e}"))
}

fn reference(root: RootContext, path: &str, indirect: bool) -> FieldReference {
    FieldReference {
        root,
        path: path.to_string(),
        uses_collection_accessor: path.contains("[]"),
        indirect,
    }
}

/// Field paths per root context. Each reference contributes its full path and
/// its first segment, so `incomeSources[].type` also yields `incomeSources`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub person: BTreeSet<String>,
    pub situation: BTreeSet<String>,
}

impl ExtractedFields {
    pub fn insert(&mut self, r: &FieldReference) {
        let set = match r.root {
            RootContext::Person => &mut self.person,
            RootContext::Situation => &mut self.situation,
        };
        set.insert(r.path.clone());
        set.insert(r.first_segment().to_string());
    }

    pub fn merge(&mut self, other: ExtractedFields) {
        self.person.extend(other.person);
        self.situation.extend(other.situation);
    }

    pub fn len(&self) -> usize {
        self.person.len() + self.situation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.person.is_empty() && self.situation.is_empty()
    }
}

pub fn extract_from_text(scanner: &FeelScanner, text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::default();
    for r in scanner.scan(text) {
        tracing::trace!(root = r.root.as_str(), path = %r.path, indirect = r.indirect, "field reference");
        fields.insert(&r);
    }
    fields
}

/// Union of the references found in every expression of every document.
pub fn extract_field_references(docs: &[DecisionDocument]) -> ExtractedFields {
    let scanner = FeelScanner::new();
    let mut merged = ExtractedFields::default();
    for doc in docs {
        for text in &doc.expressions {
            merged.merge(extract_from_text(&scanner, text));
        }
    }
    tracing::debug!(
        person = merged.person.len(),
        situation = merged.situation.len(),
        "extracted field references"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> ExtractedFields {
        extract_from_text(&FeelScanner::new(), text)
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn direct_person_reference() {
        let f = extract(r#"person.dateOfBirth > date("2000-01-01")"#);
        assert_eq!(f.person, set(&["dateOfBirth"]));
        assert!(f.situation.is_empty());
    }

    #[test]
    fn person_through_people_list_is_a_person_field() {
        let f = extract("situation.people[id = parameters.personId].isBlindOrDisabled");
        assert!(f.person.contains("isBlindOrDisabled"));
        assert!(!f.situation.contains("people"));
        assert!(f.situation.is_empty());
    }

    #[test]
    fn nested_and_collection_paths_keep_first_segment() {
        let f = extract("sum(person.incomeSources[].monthlyAmount) + person.address.zip");
        assert_eq!(
            f.person,
            set(&[
                "address",
                "address.zip",
                "incomeSources",
                "incomeSources[].monthlyAmount"
            ])
        );
    }

    #[test]
    fn situation_fields_exclude_people_accessor() {
        let f = extract(
            "situation.evaluationDate - situation.people[1].dateOfBirth; count(situation.people) > situation.householdSize",
        );
        assert_eq!(f.situation, set(&["evaluationDate", "householdSize"]));
        assert_eq!(f.person, set(&["dateOfBirth"]));
    }

    #[test]
    fn scan_marks_indirect_and_collection_references() {
        let refs = FeelScanner::new()
            .scan("situation.people[id = situation.primaryPersonId].incomeSources[].type");
        let people: Vec<_> = refs.iter().filter(|r| r.indirect).collect();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].root, RootContext::Person);
        assert!(people[0].uses_collection_accessor);
        assert_eq!(people[0].first_segment(), "incomeSources");
        assert!(refs
            .iter()
            .any(|r| r.root == RootContext::Situation && r.path == "primaryPersonId"));
    }

    #[test]
    fn string_literals_are_scanned_too() {
        // Known imprecision of a textual scan.
        let f = extract(r#""see person.notes for details""#);
        assert!(f.person.contains("notes"));
    }

    #[test]
    fn merging_across_documents_is_a_union() {
        let doc = |path: &str, exprs: &[&str]| DecisionDocument {
            path: path.into(),
            model_name: None,
            namespace: None,
            imports: vec![],
            expressions: exprs.iter().map(|s| s.to_string()).collect(),
            item_definitions: vec![],
            input_data: vec![],
        };
        let merged = extract_field_references(&[
            doc("a.dmn", &["person.age > 1", "situation.state = \"PA\""]),
            doc("b.dmn", &["person.age < 90", "person.isBlind"]),
        ]);
        assert_eq!(merged.person, set(&["age", "isBlind"]));
        assert_eq!(merged.situation, set(&["state"]));
        assert_eq!(merged.len(), 3);
    }
}
