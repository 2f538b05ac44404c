//! Typed accessors over the semi-structured variant spec sheet
//!
//! Spec sheets are scraped key-value documents with no fixed schema: numbers
//! arrive as display strings with units ("18.5 kmpl", "5 Star"), keys vary in
//! casing, and some attributes sit one level down inside a named group. All
//! of that inconsistency is confined to this module; callers only ever see
//! `Option`-typed values. Absence is always `None`, never zero.

use crate::types::{SpecSheet, SpecValue};

/// Extract a numeric attribute from a spec sheet.
///
/// Locates the attribute best-effort, strips every character that is not a
/// digit or decimal point from its textual form, and parses the remainder.
/// Returns `None` when the attribute is missing or carries no numeric
/// content.
pub fn numeric(sheet: &SpecSheet, name: &str) -> Option<f64> {
    match find(sheet, name)? {
        SpecValue::Number(n) => Some(*n),
        SpecValue::Text(text) => parse_loose_number(text),
        _ => None,
    }
}

/// Extract a textual attribute, lowercased, for substring comparisons.
pub fn token(sheet: &SpecSheet, name: &str) -> Option<String> {
    match find(sheet, name)? {
        SpecValue::Text(text) => Some(text.to_lowercase()),
        SpecValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Locate an attribute: exact key first, then case-insensitive key, then one
/// level into nested groups. Deeper nesting is not searched.
fn find<'a>(sheet: &'a SpecSheet, name: &str) -> Option<&'a SpecValue> {
    if let Some(value) = sheet.get(name) {
        return Some(value);
    }

    if let Some(value) = sheet
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
    {
        return Some(value);
    }

    sheet.values().find_map(|value| match value {
        SpecValue::Group(group) => group
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value),
        _ => None,
    })
}

/// Parse a number out of a human-formatted string, ignoring units and other
/// decoration. `"18.5 kmpl"` -> 18.5, `"5 Star"` -> 5.0, `"N/A"` -> None.
fn parse_loose_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sheet(entries: &[(&str, SpecValue)]) -> SpecSheet {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn numeric_strips_units() {
        let sheet = sheet(&[("mileage", SpecValue::Text("18.5 kmpl".to_string()))]);
        assert_eq!(numeric(&sheet, "mileage"), Some(18.5));
    }

    #[test]
    fn numeric_parses_star_ratings() {
        let sheet = sheet(&[("safety_rating", SpecValue::Text("5 Star".to_string()))]);
        assert_eq!(numeric(&sheet, "safety_rating"), Some(5.0));
    }

    #[test]
    fn numeric_accepts_raw_json_numbers() {
        let sheet = sheet(&[("range", SpecValue::Number(465.0))]);
        assert_eq!(numeric(&sheet, "range"), Some(465.0));
    }

    #[test]
    fn absent_attribute_is_none_not_zero() {
        let sheet = sheet(&[("mileage", SpecValue::Text("18.5 kmpl".to_string()))]);
        assert_eq!(numeric(&sheet, "range"), None);
    }

    #[test]
    fn non_numeric_text_is_none() {
        let sheet = sheet(&[("mileage", SpecValue::Text("N/A".to_string()))]);
        assert_eq!(numeric(&sheet, "mileage"), None);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let sheet = sheet(&[("Mileage", SpecValue::Text("21 kmpl".to_string()))]);
        assert_eq!(numeric(&sheet, "mileage"), Some(21.0));
    }

    #[test]
    fn lookup_descends_into_groups() {
        let mut group = HashMap::new();
        group.insert(
            "drive_type".to_string(),
            SpecValue::Text("4WD".to_string()),
        );
        let sheet = sheet(&[("drivetrain", SpecValue::Group(group))]);
        assert_eq!(token(&sheet, "drive_type"), Some("4wd".to_string()));
    }

    #[test]
    fn token_lowercases() {
        let sheet = sheet(&[("drive_type", SpecValue::Text("AWD".to_string()))]);
        assert_eq!(token(&sheet, "drive_type"), Some("awd".to_string()));
    }
}
