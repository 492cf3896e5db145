// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant decoding of client-supplied and stored JSON sub-documents.
//!
//! Malformed optional JSON never fails a whole operation: each blob passes
//! through exactly one decode-with-default step at the boundary and typed
//! values flow from there.

use serde::de::DeserializeOwned;

/// Decode a JSON blob, falling back to `T::default()` on absence or any
/// parse failure.
pub fn decode_or_default<T>(raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

/// Parse an amenities field tolerantly.
///
/// Accepts a JSON-encoded string list, or a comma/newline separated string.
/// Entries are trimmed and empties dropped; total failure yields an empty
/// set.
pub fn parse_amenities(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list;
    }
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a form-style boolean flag ("1" or "true" are truthy).
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("1") | Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyAddress, PropertyFeatures};

    #[test]
    fn amenities_absent_yields_empty_set() {
        assert!(parse_amenities(None).is_empty());
        assert!(parse_amenities(Some("")).is_empty());
        assert!(parse_amenities(Some("   ")).is_empty());
    }

    #[test]
    fn amenities_delimited_string_is_trimmed_and_filtered() {
        assert_eq!(parse_amenities(Some("A, B,,C")), vec!["A", "B", "C"]);
        assert_eq!(
            parse_amenities(Some("Pool\nGym\n\n Garden ")),
            vec!["Pool", "Gym", "Garden"]
        );
    }

    #[test]
    fn amenities_json_list_is_accepted_verbatim() {
        assert_eq!(
            parse_amenities(Some(r#"["Air Conditioning","Free WIFI"]"#)),
            vec!["Air Conditioning", "Free WIFI"]
        );
    }

    #[test]
    fn amenities_malformed_json_falls_back_to_splitting() {
        // Broken JSON but a usable comma list.
        assert_eq!(parse_amenities(Some(r#"["A", "B"#)), vec!["[\"A\"", "\"B"]);
    }

    #[test]
    fn features_decode_with_default_on_malformed_input() {
        let ok: PropertyFeatures =
            decode_or_default(Some(r#"{"bedrooms":3,"garage":1,"elevator":1}"#));
        assert_eq!(ok.bedrooms, 3);
        assert_eq!(ok.garage, 1);
        assert_eq!(ok.elevator, 1);

        let broken: PropertyFeatures = decode_or_default(Some("{not json"));
        assert_eq!(broken, PropertyFeatures::default());

        let absent: PropertyFeatures = decode_or_default(None);
        assert_eq!(absent, PropertyFeatures::default());
    }

    #[test]
    fn address_decode_tolerates_partial_documents() {
        let addr: PropertyAddress =
            decode_or_default(Some(r#"{"city":"Amman","street":"Zahran St"}"#));
        assert_eq!(addr.city, "Amman");
        assert_eq!(addr.street, "Zahran St");
        assert_eq!(addr.area, "");
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("true")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("yes")));
        assert!(!parse_flag(None));
    }
}
