//! Evidence path normalization.
//!
//! Historic clients wrote incident evidence in three shapes: a bare path,
//! a JSON array of paths, or a JSON-encoded string containing either of
//! those. [`EvidenceRefs::parse`] folds all of them into one tagged union
//! so downstream code never re-parses ambiguous text. Writes always go
//! back out in the canonical JSON-array form.

use serde::Serialize;

/// Normalized evidence references for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "paths", rename_all = "snake_case")]
pub enum EvidenceRefs {
    /// No evidence attached.
    None,
    /// Exactly one stored object path.
    Single(String),
    /// Two or more stored object paths.
    Many(Vec<String>),
}

impl EvidenceRefs {
    /// Parse a raw stored value into normalized references.
    ///
    /// Accepted shapes, tried in order:
    /// 1. JSON array of strings: `["a.pdf","b.jpg"]`
    /// 2. JSON string (one unwrap level, then re-parsed): `"\"a.pdf\""`,
    ///    `"\"[...]\""`
    /// 3. Bare path text.
    ///
    /// Empty input, empty arrays, and non-string array elements degrade to
    /// [`EvidenceRefs::None`] / are dropped; this never errors.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => return Self::None,
        };

        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(items)) => Self::from_list(
                items
                    .into_iter()
                    .filter_map(|v| match v {
                        serde_json::Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            // One level of JSON-string wrapping, then reparse.
            Ok(serde_json::Value::String(inner)) => Self::parse(Some(&inner)),
            _ => Self::Single(raw.to_string()),
        }
    }

    /// Build from an owned list, collapsing to the smallest variant.
    pub fn from_list(mut paths: Vec<String>) -> Self {
        paths.retain(|p| !p.trim().is_empty());
        match paths.len() {
            0 => Self::None,
            1 => Self::Single(paths.remove(0)),
            _ => Self::Many(paths),
        }
    }

    /// All paths as a slice-friendly vector (empty for `None`).
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::None => Vec::new(),
            Self::Single(p) => vec![p.as_str()],
            Self::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
    }

    /// Append one more path, collapsing variants as needed.
    pub fn push(self, path: String) -> Self {
        let mut all: Vec<String> = self.paths().into_iter().map(str::to_string).collect();
        all.push(path);
        Self::from_list(all)
    }

    /// Canonical storage encoding: always a JSON array, or `None` when empty.
    pub fn to_stored(&self) -> Option<String> {
        match self {
            Self::None => None,
            _ => Some(
                serde_json::to_string(&self.paths()).expect("string vec always serializes"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_input_is_none() {
        assert_eq!(EvidenceRefs::parse(None), EvidenceRefs::None);
        assert_eq!(EvidenceRefs::parse(Some("")), EvidenceRefs::None);
        assert_eq!(EvidenceRefs::parse(Some("   ")), EvidenceRefs::None);
    }

    #[test]
    fn bare_path_is_single() {
        assert_eq!(
            EvidenceRefs::parse(Some("incidents/7/foto.jpg")),
            EvidenceRefs::Single("incidents/7/foto.jpg".into())
        );
    }

    #[test]
    fn json_array_is_many() {
        assert_eq!(
            EvidenceRefs::parse(Some(r#"["a.pdf","b.jpg"]"#)),
            EvidenceRefs::Many(vec!["a.pdf".into(), "b.jpg".into()])
        );
    }

    #[test]
    fn one_element_array_collapses_to_single() {
        assert_eq!(
            EvidenceRefs::parse(Some(r#"["solo.pdf"]"#)),
            EvidenceRefs::Single("solo.pdf".into())
        );
    }

    #[test]
    fn json_encoded_string_is_unwrapped() {
        assert_eq!(
            EvidenceRefs::parse(Some(r#""acta.pdf""#)),
            EvidenceRefs::Single("acta.pdf".into())
        );
        assert_eq!(
            EvidenceRefs::parse(Some(r#""[\"a.pdf\",\"b.jpg\"]""#)),
            EvidenceRefs::Many(vec!["a.pdf".into(), "b.jpg".into()])
        );
    }

    #[test]
    fn empty_array_and_junk_elements_degrade() {
        assert_eq!(EvidenceRefs::parse(Some("[]")), EvidenceRefs::None);
        assert_eq!(
            EvidenceRefs::parse(Some(r#"[1,null,"real.png"]"#)),
            EvidenceRefs::Single("real.png".into())
        );
    }

    #[test]
    fn push_grows_variants() {
        let refs = EvidenceRefs::None.push("a.pdf".into());
        assert_eq!(refs, EvidenceRefs::Single("a.pdf".into()));
        let refs = refs.push("b.jpg".into());
        assert_eq!(refs, EvidenceRefs::Many(vec!["a.pdf".into(), "b.jpg".into()]));
    }

    #[test]
    fn stored_form_is_always_a_json_array() {
        assert_eq!(EvidenceRefs::None.to_stored(), None);
        assert_eq!(
            EvidenceRefs::Single("a.pdf".into()).to_stored(),
            Some(r#"["a.pdf"]"#.to_string())
        );
        assert_eq!(
            EvidenceRefs::Many(vec!["a.pdf".into(), "b.jpg".into()]).to_stored(),
            Some(r#"["a.pdf","b.jpg"]"#.to_string())
        );
    }

    #[test]
    fn stored_form_round_trips() {
        let refs = EvidenceRefs::Many(vec!["x".into(), "y".into()]);
        let stored = refs.to_stored().unwrap();
        assert_eq!(EvidenceRefs::parse(Some(&stored)), refs);
    }
}
