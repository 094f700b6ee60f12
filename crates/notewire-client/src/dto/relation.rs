//! Normalizer for the one relation record whose wire shape differs
//! materially across revisions.
//!
//! v0.24 servers may send the two memo references as bare resource-name
//! strings (or even legacy numeric ids) and the relation type as a proto
//! enum code; v0.26 sends structured `{name, uid, snippet}` objects and a
//! symbolic type string. Decoding accepts the union of all shapes through
//! untagged wire enums feeding one canonical constructor; encoding always
//! emits the structured object form and the symbolic type, so a decoded
//! legacy payload never round-trips back into its legacy shape.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

/// Canonical endpoint reference inside a relation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RelatedMemoRefDto {
    pub name: String,
    pub uid: String,
    pub snippet: String,
}

impl RelatedMemoRefDto {
    pub fn named(name: impl Into<String>) -> Self {
        RelatedMemoRefDto {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A directed relation between two memos, normalized to one shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RelationWire")]
pub struct MemoRelationDto {
    pub memo: RelatedMemoRefDto,
    pub related_memo: RelatedMemoRefDto,
    /// Symbolic relation kind (`"REFERENCE"`, `"COMMENT"`,
    /// `"TYPE_UNSPECIFIED"` for unknown codes, empty when absent).
    pub kind: String,
}

/// The union of reference shapes seen on the wire. Variant order matters:
/// serde tries them top to bottom.
#[derive(Deserialize)]
#[serde(untagged)]
enum RefWire {
    /// Bare resource name, e.g. `"memos/123"`.
    Name(String),
    /// Legacy numeric id.
    LegacyId(i64),
    Object {
        #[serde(default)]
        name: String,
        #[serde(default)]
        uid: String,
        #[serde(default)]
        snippet: String,
    },
    /// Any other JSON value decodes to an empty reference.
    Other(serde_json::Value),
}

impl From<RefWire> for RelatedMemoRefDto {
    fn from(wire: RefWire) -> Self {
        match wire {
            RefWire::Name(name) => RelatedMemoRefDto::named(name),
            RefWire::LegacyId(id) => RelatedMemoRefDto::named(format!("memos/{id}")),
            RefWire::Object { name, uid, snippet } => RelatedMemoRefDto { name, uid, snippet },
            RefWire::Other(_) => RelatedMemoRefDto::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KindWire {
    Symbol(String),
    Code(i64),
    Other(serde_json::Value),
}

impl KindWire {
    fn normalize(self) -> String {
        match self {
            KindWire::Symbol(s) => s,
            // proto enum numeric values
            KindWire::Code(1) => "REFERENCE".to_string(),
            KindWire::Code(2) => "COMMENT".to_string(),
            KindWire::Code(_) => "TYPE_UNSPECIFIED".to_string(),
            KindWire::Other(_) => String::new(),
        }
    }
}

#[derive(Deserialize)]
struct RelationWire {
    #[serde(default)]
    memo: Option<RefWire>,
    #[serde(default, rename = "relatedMemo", alias = "related_memo")]
    related_memo: Option<RefWire>,
    #[serde(default, rename = "type")]
    kind: Option<KindWire>,
}

impl From<RelationWire> for MemoRelationDto {
    fn from(wire: RelationWire) -> Self {
        MemoRelationDto {
            memo: wire.memo.map(Into::into).unwrap_or_default(),
            related_memo: wire.related_memo.map(Into::into).unwrap_or_default(),
            kind: wire.kind.map(KindWire::normalize).unwrap_or_default(),
        }
    }
}

impl Serialize for MemoRelationDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MemoRelation", 3)?;
        state.serialize_field("memo", &EncodedRef(&self.memo))?;
        state.serialize_field("relatedMemo", &EncodedRef(&self.related_memo))?;
        state.serialize_field("type", &self.kind)?;
        state.end()
    }
}

/// Encodes a reference in the canonical object form: `name` always,
/// `uid`/`snippet` only when non-empty.
struct EncodedRef<'a>(&'a RelatedMemoRefDto);

impl Serialize for EncodedRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = [&self.0.uid, &self.0.snippet]
            .iter()
            .filter(|s| !s.is_empty())
            .count();
        let mut map = serializer.serialize_map(Some(1 + extra))?;
        map.serialize_entry("name", &self.0.name)?;
        if !self.0.uid.is_empty() {
            map.serialize_entry("uid", &self.0.uid)?;
        }
        if !self.0.snippet.is_empty() {
            map.serialize_entry("snippet", &self.0.snippet)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> MemoRelationDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decode_bare_string_references() {
        let relation = decode(json!({
            "memo": "memos/101",
            "relatedMemo": "memos/202",
            "type": "COMMENT"
        }));
        assert_eq!(relation.memo, RelatedMemoRefDto::named("memos/101"));
        assert_eq!(relation.related_memo, RelatedMemoRefDto::named("memos/202"));
        assert_eq!(relation.kind, "COMMENT");
    }

    #[test]
    fn test_decode_structured_references() {
        let relation = decode(json!({
            "memo": {"name": "memos/101", "uid": "abc", "snippet": "hello"},
            "relatedMemo": {"name": "memos/202"},
            "type": "REFERENCE"
        }));
        assert_eq!(relation.memo.uid, "abc");
        assert_eq!(relation.memo.snippet, "hello");
        assert_eq!(relation.related_memo.uid, "");
    }

    #[test]
    fn test_decode_snake_case_related_memo() {
        let relation = decode(json!({
            "memo": "memos/1",
            "related_memo": "memos/2",
            "type": "REFERENCE"
        }));
        assert_eq!(relation.related_memo.name, "memos/2");
    }

    #[test]
    fn test_decode_legacy_numeric_reference() {
        let relation = decode(json!({"memo": 123, "relatedMemo": 456}));
        assert_eq!(relation.memo.name, "memos/123");
        assert_eq!(relation.related_memo.name, "memos/456");
    }

    #[test]
    fn test_decode_null_reference_is_empty_not_error() {
        let relation = decode(json!({"memo": null, "relatedMemo": null, "type": null}));
        assert_eq!(relation.memo, RelatedMemoRefDto::default());
        assert_eq!(relation.related_memo, RelatedMemoRefDto::default());
        assert_eq!(relation.kind, "");
    }

    #[test]
    fn test_decode_absent_fields_default() {
        let relation = decode(json!({}));
        assert_eq!(relation, MemoRelationDto::default());
    }

    #[test]
    fn test_numeric_and_symbolic_kinds_are_equivalent() {
        let numeric = decode(json!({"memo": "memos/1", "relatedMemo": "memos/2", "type": 1}));
        let symbolic =
            decode(json!({"memo": "memos/1", "relatedMemo": "memos/2", "type": "REFERENCE"}));
        assert_eq!(numeric, symbolic);

        let comment = decode(json!({"type": 2}));
        assert_eq!(comment.kind, "COMMENT");
    }

    #[test]
    fn test_unknown_numeric_kind_is_unspecified_sentinel() {
        let relation = decode(json!({"type": 99}));
        assert_eq!(relation.kind, "TYPE_UNSPECIFIED");
    }

    #[test]
    fn test_encode_never_emits_legacy_shapes() {
        let relation = decode(json!({"memo": "memos/101", "relatedMemo": 202, "type": 1}));
        let encoded = serde_json::to_value(&relation).unwrap();
        assert!(encoded["memo"].is_object());
        assert!(encoded["relatedMemo"].is_object());
        assert_eq!(encoded["memo"]["name"], "memos/101");
        assert_eq!(encoded["relatedMemo"]["name"], "memos/202");
        assert_eq!(encoded["type"], "REFERENCE");
    }

    #[test]
    fn test_encode_omits_empty_uid_and_snippet() {
        let relation = MemoRelationDto {
            memo: RelatedMemoRefDto::named("memos/1"),
            related_memo: RelatedMemoRefDto {
                name: "memos/2".into(),
                uid: "u2".into(),
                snippet: String::new(),
            },
            kind: "COMMENT".into(),
        };
        let encoded = serde_json::to_value(&relation).unwrap();
        assert!(encoded["memo"].get("uid").is_none());
        assert!(encoded["memo"].get("snippet").is_none());
        assert_eq!(encoded["relatedMemo"]["uid"], "u2");
        assert!(encoded["relatedMemo"].get("snippet").is_none());
    }

    #[test]
    fn test_round_trip_is_identity() {
        for value in [
            json!({"memo": "memos/1", "relatedMemo": "memos/2", "type": "REFERENCE"}),
            json!({"memo": 3, "relatedMemo": 4, "type": 2}),
            json!({"memo": {"name": "memos/5", "uid": "u", "snippet": "s"},
                   "relatedMemo": null, "type": "COMMENT"}),
            json!({}),
        ] {
            let decoded = decode(value);
            let round_tripped: MemoRelationDto =
                serde_json::from_value(serde_json::to_value(&decoded).unwrap()).unwrap();
            assert_eq!(round_tripped, decoded);
        }
    }

    #[test]
    fn test_unexpected_reference_types_decode_to_empty() {
        let relation = decode(json!({"memo": true, "relatedMemo": ["x"], "type": {"a": 1}}));
        assert_eq!(relation.memo, RelatedMemoRefDto::default());
        assert_eq!(relation.related_memo, RelatedMemoRefDto::default());
        assert_eq!(relation.kind, "");
    }
}
