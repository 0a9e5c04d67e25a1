//! Enum definitions.

use indexmap::IndexMap;
use serde::Deserialize;

/// Variant value of a tagged union meaning "this variant carries no payload".
pub const NULL_PAYLOAD: &str = "null";

/// One enum as declared in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDefinition {
    /// Discriminant enum of a tagged union.
    constraint: Option<String>,

    /// Variant produced for the empty representation.
    default: Option<String>,

    /// Variant name to literal (plain enum) or payload type (tagged union).
    variants: IndexMap<String, String>,
}

/// Classification of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind<'a> {
    /// String-valued enum.
    Plain,
    /// Discriminant + payload enum.
    TaggedUnion { constraint: &'a str },
}

/// What a tagged-union variant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// No associated data.
    Null,
    /// Associated data decoded as the named type.
    Type(&'a str),
}

impl<'a> Payload<'a> {
    fn from_value(value: &'a str) -> Self {
        if value == NULL_PAYLOAD {
            Self::Null
        } else {
            Self::Type(value)
        }
    }
}

impl EnumDefinition {
    /// Build a definition directly, bypassing TOML.
    pub fn new(
        constraint: Option<String>,
        default: Option<String>,
        variants: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            constraint,
            default,
            variants: variants.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> EnumKind<'_> {
        match &self.constraint {
            Some(constraint) => EnumKind::TaggedUnion { constraint },
            None => EnumKind::Plain,
        }
    }

    pub fn is_tagged_union(&self) -> bool {
        self.constraint.is_some()
    }

    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Variants in source order.
    pub fn variants(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variants
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Variants in lexicographic order of variant name.
    pub fn sorted_variants(&self) -> Vec<(&str, &str)> {
        let mut variants: Vec<(&str, &str)> = self.variants().collect();
        variants.sort_unstable_by(|a, b| a.0.cmp(b.0));
        variants
    }

    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Value of the variant with the given name.
    pub fn value(&self, variant: &str) -> Option<&str> {
        self.variants.get(variant).map(String::as_str)
    }

    /// The default variant and its value, if one is declared and exists.
    pub fn default_variant(&self) -> Option<(&str, &str)> {
        let name = self.default.as_deref()?;
        self.value(name).map(|value| (name, value))
    }

    /// Tagged-union variants and their payloads, sorted by variant name.
    pub fn sorted_payloads(&self) -> Vec<(&str, Payload<'_>)> {
        self.sorted_variants()
            .into_iter()
            .map(|(name, value)| (name, Payload::from_value(value)))
            .collect()
    }

    /// Payload carried by a tagged-union variant.
    pub fn payload(&self, variant: &str) -> Option<Payload<'_>> {
        self.value(variant).map(Payload::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(
        constraint: Option<&str>,
        default: Option<&str>,
        variants: &[(&str, &str)],
    ) -> EnumDefinition {
        EnumDefinition::new(
            constraint.map(str::to_string),
            default.map(str::to_string),
            variants
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_kind_follows_constraint() {
        assert_eq!(def(None, None, &[]).kind(), EnumKind::Plain);
        assert_eq!(
            def(Some("ShapeKind"), None, &[]).kind(),
            EnumKind::TaggedUnion {
                constraint: "ShapeKind"
            }
        );
    }

    #[test]
    fn test_sorted_variants_are_lexicographic() {
        let d = def(None, None, &[("b", "2"), ("B", "3"), ("a", "1")]);
        let names: Vec<&str> = d.sorted_variants().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "a", "b"]);
    }

    #[test]
    fn test_default_variant() {
        let d = def(None, Some("Pending"), &[("Pending", "pending"), ("Done", "done")]);
        assert_eq!(d.default_variant(), Some(("Pending", "pending")));
        assert_eq!(def(None, None, &[("A", "a")]).default_variant(), None);
    }

    #[test]
    fn test_payload_sentinel() {
        let d = def(Some("Kind"), None, &[("Circle", "CircleData"), ("None", "null")]);
        assert_eq!(d.payload("Circle"), Some(Payload::Type("CircleData")));
        assert_eq!(d.payload("None"), Some(Payload::Null));
        assert_eq!(d.payload("Square"), None);
    }
}
