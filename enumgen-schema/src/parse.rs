//! Schema parsing from strings.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    EnumDefinition, EnumKind, Payload, Result, Schema,
    error::SourceContext,
    validate::{GENERATED_CODE_NAMES, ParseContext, validate_payload_type, validate_type_reference},
};

/// Parse an enum schema from a string (uses "enums.toml" as filename in reports).
pub fn parse_str(content: &str) -> Result<Schema> {
    parse_str_with_filename(content, "enums.toml")
}

/// Parse an enum schema from a string with a custom filename for error reporting.
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Schema> {
    let source = SourceContext::new(content, filename);
    let schema: Schema = toml::from_str(content).map_err(|e| source.parse_error(e))?;

    validate_schema(&schema, &ParseContext::new(&source))?;
    debug!(enums = schema.len(), filename, "parsed enum schema");
    Ok(schema)
}

fn validate_schema(schema: &Schema, ctx: &ParseContext<'_>) -> Result<()> {
    for (name, def) in schema.iter() {
        let enum_ctx = ctx.for_enum(name);
        ctx.validate_name(name, "enum", enum_ctx.enum_span())?;
        if GENERATED_CODE_NAMES.contains(&name) {
            return Err(ctx.source().name_collision_error(
                name,
                "a name the generated code refers to",
                enum_ctx.enum_span(),
            ));
        }
        validate_definition(schema, name, def, &enum_ctx)?;
    }
    validate_constants(schema, ctx)
}

fn validate_definition(
    schema: &Schema,
    name: &str,
    def: &EnumDefinition,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    for (variant, _) in def.variants() {
        ctx.validate_suffix(variant, "variant", ctx.key_span(variant))?;
    }

    if let Some(default) = def.default()
        && !def.has_variant(default)
    {
        return Err(ctx
            .source()
            .unknown_default_error(name, default, ctx.value_span(default)));
    }

    match def.kind() {
        EnumKind::Plain => validate_distinct_values(name, def, ctx),
        EnumKind::TaggedUnion { constraint } => {
            validate_payload_types(name, def, ctx)?;
            validate_constraint(schema, name, def, constraint, ctx)
        }
    }
}

/// Two variants with one literal would produce duplicate `case` labels.
fn validate_distinct_values(
    name: &str,
    def: &EnumDefinition,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (variant, value) in def.sorted_variants() {
        if let Some(first) = seen.insert(value, variant) {
            return Err(ctx.source().duplicate_value_error(
                name,
                value,
                first,
                variant,
                ctx.key_span(variant),
            ));
        }
    }
    Ok(())
}

fn validate_payload_types(
    name: &str,
    def: &EnumDefinition,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    for (variant, payload) in def.sorted_payloads() {
        let Payload::Type(ty) = payload else {
            continue;
        };
        if let Some(reason) = validate_payload_type(ty) {
            let span = ctx.value_span(ty).or_else(|| ctx.key_span(variant));
            return Err(ctx
                .source()
                .invalid_payload_type_error(name, variant, ty, reason, span));
        }
    }
    Ok(())
}

fn validate_constraint(
    schema: &Schema,
    name: &str,
    def: &EnumDefinition,
    constraint: &str,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    let span = ctx.value_span(constraint);

    if let Some(reason) = validate_type_reference(constraint) {
        return Err(ctx
            .source()
            .invalid_constraint_error(name, constraint, reason, span));
    }

    if constraint == name {
        return Err(ctx.source().invalid_constraint_error(
            name,
            constraint,
            "an enum cannot be its own discriminant",
            span,
        ));
    }

    let Some(discriminant) = schema.get(constraint) else {
        debug!(
            enum_name = name,
            constraint, "discriminant is not defined in the schema, assuming an external type"
        );
        return Ok(());
    };

    if discriminant.is_tagged_union() {
        let reason = format!(
            "the discriminant must be a plain enum, but '{}' is a tagged union",
            constraint
        );
        return Err(ctx
            .source()
            .invalid_constraint_error(name, constraint, reason, span));
    }

    for (variant, _) in def.sorted_variants() {
        if !discriminant.has_variant(variant) {
            return Err(ctx.source().unknown_discriminant_variant_error(
                name,
                variant,
                constraint,
                ctx.key_span(variant),
            ));
        }
    }

    Ok(())
}

/// Each plain-enum variant declares a package-level `<Enum><Variant>`
/// constant, which must not clash with an enum type or another constant.
fn validate_constants(schema: &Schema, ctx: &ParseContext<'_>) -> Result<()> {
    let mut constants: HashMap<String, (&str, &str)> = HashMap::new();

    for name in schema.sorted_names() {
        let Some(def) = schema.get(name) else {
            continue;
        };
        if def.is_tagged_union() {
            continue;
        }

        let enum_ctx = ctx.for_enum(name);
        for (variant, _) in def.sorted_variants() {
            let constant = format!("{}{}", name, variant);
            if schema.get(&constant).is_some() {
                let conflict = format!("the constant generated for '{}.{}'", name, variant);
                let span = ctx.for_enum(&constant).enum_span();
                return Err(ctx.source().name_collision_error(constant, conflict, span));
            }
            if let Some((first_enum, first_variant)) =
                constants.insert(constant.clone(), (name, variant))
            {
                let conflict = format!(
                    "the constant generated for '{}.{}'",
                    first_enum, first_variant
                );
                let span = enum_ctx.key_span(variant);
                return Err(ctx.source().name_collision_error(constant, conflict, span));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn parse_err(content: &str) -> Box<Error> {
        parse_str(content).expect_err("schema should be rejected")
    }

    #[test]
    fn test_parse_plain_enum() {
        let schema = parse_str(
            r#"
            [Color]
            variants = { Red = "red", Green = "green" }
            "#,
        )
        .unwrap();

        let color = schema.get("Color").unwrap();
        assert_eq!(color.kind(), EnumKind::Plain);
        assert_eq!(color.value("Red"), Some("red"));
        assert_eq!(color.default(), None);
    }

    #[test]
    fn test_parse_variants_subtable() {
        let schema = parse_str(
            r#"
            [Status]
            default = "Pending"

            [Status.variants]
            Pending = "pending"
            Done = "done"
            "#,
        )
        .unwrap();

        let status = schema.get("Status").unwrap();
        assert_eq!(status.default_variant(), Some(("Pending", "pending")));
    }

    #[test]
    fn test_parse_tagged_union() {
        let schema = parse_str(
            r#"
            [ShapeKind]
            variants = { Circle = "circle", None = "none" }

            [Shape]
            constraint = "ShapeKind"
            variants = { Circle = "CircleData", None = "null" }
            "#,
        )
        .unwrap();

        assert!(schema.has_tagged_unions());
        assert_eq!(schema.sorted_names(), vec!["Shape", "ShapeKind"]);
        assert_eq!(
            schema.get("Shape").unwrap().kind(),
            EnumKind::TaggedUnion {
                constraint: "ShapeKind"
            }
        );
    }

    #[test]
    fn test_external_constraint_is_accepted() {
        let schema = parse_str(
            r#"
            [Event]
            constraint = "events.Kind"
            variants = { Click = "ClickData" }
            "#,
        )
        .unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_non_string_variant_value() {
        let err = parse_err(
            r#"
            [Color]
            variants = { Red = 1 }
            "#,
        );
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_variants() {
        let err = parse_err(
            r#"
            [Color]
            default = "Red"
            "#,
        );
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_duplicate_top_level_key() {
        let err = parse_err(
            r#"
            [Color]
            variants = { Red = "red" }

            [Color]
            variants = { Blue = "blue" }
            "#,
        );
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_field() {
        let err = parse_err(
            r#"
            [Color]
            defualt = "Red"
            variants = { Red = "red" }
            "#,
        );
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_default() {
        let err = parse_err(
            r#"
            [Status]
            default = "Waiting"
            variants = { Pending = "pending" }
            "#,
        );
        match *err {
            Error::UnknownDefault {
                enum_name,
                default,
                span,
                ..
            } => {
                assert_eq!(enum_name, "Status");
                assert_eq!(default, "Waiting");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_values() {
        let err = parse_err(
            r#"
            [Color]
            variants = { Red = "red", Crimson = "red" }
            "#,
        );
        match *err {
            Error::DuplicateValue { first, second, .. } => {
                assert_eq!(first, "Crimson");
                assert_eq!(second, "Red");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tagged_union_values_may_repeat() {
        let schema = parse_str(
            r#"
            [Kind]
            variants = { A = "a", B = "b" }

            [Tagged]
            constraint = "Kind"
            variants = { A = "null", B = "null" }
            "#,
        );
        assert!(schema.is_ok());
    }

    #[test]
    fn test_constraint_on_itself() {
        let err = parse_err(
            r#"
            [Shape]
            constraint = "Shape"
            variants = { Circle = "CircleData" }
            "#,
        );
        assert!(matches!(*err, Error::InvalidConstraint { .. }));
    }

    #[test]
    fn test_constraint_must_be_plain() {
        let err = parse_err(
            r#"
            [Kind]
            variants = { A = "a" }

            [Inner]
            constraint = "Kind"
            variants = { A = "null" }

            [Outer]
            constraint = "Inner"
            variants = { A = "null" }
            "#,
        );
        match *err {
            Error::InvalidConstraint {
                enum_name,
                constraint,
                ..
            } => {
                assert_eq!(enum_name, "Outer");
                assert_eq!(constraint, "Inner");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_variant_missing_from_discriminant() {
        let err = parse_err(
            r#"
            [ShapeKind]
            variants = { Circle = "circle" }

            [Shape]
            constraint = "ShapeKind"
            variants = { Circle = "CircleData", Square = "SquareData" }
            "#,
        );
        match *err {
            Error::UnknownDiscriminantVariant { variant, .. } => assert_eq!(variant, "Square"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_constraint() {
        let err = parse_err(
            r#"
            [Shape]
            constraint = ""
            variants = { Circle = "CircleData" }
            "#,
        );
        match *err {
            Error::InvalidConstraint {
                constraint,
                span,
                ..
            } => {
                assert_eq!(constraint, "");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_constraint_must_be_a_type_name() {
        for constraint in ["Shape Kind", "a.b.C", "ShapeKind\nfunc init() {}", "2Kind"] {
            let content = format!(
                "[Shape]\nconstraint = {:?}\nvariants = {{ Circle = \"CircleData\" }}\n",
                constraint
            );
            let err = parse_str(&content).expect_err("constraint should be rejected");
            assert!(matches!(*err, Error::InvalidConstraint { .. }), "{constraint:?}: {err:?}");
        }
    }

    #[test]
    fn test_invalid_payload_type() {
        let err = parse_err(
            r#"
            [Shape]
            constraint = "events.Kind"
            variants = { Circle = "foo bar" }
            "#,
        );
        match *err {
            Error::InvalidPayloadType {
                enum_name,
                variant,
                type_name,
                span,
                ..
            } => {
                assert_eq!(enum_name, "Shape");
                assert_eq!(variant, "Circle");
                assert_eq!(type_name, "foo bar");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_payload_type() {
        let err = parse_err(
            r#"
            [Shape]
            constraint = "events.Kind"
            variants = { Circle = "" }
            "#,
        );
        assert!(matches!(*err, Error::InvalidPayloadType { .. }));
    }

    #[test]
    fn test_composite_payload_types_are_accepted() {
        let schema = parse_str(
            r#"
            [Event]
            constraint = "events.Kind"
            variants = { Click = "*events.Click", Batch = "[]Item", Empty = "null" }
            "#,
        );
        assert!(schema.is_ok());
    }

    #[test]
    fn test_enum_name_shadows_import() {
        let err = parse_err(
            r#"
            [errors]
            variants = { A = "a" }
            "#,
        );
        match *err {
            Error::NameCollision { name, span, .. } => {
                assert_eq!(name, "errors");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_enum_name_collides_with_constant() {
        let err = parse_err(
            r#"
            [Color]
            variants = { Red = "red" }

            [ColorRed]
            variants = { Dark = "dark" }
            "#,
        );
        match *err {
            Error::NameCollision { name, conflict, .. } => {
                assert_eq!(name, "ColorRed");
                assert_eq!(conflict, "the constant generated for 'Color.Red'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_constants_collide() {
        let err = parse_err(
            r#"
            [A]
            variants = { BC = "x" }

            [AB]
            variants = { C = "y" }
            "#,
        );
        match *err {
            Error::NameCollision { name, conflict, .. } => {
                assert_eq!(name, "ABC");
                assert_eq!(conflict, "the constant generated for 'A.BC'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tagged_union_declares_no_constants() {
        let schema = parse_str(
            r#"
            [Kind]
            variants = { A = "a" }

            [Tagged]
            constraint = "Kind"
            variants = { A = "null" }

            [TaggedA]
            variants = { X = "x" }
            "#,
        );
        assert!(schema.is_ok());
    }

    #[test]
    fn test_enum_name_keyword() {
        let err = parse_err(
            r#"
            [type]
            variants = { A = "a" }
            "#,
        );
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_invalid_variant_name() {
        let err = parse_err(
            r#"
            [Color]
            variants = { "light-blue" = "light_blue" }
            "#,
        );
        match *err {
            Error::InvalidIdentifier { name, context, .. } => {
                assert_eq!(name, "light-blue");
                assert_eq!(context, "variant in 'Color'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_variant_name_may_start_with_digit() {
        let schema = parse_str(
            r#"
            [Level]
            variants = { 1 = "one", 2 = "two" }
            "#,
        )
        .unwrap();
        assert_eq!(schema.get("Level").unwrap().value("1"), Some("one"));
    }

    #[test]
    fn test_empty_schema() {
        let schema = parse_str("").unwrap();
        assert!(schema.is_empty());
        assert!(!schema.has_tagged_unions());
    }
}
