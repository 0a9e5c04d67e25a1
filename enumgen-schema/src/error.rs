use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the schema text and the name it was read from so that every error
/// can point back into the source.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    pub fn unknown_default_error(
        &self,
        enum_name: impl Into<String>,
        default: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownDefault {
            src: self.named_source(),
            span,
            enum_name: enum_name.into(),
            default: default.into(),
        })
    }

    pub fn invalid_constraint_error(
        &self,
        enum_name: impl Into<String>,
        constraint: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidConstraint {
            src: self.named_source(),
            span,
            enum_name: enum_name.into(),
            constraint: constraint.into(),
            reason: reason.into(),
        })
    }

    pub fn unknown_discriminant_variant_error(
        &self,
        enum_name: impl Into<String>,
        variant: impl Into<String>,
        constraint: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownDiscriminantVariant {
            src: self.named_source(),
            span,
            enum_name: enum_name.into(),
            variant: variant.into(),
            constraint: constraint.into(),
        })
    }

    pub fn duplicate_value_error(
        &self,
        enum_name: impl Into<String>,
        value: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateValue {
            src: self.named_source(),
            span,
            enum_name: enum_name.into(),
            value: value.into(),
            first: first.into(),
            second: second.into(),
        })
    }

    pub fn invalid_payload_type_error(
        &self,
        enum_name: impl Into<String>,
        variant: impl Into<String>,
        type_name: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPayloadType {
            src: self.named_source(),
            span,
            enum_name: enum_name.into(),
            variant: variant.into(),
            type_name: type_name.into(),
            reason: reason.into(),
        })
    }

    pub fn name_collision_error(
        &self,
        name: impl Into<String>,
        conflict: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::NameCollision {
            src: self.named_source(),
            span,
            name: name.into(),
            conflict: conflict.into(),
        })
    }

    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to parse enum schema")]
    #[diagnostic(
        code(enumgen::parse_error),
        help("each enum is a table with `variants` and optional `constraint` and `default` strings")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("default '{default}' of enum '{enum_name}' is not one of its variants")]
    #[diagnostic(code(enumgen::unknown_default))]
    UnknownDefault {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown variant")]
        span: Option<SourceSpan>,
        enum_name: String,
        default: String,
    },

    #[error("enum '{enum_name}' cannot use '{constraint}' as its discriminant")]
    #[diagnostic(code(enumgen::invalid_constraint), help("{reason}"))]
    InvalidConstraint {
        #[source_code]
        src: NamedSource<String>,
        #[label("discriminant declared here")]
        span: Option<SourceSpan>,
        enum_name: String,
        constraint: String,
        reason: String,
    },

    #[error("variant '{variant}' of enum '{enum_name}' is not a variant of its discriminant '{constraint}'")]
    #[diagnostic(
        code(enumgen::unknown_discriminant_variant),
        help("add '{variant}' to '{constraint}' or rename the variant")
    )]
    UnknownDiscriminantVariant {
        #[source_code]
        src: NamedSource<String>,
        #[label("no matching discriminant")]
        span: Option<SourceSpan>,
        enum_name: String,
        variant: String,
        constraint: String,
    },

    #[error("variants '{first}' and '{second}' of enum '{enum_name}' share the value \"{value}\"")]
    #[diagnostic(
        code(enumgen::duplicate_value),
        help("every variant of a plain enum needs a distinct string value")
    )]
    DuplicateValue {
        #[source_code]
        src: NamedSource<String>,
        #[label("duplicate value")]
        span: Option<SourceSpan>,
        enum_name: String,
        value: String,
        first: String,
        second: String,
    },

    #[error("invalid payload type \"{type_name}\" for variant '{variant}' of '{enum_name}'")]
    #[diagnostic(code(enumgen::invalid_payload_type), help("{reason}"))]
    InvalidPayloadType {
        #[source_code]
        src: NamedSource<String>,
        #[label("payload type declared here")]
        span: Option<SourceSpan>,
        enum_name: String,
        variant: String,
        type_name: String,
        reason: String,
    },

    #[error("'{name}' collides with {conflict}")]
    #[diagnostic(
        code(enumgen::name_collision),
        help("enum types and their `<Enum><Variant>` constants share one Go package scope")
    )]
    NameCollision {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        name: String,
        conflict: String,
    },

    #[error("'{name}' is a Go reserved keyword")]
    #[diagnostic(
        code(enumgen::reserved_keyword),
        help("rename the {context} '{name}' to something else")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(enumgen::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },
}
