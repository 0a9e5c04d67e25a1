//! Code generation for tagged unions.

use enumgen_codegen::{CodeFragment, Renderable, Vars};
use enumgen_schema::{EnumDefinition, Payload};
use eyre::Result;
use tracing::debug;

use crate::{
    Backend,
    ast::{Case, Func, If, Receiver, StructField, StructType, Switch},
    fill,
    literal::quote,
};

const RECEIVER: &str = "e";
const DISCRIMINANT_FIELD: &str = "Type";
const PAYLOAD_FIELD: &str = "Data";
const DISCRIMINANT_KEY: &str = "type";
const PAYLOAD_KEY: &str = "data";
const PAYLOAD_TAG: &str = "data,omitempty";

const CASE_LABEL: &str = "${constraint}${variant}";
const DECODE_CHECK: &str = "err := ${decode}; err != nil";
const LOOKUP: &str = "${raw}, ${found} := doc[${key}]";
const NULL_CHECK: &str = "dataFound && ${is_null}";
const JOIN_ERROR: &str = "return errors.Join(errors.New(${message}), err)";
const NEW_ERROR: &str = "return errors.New(${message})";
const MISSING_PAYLOAD: &str = "no associated data found for enum ${type}";
const UNRECOGNIZED_DISCRIMINANT: &str = "unrecognized discriminant for enum ${type}";
const INVALID_PAYLOAD: &str = "invalid ${payload} payload for enum ${type}";

/// Generates the Go code for one tagged union.
///
/// The union is a struct holding the discriminant and an untyped payload.
/// Only decoders are generated: encoding the struct is left to each
/// backend's default struct encoding, driven by the field tags.
#[derive(Debug)]
pub struct TaggedUnionGenerator<'a> {
    name: &'a str,
    constraint: &'a str,
    def: &'a EnumDefinition,
}

impl<'a> TaggedUnionGenerator<'a> {
    pub fn new(name: &'a str, constraint: &'a str, def: &'a EnumDefinition) -> Self {
        Self {
            name,
            constraint,
            def,
        }
    }

    pub fn generate(&self, backends: &[Backend]) -> Result<Vec<CodeFragment>> {
        let mut fragments = self.struct_type(backends).to_fragments();
        for &backend in backends {
            debug!(enum_name = self.name, %backend, "emitting decoder");
            fragments.extend(self.decoder(backend)?.to_fragments());
        }
        Ok(fragments)
    }

    fn vars(&self) -> Vars {
        Vars::new()
            .set("type", self.name)
            .set("constraint", self.constraint)
    }

    fn message(&self, template: &str, vars: &Vars) -> Result<String> {
        Ok(quote(&fill(template, vars)?))
    }

    fn new_error(&self, template: &str) -> Result<String> {
        let message = self.message(template, &self.vars())?;
        fill(NEW_ERROR, &Vars::new().set("message", message))
    }

    fn struct_type(&self, backends: &[Backend]) -> StructType {
        let (discriminant, payload) = backends.iter().fold(
            (
                StructField::new(DISCRIMINANT_FIELD, self.constraint),
                StructField::new(PAYLOAD_FIELD, "interface{}"),
            ),
            |(discriminant, payload), backend| {
                (
                    discriminant.tag(backend.tag_key(), DISCRIMINANT_KEY),
                    payload.tag(backend.tag_key(), PAYLOAD_TAG),
                )
            },
        );
        StructType::new(self.name).field(discriminant).field(payload)
    }

    fn decode_check(backend: Backend, raw: &str, target: &str) -> Result<String> {
        let decode = fill(
            backend.decode_into(),
            &Vars::new().set("raw", raw).set("target", target),
        )?;
        fill(DECODE_CHECK, &Vars::new().set("decode", decode))
    }

    fn lookup(raw: &str, found: &str, key: &str) -> Result<String> {
        fill(
            LOOKUP,
            &Vars::new()
                .set("raw", raw)
                .set("found", found)
                .set("key", quote(key)),
        )
    }

    fn case(&self, backend: Backend, variant: &str, payload: Payload<'_>) -> Result<Case> {
        let label = fill(CASE_LABEL, &self.vars().set("variant", variant))?;
        let case = Case::new(label);

        let ty = match payload {
            Payload::Null => return Ok(case.line(format!("{}.{} = nil", RECEIVER, PAYLOAD_FIELD))),
            Payload::Type(ty) => ty,
        };

        let invalid = self.message(INVALID_PAYLOAD, &self.vars().set("payload", ty))?;
        Ok(case
            .push(If::new("!dataFound").line(self.new_error(MISSING_PAYLOAD)?))
            .line(format!("var d {}", ty))
            .push(
                If::new(Self::decode_check(backend, "dataRaw", "&d")?)
                    .line(fill(JOIN_ERROR, &Vars::new().set("message", invalid))?),
            )
            .line(format!("{}.{} = &d", RECEIVER, PAYLOAD_FIELD)))
    }

    /// A missing document or a document without a discriminant leaves the
    /// receiver untouched. The payload is only decoded once the discriminant
    /// is known, into the variant's declared type.
    fn decoder(&self, backend: Backend) -> Result<Func> {
        let cases = self
            .def
            .sorted_payloads()
            .into_iter()
            .map(|(variant, payload)| self.case(backend, variant, payload))
            .collect::<Result<Vec<_>>>()?;

        let unrecognized = self.message(UNRECOGNIZED_DISCRIMINANT, &self.vars())?;
        let is_null = fill(
            backend.explicit_null(),
            &Vars::new().set("raw", "dataRaw"),
        )?;

        Ok(Func::method(
            Receiver::pointer(RECEIVER, self.name),
            backend.decoder_signature(),
        )
        .line(format!("var doc {}", backend.raw_document()))
        .push(If::new(Self::decode_check(backend, backend.input(), "&doc")?).line("return err"))
        .push(If::new("doc == nil").line("return nil"))
        .line(Self::lookup("typeRaw", "typeFound", DISCRIMINANT_KEY)?)
        .push(If::new("!typeFound").line("return nil"))
        .line(Self::lookup("dataRaw", "dataFound", PAYLOAD_KEY)?)
        .push(
            If::new(fill(NULL_CHECK, &Vars::new().set("is_null", is_null))?)
                .line("dataFound = false"),
        )
        .line(format!("var t {}", self.constraint))
        .push(
            If::new(Self::decode_check(backend, "typeRaw", "&t")?).line(fill(
                JOIN_ERROR,
                &Vars::new().set("message", unrecognized),
            )?),
        )
        .push(
            Switch::new("t")
                .cases(cases)
                .default(vec![CodeFragment::Line(
                    self.new_error(UNRECOGNIZED_DISCRIMINANT)?,
                )]),
        )
        .line(format!("{}.{} = t", RECEIVER, DISCRIMINANT_FIELD))
        .line("return nil"))
    }
}
