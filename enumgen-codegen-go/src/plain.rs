//! Code generation for plain string enums.

use enumgen_codegen::{CodeFragment, Renderable, Vars};
use enumgen_schema::EnumDefinition;
use eyre::Result;
use tracing::debug;

use crate::{
    Backend,
    ast::{Case, Func, If, Receiver, Switch, TypeDecl},
    fill,
    literal::quote,
};

const RECEIVER: &str = "e";
const CONSTANT: &str = "${type}${variant}";
const CONST_DECL: &str = "const ${constant} ${type} = ${literal}";
const GET_PTR_SIGNATURE: &str = "GetPtr() *${type}";
const RETURN_LITERAL: &str = "return ${literal}";
const IS_EMPTY: &str = "len(${subject}) == 0";
const ASSIGN: &str = "*${receiver} = ${constant}";
const DECODE_CHECK: &str = "err := ${decode}; err != nil";
const PANIC: &str = "panic(errors.New(${message}))";
const ENCODE_FAILURE: &str = "return nil, errors.New(${message})";
const DECODE_FAILURE: &str = "return errors.New(${message})";
const INVALID_VALUE: &str = "invalid value of enum ${type}";
const UNRECOGNIZED_VALUE: &str = "unrecognized value for enum ${type}";

/// Generates the Go code for one plain enum.
///
/// Output order: the type, one constant per variant, `GetPtr`, `String`,
/// then an encoder/decoder pair per backend. Variants are always emitted in
/// lexicographic order of their names.
#[derive(Debug)]
pub struct PlainEnumGenerator<'a> {
    name: &'a str,
    def: &'a EnumDefinition,
    variants: Vec<(&'a str, &'a str)>,
}

impl<'a> PlainEnumGenerator<'a> {
    pub fn new(name: &'a str, def: &'a EnumDefinition) -> Self {
        Self {
            name,
            def,
            variants: def.sorted_variants(),
        }
    }

    pub fn generate(&self, backends: &[Backend]) -> Result<Vec<CodeFragment>> {
        let mut fragments = TypeDecl::new(self.name, "string").to_fragments();
        for (variant, literal) in &self.variants {
            fragments.push(CodeFragment::Line(self.const_decl(variant, literal)?));
        }
        fragments.extend(self.ptr_accessor()?.to_fragments());
        fragments.extend(self.string_method()?.to_fragments());

        for &backend in backends {
            debug!(enum_name = self.name, %backend, "emitting encoder and decoder");
            fragments.extend(self.encoder(backend)?.to_fragments());
            fragments.extend(self.decoder(backend)?.to_fragments());
        }

        Ok(fragments)
    }

    fn vars(&self) -> Vars {
        Vars::new().set("type", self.name).set("receiver", RECEIVER)
    }

    fn constant(&self, variant: &str) -> Result<String> {
        fill(CONSTANT, &self.vars().set("variant", variant))
    }

    fn const_decl(&self, variant: &str, literal: &str) -> Result<String> {
        let vars = self
            .vars()
            .set("constant", self.constant(variant)?)
            .set("literal", quote(literal));
        fill(CONST_DECL, &vars)
    }

    fn message(&self, template: &str) -> Result<String> {
        Ok(quote(&fill(template, &self.vars())?))
    }

    /// Constants are not addressable; hand out a pointer to a copy.
    fn ptr_accessor(&self) -> Result<Func> {
        Ok(Func::method(
            Receiver::value(RECEIVER, self.name),
            fill(GET_PTR_SIGNATURE, &self.vars())?,
        )
        .line(format!("v := {}", RECEIVER))
        .line("return &v"))
    }

    /// `switch` over the receiver, one `case` per constant running `body`.
    fn constant_switch(&self, body: &str) -> Result<Switch> {
        let cases = self
            .variants
            .iter()
            .map(|(variant, literal)| {
                let line = fill(body, &self.vars().set("literal", quote(literal)))?;
                Ok(Case::new(self.constant(variant)?).line(line))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Switch::new(RECEIVER).cases(cases))
    }

    /// The empty value maps to the default variant's literal, if declared.
    fn default_literal(&self, body: &str) -> Result<Option<If>> {
        self.def
            .default_variant()
            .map(|(_, literal)| {
                let condition = fill(IS_EMPTY, &self.vars().set("subject", RECEIVER))?;
                let line = fill(body, &self.vars().set("literal", quote(literal)))?;
                Ok(If::new(condition).line(line))
            })
            .transpose()
    }

    fn string_method(&self) -> Result<Func> {
        let mut func = Func::method(Receiver::value(RECEIVER, self.name), "String() string")
            .push(self.constant_switch(RETURN_LITERAL)?);
        if let Some(default) = self.default_literal(RETURN_LITERAL)? {
            func = func.push(default);
        }
        let panic = fill(
            PANIC,
            &self.vars().set("message", self.message(INVALID_VALUE)?),
        )?;
        Ok(func.line(panic))
    }

    fn encoder(&self, backend: Backend) -> Result<Func> {
        let encode = backend.encode_literal();
        let mut func = Func::method(
            Receiver::value(RECEIVER, self.name),
            backend.encoder_signature(),
        )
        .push(self.constant_switch(encode)?);
        if let Some(default) = self.default_literal(encode)? {
            func = func.push(default);
        }
        let failure = fill(
            ENCODE_FAILURE,
            &self.vars().set("message", self.message(INVALID_VALUE)?),
        )?;
        Ok(func.line(failure))
    }

    fn decoder(&self, backend: Backend) -> Result<Func> {
        let decode = fill(
            backend.decode_into(),
            &Vars::new()
                .set("raw", backend.input())
                .set("target", "&s"),
        )?;

        let cases = self
            .variants
            .iter()
            .map(|(variant, literal)| {
                let assign = fill(ASSIGN, &self.vars().set("constant", self.constant(variant)?))?;
                Ok(Case::new(quote(literal)).line(assign).line("return nil"))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut func = Func::method(
            Receiver::pointer(RECEIVER, self.name),
            backend.decoder_signature(),
        )
        .line("var s string")
        .push(If::new(fill(DECODE_CHECK, &Vars::new().set("decode", decode))?).line("return err"))
        .push(Switch::new("s").cases(cases));

        if let Some((variant, _)) = self.def.default_variant() {
            let condition = fill(IS_EMPTY, &Vars::new().set("subject", "s"))?;
            let assign = fill(ASSIGN, &self.vars().set("constant", self.constant(variant)?))?;
            func = func.push(If::new(condition).line(assign).line("return nil"));
        }

        let failure = fill(
            DECODE_FAILURE,
            &self.vars().set("message", self.message(UNRECOGNIZED_VALUE)?),
        )?;
        Ok(func.line(failure))
    }
}
