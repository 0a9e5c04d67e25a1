use std::io::{self, Read, Write};

use clap::Parser;
use enumgen_codegen_go::{GenerateOptions, Generator};
use eyre::{Context, Result};
use tracing::debug;

/// Name reported in diagnostics for the schema read from stdin.
const STDIN_NAME: &str = "<stdin>";

/// Extension trait for exiting on schema errors with pretty formatting
trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for enumgen_schema::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Read an enum schema from stdin and write Go source to stdout.
#[derive(Parser, Debug)]
#[command(name = "enumgen")]
#[command(version)]
#[command(about = "Generate Go enums from a TOML schema read on stdin")]
pub(crate) struct Cli {
    /// Generate encoding/json methods
    #[arg(long)]
    pub enable_json: bool,

    /// Generate gopkg.in/mgo.v2/bson methods
    #[arg(long)]
    pub enable_bson: bool,

    /// Go package name of the generated file
    #[arg(long, default_value = "main", value_parser = parse_package)]
    pub package: String,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .wrap_err("Failed to read schema from stdin")?;

        debug!(bytes = input.len(), "read schema from stdin");

        let schema =
            enumgen_schema::parse_str_with_filename(&input, STDIN_NAME).unwrap_or_exit();

        let code = Generator::new(&schema, self.options())
            .generate()
            .wrap_err("Failed to generate code")?;

        let mut stdout = io::stdout().lock();
        stdout
            .write_all(code.as_bytes())
            .and_then(|()| stdout.flush())
            .wrap_err("Failed to write generated code")
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions::new(&self.package)
            .with_json(self.enable_json)
            .with_bson(self.enable_bson)
    }
}

fn parse_package(name: &str) -> Result<String, String> {
    match enumgen_schema::validate_identifier(name) {
        Some(reason) => Err(format!("'{}' is not a valid Go package name: {}", name, reason)),
        None => Ok(name.to_string()),
    }
}
