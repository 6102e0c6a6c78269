//! The command-line driver behind the `jsv` binary.
//!
//! [`verify`](fn.verify.html) is the whole pipeline: read both files, parse
//! the document, compile the schema, validate, and turn any violations into a
//! [`Report`](../report/struct.Report.html). Each stage's failure is returned
//! immediately as a [`JsvError`](../errors/enum.JsvError.html); nothing is
//! retried and nothing is partially reported.

use crate::engine::{Config, JsonSchemaEngine};
use crate::errors::JsvError;
use crate::report::Report;
use crate::validator::{Engine, Validate};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use failure::Error;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Verify that a JSON document conforms to a JSON Schema.
///
/// Exits successfully and silently when the document is valid. Otherwise the
/// problem (or every schema violation) is printed to stderr and the exit
/// status is 1.
#[derive(Parser, Debug)]
#[command(name = "jsv", version)]
pub struct Cli {
    /// Path to the JSON document to verify.
    pub data: Option<PathBuf>,

    /// Path to the JSON Schema to verify the document against.
    pub schema: Option<PathBuf>,

    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Use this JSON Schema draft instead of the one named by `$schema`.
    #[arg(long, value_enum)]
    pub draft: Option<Draft>,

    /// Stop after this many violations. 0 reports all of them.
    #[arg(long, default_value_t = 0)]
    pub max_errors: usize,

    /// Log progress to stderr. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The engine configuration these arguments ask for, for a schema living
    /// at `schema`.
    pub fn config(&self, schema: &Path) -> Config {
        let mut config = Config::new();
        config.max_errors(self.max_errors);

        if let Some(draft) = self.draft {
            config.draft(draft.into());
        }

        if let Some(dir) = schema.parent() {
            config.base_dir(dir);
        }

        config
    }
}

/// JSON Schema drafts selectable with `--draft`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Draft {
    #[value(name = "4")]
    Draft4,
    #[value(name = "6")]
    Draft6,
    #[value(name = "7")]
    Draft7,
    #[value(name = "2019-09")]
    Draft201909,
    #[value(name = "2020-12")]
    Draft202012,
}

impl From<Draft> for jsonschema::Draft {
    fn from(draft: Draft) -> Self {
        match draft {
            Draft::Draft4 => jsonschema::Draft::Draft4,
            Draft::Draft6 => jsonschema::Draft::Draft6,
            Draft::Draft7 => jsonschema::Draft::Draft7,
            Draft::Draft201909 => jsonschema::Draft::Draft201909,
            Draft::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

/// Runs the command described by `cli`.
///
/// With fewer than two paths, usage is written to `out` and nothing else
/// happens: no file is touched and the run counts as a success.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), Error> {
    let (data, schema) = match (&cli.data, &cli.schema) {
        (Some(data), Some(schema)) => (data, schema),
        _ => {
            writeln!(out, "{}", Cli::command().render_usage())?;
            return Ok(());
        }
    };

    if !cli.extra.is_empty() {
        warn!(ignored = ?cli.extra, "ignoring extra arguments");
    }

    let engine = JsonSchemaEngine::new_with_config(cli.config(schema));
    verify(&engine, data, schema)
}

/// Runs the command and reports the result the way the binary does,
/// returning the process exit status.
///
/// Usage and a valid document are 0. Any error, a schema violation included,
/// is written to `err` followed by one `caused by:` line per underlying
/// cause, and yields 1.
pub fn execute<W: Write, E: Write>(cli: &Cli, out: &mut W, err: &mut E) -> i32 {
    let failure = match run(cli, out) {
        Ok(()) => return 0,
        Err(failure) => failure,
    };

    // Nothing useful can be done if stderr itself is gone.
    let _ = writeln!(err, "{}", failure);
    for cause in failure.iter_causes() {
        let _ = writeln!(err, "  caused by: {}", cause);
    }

    1
}

/// Verifies the document at `data` against the schema at `schema`.
///
/// Returns `Ok(())` only when the document is valid. Every failure is a
/// [`JsvError`](../errors/enum.JsvError.html) inside the returned `Error`,
/// including a document that violates the schema
/// ([`JsvError::Invalid`](../errors/enum.JsvError.html#variant.Invalid)).
pub fn verify<E: Engine>(engine: &E, data: &Path, schema: &Path) -> Result<(), Error> {
    debug!(path = %data.display(), "reading JSON document");
    let document = fs::read(data).map_err(|cause| JsvError::ReadDocument {
        path: data.display().to_string(),
        cause,
    })?;

    debug!(path = %schema.display(), "reading JSON schema");
    let schema_source = fs::read(schema).map_err(|cause| JsvError::ReadSchema {
        path: schema.display().to_string(),
        cause,
    })?;

    let document: Value =
        serde_json::from_slice(&document).map_err(|cause| JsvError::ParseDocument {
            path: data.display().to_string(),
            cause,
        })?;

    debug!(path = %schema.display(), "compiling JSON schema");
    let validator = str::from_utf8(&schema_source)
        .map_err(Error::from)
        .and_then(|text| engine.compile(text))
        .map_err(|e| JsvError::CompileSchema {
            path: schema.display().to_string(),
            reason: e.to_string(),
        })?;

    let outcome = validator
        .validate(&document)
        .map_err(|e| JsvError::Engine {
            reason: e.to_string(),
        })?;

    if outcome.is_valid() {
        info!(document = %data.display(), schema = %schema.display(), "document is valid");
        return Ok(());
    }

    info!(
        document = %data.display(),
        violations = outcome.violations().len(),
        "document violates schema"
    );
    Err(JsvError::Invalid(Report::new(outcome.into_violations())).into())
}

/// Installs the stderr log subscriber. `verbosity` is the number of `-v`
/// flags given.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .init();
}
