//! The interface to a JSON Schema validation capability.
//!
//! Nothing in this crate evaluates schema keywords itself. Instead, an
//! [`Engine`](trait.Engine.html) turns schema text into something which
//! implements [`Validate`](trait.Validate.html), and that in turn produces an
//! [`Outcome`](struct.Outcome.html) for a document.
//!
//! The only engine shipped is
//! [`JsonSchemaEngine`](../engine/struct.JsonSchemaEngine.html); the pipeline
//! in [`cli::verify`](../cli/fn.verify.html) is generic over `Engine` so that
//! another library could be slotted in without touching it.

use failure::{format_err, Error};
use json_pointer::JsonPointer;
use serde_json::Value;
use std::fmt;

/// An owned JSON Pointer, as used in violation paths.
pub type Pointer = JsonPointer<String, Vec<String>>;

/// Compiles schema text into validators.
pub trait Engine {
    type Validator: Validate;

    /// Compile a JSON Schema, given as JSON text.
    ///
    /// Returns an error if the text is not JSON, or is not a schema the
    /// engine accepts.
    fn compile(&self, schema: &str) -> Result<Self::Validator, Error>;
}

/// A compiled schema.
pub trait Validate {
    /// Check a document against the compiled schema.
    ///
    /// A document failing the schema is an `Ok` outcome with violations. An
    /// `Err` is reserved for the engine being unable to reach a verdict.
    fn validate(&self, document: &Value) -> Result<Outcome, Error>;
}

/// The result of validating one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    violations: Vec<Violation>,
}

impl Outcome {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Whether the document satisfied the schema.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violations, in the order the engine produced them.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// A single way in which a document fails to satisfy a schema.
///
/// Like `Outcome`, this is not a Rust error: it's ordinary data describing
/// what was wrong with the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    instance_path: Pointer,
    schema_path: Pointer,
    message: String,
}

impl Violation {
    pub fn new(instance_path: Pointer, schema_path: Pointer, message: String) -> Violation {
        Violation {
            instance_path,
            schema_path,
            message,
        }
    }

    /// A pointer into the part of the document which was rejected.
    pub fn instance_path(&self) -> &Pointer {
        &self.instance_path
    }

    /// A pointer into the part of the schema which rejected the document.
    pub fn schema_path(&self) -> &Pointer {
        &self.schema_path
    }

    /// A human-readable explanation, as worded by the engine.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.instance_path.to_string();
        if location.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", location, self.message)
        }
    }
}

/// Parses a `Pointer` from its RFC 6901 string form.
///
/// The empty string is the root pointer.
pub fn pointer(location: &str) -> Result<Pointer, Error> {
    if location.is_empty() {
        return Ok(JsonPointer::new(vec![]));
    }

    location
        .parse::<Pointer>()
        .map_err(|e| format_err!("invalid JSON pointer {:?}: {:?}", location, e))
}
