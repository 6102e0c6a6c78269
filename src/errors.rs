//! An error type for every way a verification run can fail.

use crate::report::Report;
use failure::Fail;
use std::io;

/// An enum of possible errors that can emerge from verifying a document.
///
/// Each variant corresponds to one stage of the pipeline, so callers (and
/// users) can always tell which input was at fault. Use
/// `failure::Error::downcast_ref::<JsvError>()` to recover the variant from a
/// `failure::Error`.
#[derive(Debug, Fail)]
pub enum JsvError {
    /// The JSON data file could not be read.
    #[fail(display = "failed to read JSON file '{}'", path)]
    ReadDocument {
        path: String,
        #[fail(cause)]
        cause: io::Error,
    },

    /// The JSON Schema file could not be read.
    #[fail(display = "failed to read JSON schema file '{}'", path)]
    ReadSchema {
        path: String,
        #[fail(cause)]
        cause: io::Error,
    },

    /// The JSON data file is not syntactically valid JSON.
    ///
    /// When this error is returned, the document was never handed to a
    /// validator.
    #[fail(display = "failed to parse JSON file '{}'", path)]
    ParseDocument {
        path: String,
        #[fail(cause)]
        cause: serde_json::Error,
    },

    /// The schema file could not be compiled into a validator.
    ///
    /// This covers schema files which aren't UTF-8, aren't JSON, or which are
    /// JSON but not an acceptable JSON Schema (for example `{"type": 12}`),
    /// as well as `$ref`s that cannot be resolved locally.
    #[fail(display = "failed to parse JSON schema '{}': {}", path, reason)]
    CompileSchema { path: String, reason: String },

    /// The validator itself failed while evaluating the document.
    ///
    /// This is distinct from the document being invalid: it means no verdict
    /// could be reached at all.
    #[fail(display = "failed to validate JSON against schema: {}", reason)]
    Engine { reason: String },

    /// The document is well-formed JSON but violates the schema.
    #[fail(display = "{}", _0)]
    Invalid(Report),
}
