//! `jsv` checks that a JSON document conforms to a [JSON Schema][json-schema],
//! and explains why when it doesn't.
//!
//! Most people will use the `jsv` binary:
//!
//! ```text
//! jsv [OPTIONS] <json-data-path> <json-schema-path>
//! ```
//!
//! It exits with status 0 when the document is valid, and with status 1 after
//! printing the problem otherwise. This crate does not evaluate schema
//! keywords itself; that is delegated to the [`jsonschema`][jsonschema] crate
//! through the narrow [`Engine`](validator/trait.Engine.html) and
//! [`Validate`](validator/trait.Validate.html) traits.
//!
//! # Validating data
//!
//! The same machinery is available as a library:
//!
//! ```
//! use failure::Error;
//! use jsv::{Engine, JsonSchemaEngine, Report, Validate};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Error> {
//!     let schema = r#"
//!         {
//!             "type": "object",
//!             "properties": {
//!                 "age": { "type": "integer", "minimum": 18 }
//!             }
//!         }
//!     "#;
//!
//!     let validator = JsonSchemaEngine::new().compile(schema)?;
//!     assert!(validator.validate(&json!({ "age": 21 }))?.is_valid());
//!
//!     // Each Violation holds paths to the bad part of the input, as well as
//!     // the part of the schema which rejected it.
//!     let outcome = validator.validate(&json!({ "age": 5 }))?;
//!     assert_eq!(outcome.violations().len(), 1);
//!     assert_eq!(outcome.violations()[0].instance_path().to_string(), "/age");
//!     assert_eq!(
//!         outcome.violations()[0].schema_path().to_string(),
//!         "/properties/age/minimum"
//!     );
//!
//!     // A Report renders violations the way the binary prints them.
//!     let report = Report::new(outcome.into_violations());
//!     assert!(report
//!         .to_string()
//!         .starts_with("JSON is not valid according to the schema:\n- /age: "));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Verifying files
//!
//! [`cli::verify`](cli/fn.verify.html) runs the binary's whole pipeline over
//! two paths. Its errors are [`JsvError`](errors/enum.JsvError.html)s, which
//! say which of the two files was at fault.
//!
//! [json-schema]: https://json-schema.org
//!
//! [jsonschema]: https://docs.rs/jsonschema

pub mod cli;
pub mod engine;
pub mod errors;
pub mod report;
pub mod validator;

pub use crate::engine::{Config, JsonSchemaEngine, JsonSchemaValidator};
pub use crate::errors::JsvError;
pub use crate::report::Report;
pub use crate::validator::{Engine, Outcome, Pointer, Validate, Violation};
