//! The `jsonschema`-backed validation engine.
//!
//! [`JsonSchemaEngine`](struct.JsonSchemaEngine.html) compiles schema text
//! with the [`jsonschema`](https://docs.rs/jsonschema) crate. References to
//! other schemas are only ever resolved from the local filesystem; see
//! [`Config::base_dir`](struct.Config.html#method.base_dir).

use crate::validator::{pointer, Engine, Outcome, Validate, Violation};
use failure::{format_err, Error};
use jsonschema::{Retrieve, Uri};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// The base URI `jsonschema` gives to schemas without an `$id`. Relative
/// references inside such schemas resolve beneath it.
const DEFAULT_ROOT_SCHEME: &str = "json-schema";

/// Compiles JSON Schemas using the `jsonschema` crate.
#[derive(Debug, Default, Clone)]
pub struct JsonSchemaEngine {
    config: Config,
}

impl JsonSchemaEngine {
    /// Constructs a new engine using the default configuration.
    pub fn new() -> Self {
        Self::new_with_config(Config::default())
    }

    /// Constructs a new engine using a configuration.
    pub fn new_with_config(config: Config) -> Self {
        Self { config }
    }

    fn options(&self) -> jsonschema::ValidationOptions {
        let mut opts = jsonschema::options();
        if let Some(draft) = self.config.draft {
            opts.with_draft(draft);
        }

        opts.with_retriever(LocalRetriever {
            base_dir: self.config.base_dir.clone(),
        });

        opts
    }
}

impl Engine for JsonSchemaEngine {
    type Validator = JsonSchemaValidator;

    fn compile(&self, schema: &str) -> Result<JsonSchemaValidator, Error> {
        let schema: Value =
            serde_json::from_str(schema).map_err(|e| format_err!("invalid JSON: {}", e))?;

        let inner = self
            .options()
            .build(&schema)
            .map_err(|e| format_err!("{}", e))?;

        Ok(JsonSchemaValidator {
            inner,
            max_errors: self.config.max_errors,
        })
    }
}

/// A schema compiled by [`JsonSchemaEngine`](struct.JsonSchemaEngine.html).
pub struct JsonSchemaValidator {
    inner: jsonschema::Validator,
    max_errors: usize,
}

impl Validate for JsonSchemaValidator {
    fn validate(&self, document: &Value) -> Result<Outcome, Error> {
        let limit = match self.max_errors {
            0 => usize::MAX,
            n => n,
        };

        let violations = self
            .inner
            .iter_errors(document)
            .take(limit)
            .map(|err| -> Result<Violation, Error> {
                Ok(Violation::new(
                    pointer(&err.instance_path.to_string())?,
                    pointer(&err.schema_path.to_string())?,
                    err.to_string(),
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Outcome::new(violations))
    }
}

/// Resolves `$ref`s from disk, and refuses everything else.
///
/// `file://` references are read as-is. References relative to a schema
/// without an `$id` arrive under the `json-schema:///` root and are looked up
/// beneath the configured base directory. Any other scheme is an error, so
/// compiling a schema never touches the network.
struct LocalRetriever {
    base_dir: Option<PathBuf>,
}

impl LocalRetriever {
    fn locate(&self, url: &Url) -> Result<PathBuf, String> {
        match url.scheme() {
            "file" => url
                .to_file_path()
                .map_err(|()| format!("not a local file reference: {}", url)),
            DEFAULT_ROOT_SCHEME => match &self.base_dir {
                Some(dir) => {
                    let relative = percent_decode_str(url.path().trim_start_matches('/'))
                        .decode_utf8()
                        .map_err(|e| format!("invalid reference {}: {}", url, e))?;
                    Ok(dir.join(&*relative))
                }
                None => Err(format!(
                    "cannot resolve relative reference {} without a schema directory",
                    url
                )),
            },
            scheme => Err(format!("refusing to fetch {} reference {}", scheme, url)),
        }
    }
}

impl Retrieve for LocalRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse(uri.as_str())?;
        let path = self.locate(&url)?;
        debug!(uri = %url, path = %path.display(), "retrieving referenced schema");

        let bytes = fs::read(&path)
            .map_err(|e| format!("cannot read referenced schema {}: {}", path.display(), e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Configuration for how schemas should be compiled and evaluated.
#[derive(Debug, Clone)]
pub struct Config {
    draft: Option<jsonschema::Draft>,
    max_errors: usize,
    base_dir: Option<PathBuf>,
}

impl Config {
    /// Create a new, default `Config`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the JSON Schema draft to compile against. By default the draft
    /// is detected from the schema's `$schema` keyword.
    pub fn draft(&mut self, draft: jsonschema::Draft) -> &mut Self {
        self.draft = Some(draft);
        self
    }

    /// Sets the maximum number of violations to produce before stopping
    /// validation. 0, the default value, indicates that all violations should
    /// be produced.
    pub fn max_errors(&mut self, max_errors: usize) -> &mut Self {
        self.max_errors = max_errors;
        self
    }

    /// Sets the directory that relative `$ref`s to other schema files are
    /// resolved against. This is normally the directory holding the schema.
    ///
    /// Without a base directory, relative references to other files fail to
    /// compile.
    pub fn base_dir(&mut self, base_dir: impl AsRef<Path>) -> &mut Self {
        self.base_dir = Some(base_dir.as_ref().to_path_buf());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            draft: None,
            max_errors: 0,
            base_dir: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn adult_schema() -> String {
        json!({
            "type": "object",
            "properties": {
                "age": { "type": "integer", "minimum": 18 }
            },
            "required": ["age"]
        })
        .to_string()
    }

    #[test]
    fn minimum_age() -> Result<(), Error> {
        let validator = JsonSchemaEngine::new().compile(&adult_schema())?;

        let outcome = validator.validate(&json!({ "age": 5 }))?;
        assert!(!outcome.is_valid());
        assert_eq!(outcome.violations().len(), 1);

        let violation = &outcome.violations()[0];
        assert_eq!(violation.instance_path().to_string(), "/age");
        assert_eq!(
            violation.schema_path().to_string(),
            "/properties/age/minimum"
        );
        assert!(violation.message().contains("minimum"));

        assert!(validator.validate(&json!({ "age": 21 }))?.is_valid());
        Ok(())
    }

    #[test]
    fn not_json() {
        assert!(JsonSchemaEngine::new().compile("{\"type\": ").is_err());
    }

    #[test]
    fn invalid_keyword_type() {
        let schema = json!({ "type": 12 }).to_string();
        assert!(JsonSchemaEngine::new().compile(&schema).is_err());
    }

    #[test]
    fn max_errors() -> Result<(), Error> {
        let schema = json!({ "items": { "type": "string" } }).to_string();
        let document = json!([null, null, null, null, null]);

        let all = JsonSchemaEngine::new().compile(&schema)?.validate(&document)?;
        assert_eq!(all.violations().len(), 5);

        let mut config = Config::new();
        config.max_errors(3);
        let limited = JsonSchemaEngine::new_with_config(config)
            .compile(&schema)?
            .validate(&document)?;
        assert_eq!(limited.violations().len(), 3);

        Ok(())
    }

    #[test]
    fn violations_keep_engine_order() -> Result<(), Error> {
        let schema = json!({ "items": { "type": "string" } }).to_string();
        let outcome = JsonSchemaEngine::new()
            .compile(&schema)?
            .validate(&json!(["ok", 1, "ok", 2]))?;

        let paths: Vec<String> = outcome
            .violations()
            .iter()
            .map(|v| v.instance_path().to_string())
            .collect();
        assert_eq!(paths, vec!["/1", "/3"]);
        Ok(())
    }

    #[test]
    fn forced_draft() -> Result<(), Error> {
        // `const` arrived in draft 6, so draft 4 ignores it.
        let schema = json!({ "const": 1 }).to_string();
        assert!(!JsonSchemaEngine::new()
            .compile(&schema)?
            .validate(&json!(2))?
            .is_valid());

        let mut config = Config::new();
        config.draft(jsonschema::Draft::Draft4);
        let validator = JsonSchemaEngine::new_with_config(config).compile(&schema)?;
        assert!(validator.validate(&json!(2))?.is_valid());
        Ok(())
    }

    #[test]
    fn remote_references_are_refused() {
        let schema = json!({ "$ref": "https://example.com/person.json" }).to_string();
        assert!(JsonSchemaEngine::new().compile(&schema).is_err());
    }

    #[test]
    fn locate_relative_reference() {
        let retriever = LocalRetriever {
            base_dir: Some(PathBuf::from("/schemas")),
        };
        let url = Url::parse("json-schema:///defs/person.json").unwrap();
        assert_eq!(
            retriever.locate(&url).unwrap(),
            PathBuf::from("/schemas/defs/person.json")
        );

        let escaped = Url::parse("json-schema:///my%20address.json").unwrap();
        assert_eq!(
            retriever.locate(&escaped).unwrap(),
            PathBuf::from("/schemas/my address.json")
        );

        let orphan = LocalRetriever { base_dir: None };
        assert!(orphan.locate(&url).is_err());
    }

    #[test]
    fn locate_refuses_remote() {
        let retriever = LocalRetriever {
            base_dir: Some(PathBuf::from("/schemas")),
        };
        let url = Url::parse("http://example.com/person.json").unwrap();
        assert!(retriever.locate(&url).is_err());
    }
}
