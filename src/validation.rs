//! Configuration validation against JSON-Schema documents.
//!
//! Validation is a two-stage pipeline:
//!
//! 1. **Canonicalisation**: configuration and schema text are parsed with a YAML parser into
//!    [`serde_json::Value`]. JSON is a subset of YAML, so one code path handles both
//!    formats. Malformed input stops the pipeline with [`ValidatorError::Parse`].
//! 2. **Evaluation**: the schema is compiled for its declared draft (or the configured
//!    default) and the configuration is evaluated against it. A schema that is not itself a
//!    valid JSON-Schema document stops the pipeline with [`ValidatorError::SchemaCompile`].
//!    Anything else yields a [`ValidationResult`], valid or not.
//!
//! A document that fails to parse is never reported as a schema violation.
//!
//! # Example Usage
//!
//! ```rust
//! use config_schema_registry::validation::ConfigValidator;
//!
//! let schema = r#"
//! type: object
//! properties:
//!   port:
//!     type: integer
//! "#;
//!
//! let validator = ConfigValidator::default();
//! let result = validator.validate(r#"port: "not-a-number""#, schema).unwrap();
//!
//! assert!(!result.valid);
//! assert_eq!(result.violations[0].path, "port");
//! ```

use jsonschema::{Draft, JSONSchema};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Path reported for violations at the document root.
pub const ROOT_PATH: &str = "(root)";

/// JSON-Schema drafts the validator can compile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchemaDraft {
    Draft4,
    Draft6,
    #[default]
    Draft7,
}

impl SchemaDraft {
    /// Recognise a `$schema` URI.
    pub fn from_schema_uri(uri: &str) -> Option<Self> {
        let uri = uri.trim().trim_end_matches('#');
        let uri = uri
            .strip_prefix("https://")
            .or_else(|| uri.strip_prefix("http://"))
            .unwrap_or(uri);

        match uri {
            "json-schema.org/draft-04/schema" => Some(SchemaDraft::Draft4),
            "json-schema.org/draft-06/schema" => Some(SchemaDraft::Draft6),
            "json-schema.org/draft-07/schema" => Some(SchemaDraft::Draft7),
            _ => None,
        }
    }

    fn as_jsonschema(self) -> Draft {
        match self {
            SchemaDraft::Draft4 => Draft::Draft4,
            SchemaDraft::Draft6 => Draft::Draft6,
            SchemaDraft::Draft7 => Draft::Draft7,
        }
    }
}

impl fmt::Display for SchemaDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDraft::Draft4 => write!(f, "draft-04"),
            SchemaDraft::Draft6 => write!(f, "draft-06"),
            SchemaDraft::Draft7 => write!(f, "draft-07"),
        }
    }
}

/// Which document a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Configuration,
    Schema,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Configuration => write!(f, "configuration"),
            DocumentKind::Schema => write!(f, "schema"),
        }
    }
}

/// Failures that stop the validation pipeline before any violation is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    /// The document is not well-formed YAML or JSON.
    #[error("Failed to parse {document}: {message}")]
    Parse {
        document: DocumentKind,
        message: String,
    },

    /// The schema parsed but is not a valid JSON-Schema document.
    #[error("Invalid JSON-Schema: {message}")]
    SchemaCompile { message: String },
}

/// A single way in which a configuration breaks its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON pointer to the offending node, empty at the root.
    pub pointer: String,
    /// Dotted logical path to the offending node, or [`ROOT_PATH`].
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn from_pointer(pointer: String, message: String) -> Self {
        let path = pointer_to_path(&pointer);
        Self {
            pointer,
            path,
            message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of evaluating a configuration against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `violations` is empty.
    pub valid: bool,
    /// Violations in schema traversal order.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// The first violation, if any.
    pub fn first_violation(&self) -> Option<&Violation> {
        self.violations.first()
    }
}

/// A schema compiled and ready to evaluate configurations.
pub struct CompiledSchema {
    draft: Option<SchemaDraft>,
    inner: JSONSchema,
}

impl CompiledSchema {
    /// The draft the schema was compiled for, when known.
    ///
    /// `None` when the schema declared a `$schema` this crate does not recognise and draft
    /// detection was left to the evaluator.
    pub fn draft(&self) -> Option<SchemaDraft> {
        self.draft
    }

    /// Evaluate a canonical configuration document.
    pub fn evaluate(&self, instance: &Value) -> ValidationResult {
        let violations = match self.inner.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| Violation::from_pointer(e.instance_path.to_string(), e.to_string()))
                .collect(),
        };
        ValidationResult::from_violations(violations)
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

/// Canonicalises and validates configuration documents.
///
/// Stateless apart from the draft used for schemas that declare none, so a single
/// instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator {
    default_draft: SchemaDraft,
}

impl ConfigValidator {
    /// Create a validator using `default_draft` for schemas without `$schema`.
    pub fn new(default_draft: SchemaDraft) -> Self {
        Self { default_draft }
    }

    /// The draft used when a schema declares none.
    pub fn default_draft(&self) -> SchemaDraft {
        self.default_draft
    }

    /// Parse YAML or JSON text into canonical JSON.
    ///
    /// Merge keys (`<<: *anchor`) are expanded. Values JSON cannot represent, such as
    /// `.nan` or `.inf`, are parse errors rather than silently becoming `null`.
    pub fn canonicalize(&self, text: &str, document: DocumentKind) -> Result<Value, ValidatorError> {
        let parse_error = |message: String| ValidatorError::Parse { document, message };

        let mut yaml: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
        yaml.apply_merge().map_err(|e| parse_error(e.to_string()))?;
        ensure_json_representable(&yaml).map_err(parse_error)?;

        serde_json::to_value(&yaml).map_err(|e| parse_error(e.to_string()))
    }

    /// Compile a canonical schema document.
    pub fn compile(&self, schema: &Value) -> Result<CompiledSchema, ValidatorError> {
        let draft = match declared_schema(schema) {
            Some(uri) => SchemaDraft::from_schema_uri(uri),
            None => Some(self.default_draft),
        };

        let mut options = JSONSchema::options();
        if let Some(draft) = draft {
            options.with_draft(draft.as_jsonschema());
        }

        let inner = options
            .compile(schema)
            .map_err(|e| ValidatorError::SchemaCompile {
                message: compile_message(&e.schema_path.to_string(), &e.to_string()),
            })?;

        trace!("Compiled schema for {:?}", draft);
        Ok(CompiledSchema { draft, inner })
    }

    /// Check that `schema_text` parses and compiles.
    pub fn check_schema(&self, schema_text: &str) -> Result<CompiledSchema, ValidatorError> {
        let schema = self.canonicalize(schema_text, DocumentKind::Schema)?;
        self.compile(&schema)
    }

    /// Run the full pipeline on raw configuration and schema text.
    pub fn validate(
        &self,
        configuration_text: &str,
        schema_text: &str,
    ) -> Result<ValidationResult, ValidatorError> {
        let configuration = self.canonicalize(configuration_text, DocumentKind::Configuration)?;
        let compiled = self.check_schema(schema_text)?;
        let result = compiled.evaluate(&configuration);

        debug!(
            "Validation finished: valid={} violations={}",
            result.valid,
            result.violations.len()
        );
        Ok(result)
    }
}

fn ensure_json_representable(value: &serde_yaml::Value) -> Result<(), String> {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Number(n) if n.is_nan() || n.is_infinite() => {
            Err(format!("value {} cannot be represented as JSON", n))
        }
        Yaml::Sequence(items) => items.iter().try_for_each(ensure_json_representable),
        Yaml::Mapping(map) => map.iter().try_for_each(|(k, v)| {
            ensure_json_representable(k)?;
            ensure_json_representable(v)
        }),
        Yaml::Tagged(tagged) => ensure_json_representable(&tagged.value),
        _ => Ok(()),
    }
}

fn declared_schema(schema: &Value) -> Option<&str> {
    schema.as_object()?.get("$schema")?.as_str()
}

fn compile_message(schema_path: &str, detail: &str) -> String {
    if schema_path.is_empty() {
        detail.to_string()
    } else {
        format!("{} (at {})", detail, schema_path)
    }
}

/// Convert a JSON pointer such as `/server/ports/0` into `server.ports.0`.
fn pointer_to_path(pointer: &str) -> String {
    if pointer.is_empty() {
        return ROOT_PATH.to_string();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
