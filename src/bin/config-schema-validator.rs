//! # Configuration Schema Validator
//!
//! A command-line utility for validating a configuration file against a JSON-Schema
//! document without a running registry or key-value store.
//!
//! Both files may be written in YAML or JSON. The same validation pipeline the registry
//! uses for Validate requests is applied, so a configuration accepted here is accepted by
//! the registry for the same schema.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin config-schema-validator schemas/service.yaml config/service.yaml
//! ```
//!
//! ## Output Examples
//!
//! ### Valid Configuration
//!
//! ```text
//! Validating config/service.yaml against schemas/service.yaml
//! ✓ Configuration is valid!
//! ```
//!
//! ### Invalid Configuration
//!
//! ```text
//! Validating config/service.yaml against schemas/service.yaml
//! ❌ Configuration is not valid (2 violations):
//!   - port: "not-a-number" is not of type "integer"
//!   - (root): "service" is a required property
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: The configuration is valid
//! - `1`: The configuration is invalid, or a file could not be read, parsed or compiled

use config_schema_registry::validation::ConfigValidator;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <schema-file> <config-file>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/service.yaml config/service.yaml", args[0]);
        eprintln!("  {} schemas/service.json config/service.json", args[0]);
        process::exit(1);
    }

    let schema_path = Path::new(&args[1]);
    let config_path = Path::new(&args[2]);

    println!(
        "Validating {} against {}",
        config_path.display(),
        schema_path.display()
    );

    let schema = read_file(schema_path);
    let configuration = read_file(config_path);

    let validator = ConfigValidator::default();
    match validator.validate(&configuration, &schema) {
        Ok(result) if result.valid => {
            println!("✓ Configuration is valid!");
        }
        Ok(result) => {
            eprintln!(
                "❌ Configuration is not valid ({} violation{}):",
                result.violations.len(),
                if result.violations.len() == 1 { "" } else { "s" }
            );
            for violation in &result.violations {
                eprintln!("  - {}", violation);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn read_file(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}
