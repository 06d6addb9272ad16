//! The generated project's `internal/config` package.

use crate::error::Result;
use crate::generator::{render_spec, Mapping};
use crate::project::ProjectSpec;

const FILES: [(&str, &str); 6] = [
    ("internal/config/README.md", "internal/config/readme.md.tmpl"),
    ("internal/config/config.yml", "internal/config/config.yml.tmpl"),
    ("internal/config/.env.example", "internal/config/env.tmpl"),
    ("internal/config/logger.go", "internal/config/logger.go.tmpl"),
    ("internal/config/config_test.go", "internal/config/config_test.go.tmpl"),
    ("internal/config/config.go", "internal/config/config.go.tmpl"),
];

pub fn generate(spec: &ProjectSpec) -> Result<Mapping> {
    Ok(FILES
        .iter()
        .map(|(destination, template)| (destination.to_string(), render_spec(spec, *template)))
        .collect())
}
