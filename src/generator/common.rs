//! Top-level project files.

use crate::error::Result;
use crate::generator::{render_spec, Mapping};
use crate::project::ProjectSpec;

const FILES: [(&str, &str); 5] = [
    (".gitignore", "common/gitignore.tmpl"),
    (".env.example", "common/env.tmpl"),
    ("go.mod", "common/go.mod.tmpl"),
    ("README.md", "common/readme.md.tmpl"),
    (".air.toml", "common/air.toml.tmpl"),
];

pub fn generate(spec: &ProjectSpec) -> Result<Mapping> {
    Ok(FILES
        .iter()
        .map(|(destination, template)| (destination.to_string(), render_spec(spec, *template)))
        .collect())
}
