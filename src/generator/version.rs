//! The `pkg/version` package, stamped through linker flags at build time.

use crate::error::Result;
use crate::generator::{render_spec, Mapping};
use crate::project::ProjectSpec;

pub fn generate(spec: &ProjectSpec) -> Result<Mapping> {
    let mut out = Mapping::new();
    out.insert("pkg/version/version.go".to_string(), render_spec(spec, "pkg/version/version.go.tmpl"));
    Ok(out)
}
