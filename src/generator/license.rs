//! The project `LICENSE` file.

use crate::error::Result;
use crate::generator::{render_spec, Mapping};
use crate::project::{License, ProjectSpec};

/// # Errors
/// * `Error::UnsupportedLicenseError` if the license has no bundled template
pub fn generate(spec: &ProjectSpec) -> Result<Mapping> {
    let license: License = spec.license.parse()?;

    let mut out = Mapping::new();
    out.insert("LICENSE".to_string(), render_spec(spec, license.fragment()));
    Ok(out)
}
