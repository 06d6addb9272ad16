//! The project description every generator reads from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CLI_FRAMEWORK, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_FORMAT, DEFAULT_GO_VERSION,
    DEFAULT_LICENSE,
};
use crate::error::Error;

/// Configuration of the project being scaffolded.
///
/// Generators only ever receive it as `&ProjectSpec`, so a run cannot change it.
/// It is also the default template payload: every field is visible to templates
/// under its own name (`{{ project_name }}`, `{{ module_prefix }}`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub project_name: String,
    pub module_prefix: String,
    pub binaries: Vec<String>,
    /// Raw framework selector, validated by the generators that need it.
    pub cli_framework: String,
    /// Raw license identifier, validated by the license generator.
    pub license: String,
    pub go_version: String,
    pub author: String,
    pub config_dirs: Vec<String>,
    pub config_file: String,
    pub config_format: String,
    pub env_prefix: String,
    pub includes: Vec<String>,
    pub description: String,
    /// Copyright year. Always injected by the caller.
    pub year: i32,
}

impl Default for ProjectSpec {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            module_prefix: String::new(),
            binaries: Vec::new(),
            cli_framework: DEFAULT_CLI_FRAMEWORK.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            go_version: DEFAULT_GO_VERSION.to_string(),
            author: String::new(),
            config_dirs: Vec::new(),
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            config_format: DEFAULT_CONFIG_FORMAT.to_string(),
            env_prefix: String::new(),
            includes: Vec::new(),
            description: String::new(),
            year: 0,
        }
    }
}

impl ProjectSpec {
    /// Creates a spec for `name` with the defaults derived from the name:
    /// one binary called like the project, `/etc/<name>` and
    /// `$HOME/.config/<name>` as config directories, and an environment
    /// prefix of the upper-cased name.
    pub fn new<N: Into<String>, M: Into<String>>(name: N, module_prefix: M) -> Self {
        let project_name = name.into();
        Self {
            binaries: vec![project_name.clone()],
            config_dirs: default_config_dirs(&project_name),
            env_prefix: default_env_prefix(&project_name),
            description: project_name.clone(),
            module_prefix: module_prefix.into(),
            project_name,
            ..Self::default()
        }
    }

    pub fn is_multi_binary(&self) -> bool {
        self.binaries.len() > 1
    }
}

pub fn default_config_dirs(name: &str) -> Vec<String> {
    vec![format!("/etc/{}", name), format!("$HOME/.config/{}", name)]
}

pub fn default_env_prefix(name: &str) -> String {
    name.replace('-', "_").to_uppercase()
}

/// CLI frameworks the commands generator knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliFramework {
    Cobra,
    Urfave,
}

impl CliFramework {
    pub const ALL: [CliFramework; 2] = [CliFramework::Cobra, CliFramework::Urfave];

    pub fn as_str(&self) -> &'static str {
        match self {
            CliFramework::Cobra => "cobra",
            CliFramework::Urfave => "urfave",
        }
    }
}

impl fmt::Display for CliFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CliFramework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cobra" => Ok(CliFramework::Cobra),
            "urfave" => Ok(CliFramework::Urfave),
            other => Err(Error::UnsupportedFrameworkError { framework: other.to_string() }),
        }
    }
}

/// Licenses with a bundled template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum License {
    Mit,
    Apache2,
    Agpl3,
    Bsd3,
    Gpl3,
    Mpl2,
}

impl License {
    pub const ALL: [License; 6] =
        [License::Mit, License::Apache2, License::Agpl3, License::Bsd3, License::Gpl3, License::Mpl2];

    /// SPDX-style identifier.
    pub fn id(&self) -> &'static str {
        match self {
            License::Mit => "mit",
            License::Apache2 => "apache-2.0",
            License::Agpl3 => "agpl-3.0",
            License::Bsd3 => "bsd-3-clause",
            License::Gpl3 => "gpl-3.0",
            License::Mpl2 => "mpl-2.0",
        }
    }

    /// Template fragment holding the license text.
    pub fn fragment(&self) -> &'static str {
        match self {
            License::Mit => "license/mit.tmpl",
            License::Apache2 => "license/apache2.tmpl",
            License::Agpl3 => "license/agpl3.tmpl",
            License::Bsd3 => "license/bsd3.tmpl",
            License::Gpl3 => "license/gpl3.tmpl",
            License::Mpl2 => "license/mpl2.tmpl",
        }
    }
}

impl FromStr for License {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mit" => Ok(License::Mit),
            "apache-2.0" | "apache" => Ok(License::Apache2),
            "agpl-3.0" | "agpl" => Ok(License::Agpl3),
            "bsd-3-clause" | "bsd" => Ok(License::Bsd3),
            "gpl-3.0" | "gpl" => Ok(License::Gpl3),
            "mpl-2.0" | "mpl" => Ok(License::Mpl2),
            other => Err(Error::UnsupportedLicenseError { license: other.to_string() }),
        }
    }
}
