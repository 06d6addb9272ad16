//! Project configuration handling.
//! Loads the optional `craft.json` / `craft.yml` / `craft.yaml` file and merges
//! it with command-line values into a [`ProjectSpec`].

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::project::{default_config_dirs, default_env_prefix, ProjectSpec};

/// Partial project description, as read from a file or the command line.
///
/// Every field is optional; unset fields fall back to the next source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(alias = "name")]
    pub project_name: Option<String>,
    #[serde(alias = "module")]
    pub module_prefix: Option<String>,
    pub binaries: Option<Vec<String>>,
    #[serde(alias = "cli")]
    pub cli_framework: Option<String>,
    pub license: Option<String>,
    #[serde(alias = "go")]
    pub go_version: Option<String>,
    pub author: Option<String>,
    pub config_dirs: Option<Vec<String>>,
    pub config_file: Option<String>,
    pub config_format: Option<String>,
    pub env_prefix: Option<String>,
    pub includes: Option<Vec<String>>,
    pub description: Option<String>,
    pub year: Option<i32>,
}

impl ProjectConfig {
    /// Layers `overrides` on top of `self`: every field set in `overrides` wins.
    pub fn merge(self, overrides: ProjectConfig) -> ProjectConfig {
        ProjectConfig {
            project_name: overrides.project_name.or(self.project_name),
            module_prefix: overrides.module_prefix.or(self.module_prefix),
            binaries: overrides.binaries.or(self.binaries),
            cli_framework: overrides.cli_framework.or(self.cli_framework),
            license: overrides.license.or(self.license),
            go_version: overrides.go_version.or(self.go_version),
            author: overrides.author.or(self.author),
            config_dirs: overrides.config_dirs.or(self.config_dirs),
            config_file: overrides.config_file.or(self.config_file),
            config_format: overrides.config_format.or(self.config_format),
            env_prefix: overrides.env_prefix.or(self.env_prefix),
            includes: overrides.includes.or(self.includes),
            description: overrides.description.or(self.description),
            year: overrides.year.or(self.year),
        }
    }

    /// Builds the final spec, deriving whatever is still unset from the name.
    ///
    /// # Arguments
    /// * `default_year` - Copyright year used when none is configured
    ///
    /// # Errors
    /// * `Error::ValidationError` if the project name or module is missing or blank
    pub fn into_spec(self, default_year: i32) -> Result<ProjectSpec> {
        let name = required(self.project_name, "project name (--name)")?;
        let module = required(self.module_prefix, "module path (--module)")?;

        let mut spec = ProjectSpec::new(name, module);
        if let Some(binaries) = self.binaries.filter(|b| !b.is_empty()) {
            spec.binaries = binaries;
        }
        if let Some(framework) = self.cli_framework {
            spec.cli_framework = framework;
        }
        if let Some(license) = self.license {
            spec.license = license.to_lowercase();
        }
        if let Some(go_version) = self.go_version {
            spec.go_version = go_version;
        }
        if let Some(author) = self.author {
            spec.author = author;
        }
        spec.config_dirs =
            self.config_dirs.unwrap_or_else(|| default_config_dirs(&spec.project_name));
        if let Some(config_file) = self.config_file {
            spec.config_file = config_file;
        }
        if let Some(config_format) = self.config_format {
            spec.config_format = config_format;
        }
        spec.env_prefix = self.env_prefix.unwrap_or_else(|| default_env_prefix(&spec.project_name));
        spec.includes = self.includes.unwrap_or_default();
        if let Some(description) = self.description {
            spec.description = description;
        }
        spec.year = self.year.unwrap_or(default_year);

        Ok(spec)
    }
}

fn required(value: Option<String>, what: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::ValidationError(format!("{} is required", what))),
    }
}

/// Reads the first configuration file found in `dir`.
///
/// # Arguments
/// * `dir` - Directory to search
/// * `config_files` - Candidate file names, in priority order
///
/// # Returns
/// * `Result<Option<String>>` - Content of the first file found, `None` if there is none
pub fn load_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }

    debug!("No configuration file found (tried: {})", config_files.join(", "));
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML,
///   or contains unknown fields
pub fn parse_config(content: &str) -> Result<ProjectConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
    }
}
