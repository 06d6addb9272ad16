//! Generators and the registry that names them.
//!
//! A generator is a pure function from a [`ProjectSpec`] to the files it wants:
//! each destination path maps to a [`RenderInstruction`] telling the processor
//! which fragments to compose and which data to render them with.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use minijinja::Value;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::project::ProjectSpec;

pub mod commands;
pub mod common;
pub mod config;
pub mod docker;
pub mod license;
pub mod script;
pub mod version;

/// Destination path to render instruction, in declaration order.
pub type Mapping = IndexMap<String, RenderInstruction>;

/// Produces the render instructions for one concern of the project.
pub type GeneratorFn = fn(&ProjectSpec) -> Result<Mapping>;

/// How to produce one destination file.
#[derive(Debug, Clone)]
pub struct RenderInstruction {
    templates: Vec<String>,
    data: Value,
    entry_point: Option<String>,
}

impl RenderInstruction {
    /// Renders the root of `templates` (composed in order) with `data`.
    pub fn new<I, S, D>(templates: I, data: &D) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Serialize + ?Sized,
    {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
            data: Value::from_serialize(data),
            entry_point: None,
        }
    }

    /// Renders the named block instead of the root template.
    pub fn with_entry_point<S: Into<String>>(mut self, entry_point: S) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }
}

/// Shorthand for the common case: the project spec itself as payload.
pub(crate) fn render_spec<S: Into<String>>(spec: &ProjectSpec, template: S) -> RenderInstruction {
    RenderInstruction::new([template], spec)
}

/// Fails when a binary is listed twice. Destinations are keyed by binary, so a
/// repeat would silently replace the earlier entry.
///
/// # Errors
/// * `Error::ValidationError` naming the first repeated binary
pub(crate) fn unique_binaries(spec: &ProjectSpec) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for binary in &spec.binaries {
        if !seen.insert(binary.as_str()) {
            return Err(Error::ValidationError(format!(
                "binary '{}' is listed more than once",
                binary
            )));
        }
    }
    Ok(())
}

/// Named generators. Iteration is always in name order.
#[derive(Clone, Default)]
pub struct Registry {
    generators: BTreeMap<String, GeneratorFn>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every generator craft ships with.
    pub fn builtin() -> Self {
        let mut generators = BTreeMap::new();
        generators.insert("commands".to_string(), commands::generate as GeneratorFn);
        generators.insert("common".to_string(), common::generate as GeneratorFn);
        generators.insert("config".to_string(), config::generate as GeneratorFn);
        generators.insert("docker".to_string(), docker::generate as GeneratorFn);
        generators.insert("license".to_string(), license::generate as GeneratorFn);
        generators.insert("script".to_string(), script::generate as GeneratorFn);
        generators.insert("version".to_string(), version::generate as GeneratorFn);
        Self { generators }
    }

    /// Registers `generator` under `name`.
    ///
    /// # Errors
    /// * `Error::ValidationError` if the name is empty or already registered
    pub fn register<N: Into<String>>(&mut self, name: N, generator: GeneratorFn) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::ValidationError("generator name must not be empty".to_string()));
        }
        if self.generators.contains_key(&name) {
            return Err(Error::ValidationError(format!(
                "generator '{}' is already registered",
                name
            )));
        }
        self.generators.insert(name, generator);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<GeneratorFn> {
        self.generators.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Registered names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.generators.keys()).finish()
    }
}
