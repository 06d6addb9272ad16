//! craft generates Go project skeletons from layered templates.
//!
//! Named generators turn a [`project::ProjectSpec`] into render instructions.
//! Each instruction lists template fragments that are composed, in order, into
//! one namespace and rendered into the bytes of a single destination file. The
//! results of all selected generators are merged into one output map, which
//! the [`writer::Writer`] can persist.

/// Cooperative cancellation for generation runs
pub mod cancel;

/// Command-line interface module for the craft application
pub mod cli;

/// Project configuration files (craft.json, craft.yml, craft.yaml)
pub mod config;

pub mod constants;

/// Error types and handling for the craft application
pub mod error;

/// Built-in generators and the registry that selects them
pub mod generator;

pub mod logger;

/// Core generation orchestration
/// Runs generators, composes and renders their instructions, merges the output
pub mod processor;

pub mod project;

/// Template rendering engines
pub mod renderer;

/// Template sources: embedded, on-disk and in-memory
pub mod store;

/// Fragment composition and namespace validation
pub mod template;

/// Persistence of generated files with rollback
pub mod writer;

use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::generator::Registry;
use crate::processor::{GeneratedFiles, Processor};
use crate::project::ProjectSpec;
use crate::renderer::MiniJinjaRenderer;
use crate::store::EmbeddedStore;

/// Runs the named built-in generators with the bundled templates.
///
/// # Arguments
/// * `cancel` - Token polled between generators and renders
/// * `spec` - Project description
/// * `generators` - Names of the generators to run
///
/// # Returns
/// * `Result<GeneratedFiles>` - Every generated destination with its content
pub fn generate<S: AsRef<str>>(
    cancel: &CancellationToken,
    spec: &ProjectSpec,
    generators: &[S],
) -> Result<GeneratedFiles> {
    let registry = Registry::builtin();
    let store = EmbeddedStore::new();
    let renderer = MiniJinjaRenderer::new();

    Processor::new(&registry, &store, &renderer).generate(cancel, spec, generators)
}
