//! Generation orchestration.
//! Runs the selected generators, composes and renders every instruction they
//! return, and merges the results into one output map.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Component, Path};

use log::{debug, info};

use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::generator::{RenderInstruction, Registry};
use crate::project::ProjectSpec;
use crate::renderer::TemplateRenderer;
use crate::store::TemplateStore;
use crate::template::TemplateComposer;

/// Destination path to rendered content, ordered by path.
pub type GeneratedFiles = BTreeMap<String, Vec<u8>>;

/// Main orchestrator for project generation.
///
/// Holds shared references only; one processor can serve any number of
/// `generate` calls.
pub struct Processor<'a> {
    /// Generators that can be selected by name.
    registry: &'a Registry,
    /// Loads and validates the fragments of each instruction.
    composer: TemplateComposer<'a>,
    /// Executes composed template sets.
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Processor<'a> {
    pub fn new(
        registry: &'a Registry,
        store: &'a dyn TemplateStore,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self { registry, composer: TemplateComposer::new(store), renderer }
    }

    /// Runs the named generators against `spec` and renders everything they ask for.
    ///
    /// # Arguments
    /// * `cancel` - Polled before each generator and before each render
    /// * `spec` - Project description handed to every generator
    /// * `generators` - Names of the generators to run; duplicates are ignored
    ///
    /// # Returns
    /// * `Result<GeneratedFiles>` - Every destination with its rendered bytes
    ///
    /// # Errors
    /// * `Error::UnknownGeneratorError` if a name is not registered (nothing runs)
    /// * `Error::CancelledError` if the token is cancelled during the run
    /// * `Error::InvalidDestinationError` if a generator returns a bad path
    /// * `Error::DestinationCollisionError` if two generators target one path
    /// * `Error::GenerationError` wrapping a composition or rendering failure
    /// * Any error a generator itself returns, unchanged
    pub fn generate<S: AsRef<str>>(
        &self,
        cancel: &CancellationToken,
        spec: &ProjectSpec,
        generators: &[S],
    ) -> Result<GeneratedFiles> {
        let selected: BTreeSet<&str> = generators.iter().map(AsRef::as_ref).collect();
        if let Some(unknown) = selected.iter().find(|name| !self.registry.contains(name)) {
            return Err(Error::UnknownGeneratorError { name: unknown.to_string() });
        }

        let mut files = GeneratedFiles::new();
        let mut owners: HashMap<String, &str> = HashMap::new();

        for name in selected {
            cancel.check()?;

            let generator = self
                .registry
                .get(name)
                .ok_or_else(|| Error::UnknownGeneratorError { name: name.to_string() })?;

            info!("Running generator '{}'.", name);
            let mapping = generator(spec)?;
            debug!("Generator '{}' returned {} destination(s).", name, mapping.len());

            for (destination, instruction) in mapping {
                if !validate_destination(&destination) {
                    return Err(Error::InvalidDestinationError {
                        generator: name.to_string(),
                        destination,
                    });
                }
                if let Some(first) = owners.get(&destination) {
                    return Err(Error::DestinationCollisionError {
                        destination,
                        first: first.to_string(),
                        second: name.to_string(),
                    });
                }

                cancel.check()?;

                debug!("Rendering '{}' from {:?}.", destination, instruction.templates());
                let content = self.render(&destination, &instruction).map_err(|e| {
                    Error::GenerationError {
                        generator: name.to_string(),
                        destination: destination.clone(),
                        source: Box::new(e),
                    }
                })?;

                owners.insert(destination.clone(), name);
                files.insert(destination, content);
            }
        }

        info!("Generated {} file(s).", files.len());
        Ok(files)
    }

    fn render(&self, destination: &str, instruction: &RenderInstruction) -> Result<Vec<u8>> {
        let set = self.composer.compose(destination, instruction.templates())?;
        self.renderer.render(&set, instruction.data(), instruction.entry_point())
    }
}

/// Checks that a destination stays inside the output root.
///
/// A valid destination is a non-empty relative path with forward slashes and
/// no empty, `.` or `..` segments.
pub fn validate_destination(destination: &str) -> bool {
    if destination.is_empty() || destination.contains('\\') {
        return false;
    }
    if destination.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return false;
    }
    Path::new(destination).components().all(|c| matches!(c, Component::Normal(_)))
}
