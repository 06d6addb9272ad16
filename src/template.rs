//! Template composition.
//!
//! A render instruction lists fragments in order. The composer loads them from
//! a [`TemplateStore`] into one fresh minijinja environment and checks that the
//! sequence forms a coherent namespace:
//!
//! - a fragment may only reference (`extends`, `include`, `import`, `from`)
//!   fragments composed before it;
//! - a block already declared by an earlier fragment may only be redeclared by
//!   a fragment that extends it, directly or transitively;
//! - the last fragment is the root template of the set.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use cruet::Inflector;
use log::debug;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use regex::Regex;

use crate::constants::TEMPLATE_ROOT;
use crate::error::{Error, Result};
use crate::store::TemplateStore;

static RAW_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\}").expect("valid regex")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{#.*?#\}").expect("valid regex"));

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{%-?\s*(extends|include|import|from)\s+["']([^"']+)["']"#)
        .expect("valid regex")
});

static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%-?\s*block\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex"));

/// Static structure of one fragment: what it extends, references and declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: String,
    pub parent: Option<String>,
    pub references: Vec<String>,
    pub blocks: Vec<String>,
}

impl Fragment {
    /// Scans fragment source for references and block declarations.
    /// Raw sections and comments are ignored.
    pub fn outline(id: &str, source: &str) -> Self {
        let without_raw = RAW_SECTION.replace_all(source, "");
        let code = COMMENT.replace_all(&without_raw, "");

        let mut parent = None;
        let mut references = Vec::new();
        for capture in REFERENCE.captures_iter(&code) {
            let target = capture[2].to_string();
            if &capture[1] == "extends" && parent.is_none() {
                parent = Some(target.clone());
            }
            if !references.contains(&target) {
                references.push(target);
            }
        }

        let blocks = BLOCK.captures_iter(&code).map(|c| c[1].to_string()).collect();

        Self { id: id.to_string(), parent, references, blocks }
    }
}

/// Executable namespace composed from an ordered list of fragments.
///
/// Owns its environment; nothing is shared with other sets.
pub struct CompiledTemplateSet {
    name: String,
    env: Environment<'static>,
    fragments: Vec<Fragment>,
}

impl CompiledTemplateSet {
    /// Name the set was composed for (the destination path, in practice).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the root template, the last composed fragment.
    pub fn root(&self) -> &str {
        // compose() never builds an empty set
        self.fragments.last().map(|f| f.id.as_str()).unwrap_or_default()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Last composed fragment declaring `block`, if any.
    pub fn block_owner(&self, block: &str) -> Option<&str> {
        self.fragments
            .iter()
            .rev()
            .find(|f| f.blocks.iter().any(|b| b == block))
            .map(|f| f.id.as_str())
    }

    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }
}

impl fmt::Debug for CompiledTemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplateSet")
            .field("name", &self.name)
            .field("fragments", &self.fragments)
            .finish_non_exhaustive()
    }
}

/// Builds [`CompiledTemplateSet`]s from fragments held by a store.
pub struct TemplateComposer<'a> {
    store: &'a dyn TemplateStore,
}

impl<'a> TemplateComposer<'a> {
    pub fn new(store: &'a dyn TemplateStore) -> Self {
        Self { store }
    }

    /// Composes `fragments`, in order, into one template set named `name`.
    ///
    /// # Arguments
    /// * `name` - Name of the set, used for diagnostics only
    /// * `fragments` - Fragment identifiers, relative to the template root
    ///
    /// # Returns
    /// * `Result<CompiledTemplateSet>` - Set ready to be rendered
    ///
    /// # Errors
    /// * `Error::EmptyTemplateSetError` if no fragment is given
    /// * `Error::TemplateLoadError` if a fragment does not resolve in the store
    /// * `Error::TemplateParseError` if a fragment has invalid syntax, is listed
    ///   twice, references a fragment not composed before it, or redeclares a
    ///   block it does not inherit
    pub fn compose<S: AsRef<str>>(&self, name: &str, fragments: &[S]) -> Result<CompiledTemplateSet> {
        if fragments.is_empty() {
            return Err(Error::EmptyTemplateSetError { name: name.to_string() });
        }

        let mut env = environment();
        let mut composed: Vec<Fragment> = Vec::with_capacity(fragments.len());

        for id in fragments.iter().map(AsRef::as_ref) {
            if composed.iter().any(|f| f.id == id) {
                return Err(parse_error(id, "fragment is listed more than once"));
            }

            let path = format!("{}/{}", TEMPLATE_ROOT, id);
            let source = self.store.read(&path)?;

            env.add_template_owned(id.to_string(), source.clone())
                .map_err(|e| parse_error(id, e.to_string()))?;

            let fragment = Fragment::outline(id, &source);
            check_references(&fragment, &composed)?;
            check_blocks(&fragment, &composed)?;

            debug!("Composed fragment '{}' into '{}'.", id, name);
            composed.push(fragment);
        }

        Ok(CompiledTemplateSet { name: name.to_string(), env, fragments: composed })
    }
}

fn parse_error<R: Into<String>>(fragment: &str, reason: R) -> Error {
    Error::TemplateParseError { fragment: fragment.to_string(), reason: reason.into() }
}

fn check_references(fragment: &Fragment, composed: &[Fragment]) -> Result<()> {
    for reference in &fragment.references {
        if !composed.iter().any(|f| &f.id == reference) {
            return Err(parse_error(
                &fragment.id,
                format!("references '{}' which is not composed before it", reference),
            ));
        }
    }
    Ok(())
}

fn check_blocks(fragment: &Fragment, composed: &[Fragment]) -> Result<()> {
    let mut seen = HashSet::new();
    for block in &fragment.blocks {
        if !seen.insert(block.as_str()) {
            return Err(parse_error(&fragment.id, format!("block '{}' is declared twice", block)));
        }

        let previous = composed.iter().rev().find(|f| f.blocks.contains(block));
        if let Some(previous) = previous {
            if !ancestors(fragment, composed).contains(&previous.id.as_str()) {
                return Err(parse_error(
                    &fragment.id,
                    format!(
                        "block '{}' is already declared by '{}', which this fragment does not extend",
                        block, previous.id
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Identifiers of the fragments `fragment` extends, nearest first.
fn ancestors<'c>(fragment: &Fragment, composed: &'c [Fragment]) -> Vec<&'c str> {
    let mut chain = Vec::new();
    let mut parent = fragment.parent.as_deref();
    while let Some(id) = parent {
        let Some(found) = composed.iter().find(|f| f.id == id) else {
            break;
        };
        if chain.contains(&found.id.as_str()) {
            break;
        }
        chain.push(found.id.as_str());
        parent = found.parent.as_deref();
    }
    chain
}

/// Environment every template set starts from.
fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);

    env.add_filter("kebab_case", |value: String| value.to_kebab_case());
    env.add_filter("snake_case", |value: String| value.to_snake_case());
    env.add_filter("pascal_case", |value: String| value.to_pascal_case());
    env.add_filter("camel_case", |value: String| value.to_camel_case());
    env.add_filter("screaming_snake_case", |value: String| value.to_screaming_snake_case());
    env.add_function("fail", fail);
    env
}

/// Lets a fragment abort rendering with its own message.
fn fail(message: String) -> std::result::Result<String, minijinja::Error> {
    Err(minijinja::Error::new(ErrorKind::InvalidOperation, message))
}
