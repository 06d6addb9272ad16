//! craft's main application entry point.
//! Parses arguments, resolves the project spec, runs the generators and
//! writes the result.

use chrono::Datelike;
use log::{info, warn};

use craft::{
    cancel::CancellationToken,
    cli::{get_args, Args},
    config::{load_config, parse_config, ProjectConfig},
    constants::CONFIG_FILES,
    error::{default_error_handler, Result},
    generator::Registry,
    logger::init_logger,
    processor::Processor,
    renderer::MiniJinjaRenderer,
    store::{DirectoryStore, EmbeddedStore, TemplateStore},
    writer::{ensure_output_dir, Writer},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Reads the project file given with `--config`, or the first one found in
/// the current directory.
fn file_config(args: &Args) -> Result<ProjectConfig> {
    let content = match &args.config {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => load_config(".", &CONFIG_FILES)?,
    };

    match content {
        Some(content) => parse_config(&content),
        None => Ok(ProjectConfig::default()),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Lists generators and stops, if asked to
/// 2. Merges command-line values over the project file
/// 3. Selects the template store and installs the Ctrl-C handler
/// 4. Runs the generators
/// 5. Prints (dry run) or writes the generated files
fn run(args: Args) -> Result<()> {
    let registry = Registry::builtin();

    if args.list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let current_year = chrono::Local::now().year();
    let spec = file_config(&args)?.merge(args.project_config()).into_spec(current_year)?;
    info!("Generating '{}' ({})", spec.project_name, spec.module_prefix);

    let store: Box<dyn TemplateStore> = match &args.templates {
        Some(dir) => {
            let store = DirectoryStore::new(dir)?;
            info!("Using templates from {}", store);
            Box::new(store)
        }
        None => Box::new(EmbeddedStore::new()),
    };
    let renderer = MiniJinjaRenderer::new();

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Failed to install the Ctrl-C handler: {}", e);
    }

    let generators: Vec<String> = if args.generators.is_empty() {
        registry.names().map(String::from).collect()
    } else {
        args.generators.clone()
    };

    let processor = Processor::new(&registry, &*store, &renderer);
    let files = processor.generate(&cancel, &spec, &generators)?;

    if args.dry_run {
        for destination in files.keys() {
            println!("{}", destination);
        }
        return Ok(());
    }

    let output_dir = args.output_dir.clone().unwrap_or_else(|| spec.project_name.clone().into());
    let output_root = ensure_output_dir(&output_dir, args.force)?;

    let mut writer = Writer::new(&output_root);
    writer.write_all(&files)?;

    println!(
        "Generated {} file(s) for '{}' in {}.",
        files.len(),
        spec.project_name,
        output_root.display()
    );
    Ok(())
}
