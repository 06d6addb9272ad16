//! Command-line interface implementation for craft.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::ProjectConfig;

/// Command-line arguments structure for craft.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "craft: scaffolding for Go services and CLIs",
    long_about = None
)]
pub struct Args {
    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Go module path, e.g. github.com/acme/shop
    #[arg(short, long)]
    pub module: Option<String>,

    /// Binaries to generate commands for (defaults to the project name)
    #[arg(short, long, value_delimiter = ',')]
    pub binaries: Option<Vec<String>>,

    /// Features listed in the generated README
    #[arg(long = "include", value_delimiter = ',')]
    pub includes: Option<Vec<String>>,

    /// License: mit, apache-2.0, agpl-3.0, bsd-3-clause, gpl-3.0, mpl-2.0
    #[arg(short, long)]
    pub license: Option<String>,

    /// Go version written to go.mod and the Dockerfiles
    #[arg(long = "go")]
    pub go_version: Option<String>,

    /// Author name for copyright notices
    #[arg(long)]
    pub author: Option<String>,

    /// One-line project description
    #[arg(long)]
    pub description: Option<String>,

    /// Directories the generated app searches for its config file
    #[arg(long, value_delimiter = ',')]
    pub config_dirs: Option<Vec<String>>,

    /// Name of the generated app's config file
    #[arg(long)]
    pub config_file: Option<String>,

    /// Format of the generated app's config file
    #[arg(long)]
    pub config_format: Option<String>,

    /// Environment variable prefix of the generated app
    #[arg(long)]
    pub env_prefix: Option<String>,

    /// CLI framework: cobra or urfave
    #[arg(long = "cli")]
    pub cli_framework: Option<String>,

    /// Copyright year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Generators to run (defaults to all of them)
    #[arg(short, long = "generator", value_delimiter = ',')]
    pub generators: Vec<String>,

    /// Directory where the generated project will be created (defaults to the name)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Read templates from this directory instead of the bundled ones
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Project configuration file (defaults to craft.json/craft.yml/craft.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write into an existing output directory
    #[arg(short, long)]
    pub force: bool,

    /// Print the files that would be generated without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// List the available generators and exit
    #[arg(long)]
    pub list: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Project values given on the command line.
    pub fn project_config(&self) -> ProjectConfig {
        ProjectConfig {
            project_name: self.name.clone(),
            module_prefix: self.module.clone(),
            binaries: self.binaries.clone(),
            cli_framework: self.cli_framework.clone(),
            license: self.license.clone(),
            go_version: self.go_version.clone(),
            author: self.author.clone(),
            config_dirs: self.config_dirs.clone(),
            config_file: self.config_file.clone(),
            config_format: self.config_format.clone(),
            env_prefix: self.env_prefix.clone(),
            includes: self.includes.clone(),
            description: self.description.clone(),
            year: self.year,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
