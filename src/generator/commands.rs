//! CLI command sources (`root`, `version`, `server`) for every binary.

use cruet::Inflector;
use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::generator::{unique_binaries, Mapping, RenderInstruction};
use crate::project::{CliFramework, ProjectSpec};

const COMMANDS: [&str; 3] = ["root", "version", "server"];
const SKELETON: &str = "internal/commands/base.go.tmpl";
const MAIN: &str = "internal/commands/main.go.tmpl";

/// Payload for command templates: the project spec plus the binary being emitted.
#[derive(Debug, Serialize)]
struct CommandData<'a> {
    #[serde(flatten)]
    project: &'a ProjectSpec,
    binary: &'a str,
    package_name: String,
    multi_binary: bool,
}

/// Emits the command files of each binary.
///
/// A single binary gets a flat `internal/commands/<cmd>.go` layout in package
/// `commands`. Several binaries each get `internal/commands/<binary>/<cmd>.go`
/// and an entry file `cmd/<binary>/main.go`.
///
/// # Errors
/// * `Error::UnsupportedFrameworkError` if the CLI framework is not supported
/// * `Error::ValidationError` if a binary is listed twice
pub fn generate(spec: &ProjectSpec) -> Result<Mapping> {
    let framework: CliFramework = spec.cli_framework.parse()?;
    unique_binaries(spec)?;
    let mut out = Mapping::new();

    if let [binary] = spec.binaries.as_slice() {
        let data = CommandData {
            project: spec,
            binary,
            package_name: "commands".to_string(),
            multi_binary: false,
        };
        for command in COMMANDS {
            out.insert(
                format!("internal/commands/{}.go", command),
                RenderInstruction::new(fragments(framework, command), &data),
            );
        }
        return Ok(out);
    }

    for binary in &spec.binaries {
        let data = CommandData {
            project: spec,
            binary,
            package_name: package_name(binary),
            multi_binary: true,
        };
        for command in COMMANDS {
            out.insert(
                format!("internal/commands/{}/{}.go", binary, command),
                RenderInstruction::new(fragments(framework, command), &data),
            );
        }
        out.insert(
            format!("cmd/{}/main.go", binary),
            RenderInstruction::new([MAIN], &data).with_entry_point("main"),
        );
    }

    for (destination, instruction) in &out {
        debug!("Command file {} from {:?}", destination, instruction.templates());
    }

    Ok(out)
}

/// Shared skeleton followed by the framework-specific body of `command`.
fn fragments(framework: CliFramework, command: &str) -> [String; 2] {
    [SKELETON.to_string(), format!("internal/commands/{}_{}.go.tmpl", framework, command)]
}

/// Go package name for a binary: kebab-cased, with the dashes removed.
pub fn package_name(binary: &str) -> String {
    binary.to_kebab_case().replace('-', "")
}
