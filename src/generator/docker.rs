//! Dockerfiles and local docker-compose stacks.

use serde::Serialize;

use crate::error::Result;
use crate::generator::{render_spec, unique_binaries, Mapping, RenderInstruction};
use crate::project::ProjectSpec;

pub(crate) const DOCKERFILE: &str = "docker/dockerfile.tmpl";

const FILES: [(&str, &str); 2] = [
    ("docker/README.md", "docker/readme.md.tmpl"),
    ("docker/docker-compose.yml", "docker/docker-compose.yml.tmpl"),
];

/// Standalone stacks, each at `docker/<service>/docker-compose.yml`.
const SERVICES: [&str; 8] =
    ["postgres", "mysql", "mariadb", "redis", "rabbitmq", "prometheus", "grafana", "jaeger"];

#[derive(Debug, Serialize)]
pub(crate) struct DockerfileData<'a> {
    #[serde(flatten)]
    pub project: &'a ProjectSpec,
    pub binary: &'a str,
}

/// # Errors
/// * `Error::ValidationError` if a binary is listed twice
pub fn generate(spec: &ProjectSpec) -> Result<Mapping> {
    unique_binaries(spec)?;

    let mut out = dockerfiles(spec, "docker");
    for (destination, template) in FILES {
        out.insert(destination.to_string(), render_spec(spec, template));
    }
    for service in SERVICES {
        out.insert(
            format!("docker/{}/docker-compose.yml", service),
            render_spec(spec, format!("docker/{}/docker-compose.yml.tmpl", service)),
        );
    }
    Ok(out)
}

/// One Dockerfile per binary under `dir`: `<dir>/Dockerfile` when the project
/// has a single binary, `<dir>/<binary>.Dockerfile` otherwise.
pub(crate) fn dockerfiles(spec: &ProjectSpec, dir: &str) -> Mapping {
    spec.binaries
        .iter()
        .map(|binary| {
            let destination = if spec.is_multi_binary() {
                format!("{}/{}.Dockerfile", dir, binary)
            } else {
                format!("{}/Dockerfile", dir)
            };
            let data = DockerfileData { project: spec, binary };
            (destination, RenderInstruction::new([DOCKERFILE], &data))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dockerfile_per_binary() {
        let mut spec = ProjectSpec::new("shop", "github.com/acme/shop");
        let single: Vec<String> = dockerfiles(&spec, "docker").into_keys().collect();
        assert_eq!(single, vec!["docker/Dockerfile"]);

        spec.binaries = vec!["api".to_string(), "worker".to_string()];
        let multi: Vec<String> = dockerfiles(&spec, "build/docker").into_keys().collect();
        assert_eq!(multi, vec!["build/docker/api.Dockerfile", "build/docker/worker.Dockerfile"]);
    }
}
