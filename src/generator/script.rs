//! Build scripts, CI pipelines and deployment manifests.

use serde::Serialize;

use crate::error::Result;
use crate::generator::{docker, render_spec, unique_binaries, Mapping, RenderInstruction};
use crate::project::ProjectSpec;

const FILES: [(&str, &str); 34] = [
    ("scripts/README.md", "scripts/readme.md.tmpl"),
    ("scripts/lib/common.sh", "scripts/lib/common.sh.tmpl"),
    ("scripts/lib/logger.sh", "scripts/lib/logger.sh.tmpl"),
    ("scripts/lib/docker.sh", "scripts/lib/docker.sh.tmpl"),
    ("scripts/lib/git.sh", "scripts/lib/git.sh.tmpl"),
    ("scripts/lib/version.sh", "scripts/lib/version.sh.tmpl"),
    ("scripts/tasks/build.sh", "scripts/tasks/build.sh.tmpl"),
    ("scripts/tasks/test.sh", "scripts/tasks/test.sh.tmpl"),
    ("scripts/tasks/lint.sh", "scripts/tasks/lint.sh.tmpl"),
    ("scripts/tasks/docker.sh", "scripts/tasks/docker.sh.tmpl"),
    ("scripts/tasks/release.sh", "scripts/tasks/release.sh.tmpl"),
    ("scripts/tasks/proto.sh", "scripts/tasks/proto.sh.tmpl"),
    ("scripts/tasks/dependencies.sh", "scripts/tasks/dependencies.sh.tmpl"),
    ("scripts/tasks/package.sh", "scripts/tasks/package.sh.tmpl"),
    ("scripts/tasks/setup-dev.sh", "scripts/tasks/setup-dev.sh.tmpl"),
    ("scripts/tasks/health-check.sh", "scripts/tasks/health-check.sh.tmpl"),
    ("scripts/build", "scripts/build.tmpl"),
    ("scripts/test", "scripts/test.tmpl"),
    ("scripts/ci", "scripts/ci.tmpl"),
    ("scripts/dev", "scripts/dev.tmpl"),
    ("Makefile", "makefile.tmpl"),
    ("Taskfile.yml", "taskfile.tmpl"),
    (".github/workflows/ci.yml", "github/ci.yml.tmpl"),
    (".gitlab-ci.yml", "gitlab/ci.yml.tmpl"),
    (".gitlab/ci/test.yml", "gitlab/test.yml.tmpl"),
    (".gitlab/ci/build.yml", "gitlab/build.yml.tmpl"),
    (".gitlab/ci/release.yml", "gitlab/release.yml.tmpl"),
    ("build/k8s/kustomization.yml", "build/k8s/kustomization.yml.tmpl"),
    ("build/k8s/base/deployment.yml", "build/k8s/deployment.yml.tmpl"),
    ("build/k8s/base/service.yml", "build/k8s/service.yml.tmpl"),
    ("build/k8s/base/namespace.yml", "build/k8s/namespace.yml.tmpl"),
    ("build/k8s/base/configmap.yml", "build/k8s/configmap.yml.tmpl"),
    ("build/k8s/base/secret.yml", "build/k8s/secret.yml.tmpl"),
    ("build/k8s/base/ingress.yml", "build/k8s/ingress.yml.tmpl"),
];

const OVERLAY: &str = "build/k8s/overlay.yml.tmpl";

/// Kustomize overlays with their replica count per deployment.
const OVERLAYS: [(&str, u32); 3] = [("dev", 1), ("staging", 2), ("prod", 3)];

#[derive(Debug, Serialize)]
struct OverlayData<'a> {
    #[serde(flatten)]
    project: &'a ProjectSpec,
    environment: &'a str,
    replicas: u32,
}

/// The build Dockerfiles share their template with the docker generator but
/// live under `build/docker`, so running both never collides.
///
/// # Errors
/// * `Error::ValidationError` if a binary is listed twice
pub fn generate(spec: &ProjectSpec) -> Result<Mapping> {
    unique_binaries(spec)?;

    let mut out = docker::dockerfiles(spec, "build/docker");
    for (destination, template) in FILES {
        out.insert(destination.to_string(), render_spec(spec, template));
    }
    for (environment, replicas) in OVERLAYS {
        let data = OverlayData { project: spec, environment, replicas };
        out.insert(
            format!("build/k8s/overlays/{}/kustomization.yml", environment),
            RenderInstruction::new([OVERLAY], &data),
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlays_carry_environment() {
        let spec = ProjectSpec::new("shop", "github.com/acme/shop");
        let out = generate(&spec).unwrap();

        let prod = &out["build/k8s/overlays/prod/kustomization.yml"];
        assert_eq!(prod.templates(), [OVERLAY.to_string()]);
        assert_eq!(prod.data().get_attr("environment").unwrap().as_str(), Some("prod"));
        assert_eq!(prod.data().get_attr("project_name").unwrap().as_str(), Some("shop"));
    }
}
