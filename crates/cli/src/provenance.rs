use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to a batch artifact.
pub struct Payload {
    pub params: Value,
    /// Further files produced by the same invocation.
    pub siblings: Vec<PathBuf>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            siblings: Vec::new(),
        }
    }

    pub fn with_sibling(mut self, path: impl Into<PathBuf>) -> Self {
        self.siblings.push(path.into());
        self
    }
}

/// Common header of every provenance document: code and library revision.
pub fn header() -> Value {
    json!({
        "code_rev": current_git_rev(),
        "evasion_version": evasion::VERSION,
    })
}

/// Write `<artifact>.provenance.json` with the header, callsite, params, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let outputs: Vec<String> = std::iter::once(artifact)
        .chain(payload.siblings.iter().map(PathBuf::as_path))
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let mut doc = header();
    doc["callsite"] = json!({
        "file": callsite.file(),
        "line": callsite.line()
    });
    doc["params"] = payload.params;
    doc["outputs"] = json!(outputs);
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/runs/runs.csv");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/runs/runs.provenance.json"));
    }

    #[test]
    fn sidecar_lists_artifact_then_siblings() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("runs.csv");
        let summary = dir.path().join("summary.json");
        fs::write(&artifact, "run\n0\n").unwrap();
        let payload = Payload::new(json!({"n_sensors": 20})).with_sibling(&summary);
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["outputs"][1], summary.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["n_sensors"], 20);
        assert_eq!(parsed["evasion_version"], evasion::VERSION);
    }
}
