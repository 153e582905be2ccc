use anyhow::{Context, Result};
use serde::Serialize;
use starmap::stats::DiskStats;
use starmap::{DiskParams, Strategy};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// JSON summary of one generation run. Describes the disk, never the stars.
#[derive(Serialize)]
pub struct Summary {
    pub version: &'static str,
    pub code_rev: String,
    pub strategy: Strategy,
    pub seed: Option<u64>,
    pub params: DiskParams,
    pub stats: Option<DiskStats>,
    pub elapsed_ms: f64,
}

impl Summary {
    pub fn new(
        strategy: Strategy,
        seed: Option<u64>,
        params: DiskParams,
        stats: Option<DiskStats>,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            version: starmap::VERSION,
            code_rev: current_git_rev(),
            strategy,
            seed,
            params,
            stats,
            elapsed_ms,
        }
    }
}

/// Write `summary` as pretty JSON to `path`, creating parent dirs.
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &Summary) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating summary dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(summary)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path.to_path_buf())
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
    use serde_json::Value;
    use starmap::DiskGenerator;
    use tempfile::tempdir;

    fn sample_summary() -> Summary {
        let params = DiskParams {
            count: 50,
            ..DiskParams::default()
        };
        let pts = DiskGenerator::seeded(params.clone(), 5)
            .unwrap()
            .large()
            .unwrap();
        let stats = DiskStats::of(&pts).map(|s| s.with_pair_scan(&pts));
        Summary::new(Strategy::Large, Some(5), params, stats, 1.5)
    }

    #[test]
    fn summary_json_shape() {
        let v = serde_json::to_value(sample_summary()).unwrap();
        assert_eq!(v["strategy"], "large");
        assert_eq!(v["seed"], 5);
        assert_eq!(v["params"]["count"], 50);
        assert_eq!(v["params"]["max_attempts"], Value::Null);
        assert_eq!(v["stats"]["count"], 50);
        assert_eq!(v["stats"]["std_dev"].as_array().unwrap().len(), 3);
        assert!(v["stats"]["min_pair_distance"].as_f64().unwrap() >= 0.5);
    }

    #[test]
    fn write_summary_creates_nested_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runs").join("disk.json");
        let written = write_summary(&path, &sample_summary()).unwrap();
        assert_eq!(written, path);
        let parsed: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed["version"], starmap::VERSION);
    }
}
