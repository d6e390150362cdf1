//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Snapshot used across integration tests.
///
/// `root` has children `cs` and `math`. `ai` sits under `cs`. `cs` and `math`
/// are related in both directions.
pub const PROGRAMS_SNAPSHOT: &str = r#"{
  "scheme": { "id": "S1", "name": "Programs", "topConceptIds": ["root"] },
  "concepts": [
    { "id": "root", "label": "Academic Programs", "narrower": ["cs", "math"] },
    { "id": "cs", "label": "Computer Science", "broader": ["root"], "narrower": ["ai"], "related": ["math"] },
    { "id": "ai", "label": "Artificial Intelligence", "broader": ["cs"] },
    { "id": "math", "label": "Mathematics", "broader": ["root"], "related": ["cs"] }
  ]
}
"#;

/// Path of the compiled `taxon` binary
pub fn taxon_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_taxon"))
}

/// Write `content` to `public/taxonomy.json` under `dir`, the default location
pub fn write_default_snapshot(dir: &Path, content: &str) -> PathBuf {
    let public = dir.join("public");
    std::fs::create_dir_all(&public).expect("Failed to create public directory");
    let path = public.join("taxonomy.json");
    std::fs::write(&path, content).expect("Failed to write snapshot");
    path
}

/// Run the taxon binary in the specified directory
pub fn run_taxon_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(taxon_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("TAXON_ASCII", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute taxon binary")
}

/// Stdout of a command as a `String`
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
