//! Output helpers: JSON listings and saving export artifacts.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{ConsoleError, Result};

/// Writes a value to `out` as pretty-printed JSON followed by a newline.
pub fn print_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|e| ConsoleError::Export(format!("json: {e}")))?;
    writeln!(out)?;
    Ok(())
}

/// Writes an export artifact as `dir/file_name`, replacing any previous
/// file of that name. Creates `dir` if needed.
pub fn save_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Artifact saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_print_json_writes_pretty_document() {
        let mut out = Vec::new();
        print_json(&mut out, &serde_json::json!([{ "name": "MMR", "totalDoses": 40 }])).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n]\n"), "{text}");
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back[0]["name"], "MMR");
    }

    #[test]
    fn test_save_artifact_creates_dir_and_file() {
        let dir = temp_dir("vax_console_test_artifacts");
        let _ = fs::remove_dir_all(&dir);

        let path = save_artifact(&dir, "vaccination_report.csv", b"a,b\n").unwrap();

        assert_eq!(path, dir.join("vaccination_report.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_artifact_overwrites() {
        let dir = temp_dir("vax_console_test_overwrite");
        save_artifact(&dir, "r.csv", b"first").unwrap();
        let path = save_artifact(&dir, "r.csv", b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        fs::remove_dir_all(&dir).unwrap();
    }
}
