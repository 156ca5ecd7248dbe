//! GitHub Actions runner integration: release file selection and step outputs.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;

use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;
use tracing::debug;

use crate::error::ActionError;

/// Compile a release file pattern. `*` does not cross directory separators;
/// use `**` for that.
pub fn release_file_matcher(pattern: &str) -> Result<GlobMatcher, ActionError> {
    let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
    Ok(glob.compile_matcher())
}

/// Changed files that match the release file pattern, in input order.
pub fn filter_release_files(
    pattern: &str,
    changed_files: &[String],
) -> Result<Vec<String>, ActionError> {
    let matcher = release_file_matcher(pattern)?;
    let files: Vec<String> = changed_files
        .iter()
        .filter(|f| matcher.is_match(f.as_str()))
        .cloned()
        .collect();

    debug!(pattern, matched = files.len(), "Selected release files");
    Ok(files)
}

/// Set a step output to the JSON encoding of `value`.
///
/// Appends to the file named by `GITHUB_OUTPUT`; falls back to the legacy
/// `::set-output` workflow command when that variable is unset.
pub fn set_output<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<(), ActionError> {
    let json = serde_json::to_string(value).map_err(|source| ActionError::Serialize {
        name: name.to_string(),
        source,
    })?;

    match env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(ActionError::WriteFailed)?;
            writeln!(file, "{}={}", name, json).map_err(ActionError::WriteFailed)?;
        }
        None => println!("::set-output name={}::{}", name, json),
    }

    Ok(())
}
