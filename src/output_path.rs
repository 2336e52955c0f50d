use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inserted before the extension of generated files.
pub const OUTPUT_MARKER: &str = "selected";

/// Used when the input path has no extension.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Derive an output path that does not overwrite an existing file.
///
/// `doc.pdf` becomes `doc.selected.pdf`, or `doc.selected-1.pdf`,
/// `doc.selected-2.pdf`, ... if that name is taken. The existence check and
/// the later write are not atomic; a file created in between is overwritten.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(OsStr::new(""));
    let ext = input
        .extension()
        .unwrap_or(OsStr::new(DEFAULT_EXTENSION));

    let candidate = |suffix: &str| {
        let mut name = stem.to_os_string();
        name.push(format!(".{}{}.", OUTPUT_MARKER, suffix));
        name.push(ext);
        input.with_file_name(name)
    };

    let mut path = candidate("");
    let mut counter = 1u32;
    while path.exists() {
        debug!(path = %path.display(), "output path taken");
        path = candidate(&format!("-{}", counter));
        counter += 1;
    }
    path
}
