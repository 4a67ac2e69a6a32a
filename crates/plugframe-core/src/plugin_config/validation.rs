//! Syntactic validation rules shared by the configuration types.
//!
//! None of these functions touch the filesystem: a path is judged by its shape
//! only, since the plugin module may live on another machine or not have been
//! deployed yet when the configuration is checked.
use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

static INSTANCE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("instance name pattern is valid")
});

/// Checks that `path` can name a plugin module file.
///
/// The path must be non-empty, contain no NUL bytes, not end in a separator,
/// and end in a real file name (not `.` or `..`).
pub fn validate_file_path<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    let text = path.to_string_lossy();

    if text.is_empty() || text.contains('\0') {
        return false;
    }

    // Path::components() drops a trailing ".", so look at the raw text
    let file_name = text
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or_default();
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return false;
    }

    matches!(path.components().next_back(), Some(Component::Normal(_)))
}

/// Checks that `name` is a valid instance name: an ASCII letter followed by
/// ASCII letters, digits or underscores. Names are case-sensitive.
pub fn validate_instance_name(name: &str) -> bool {
    INSTANCE_NAME_RE.is_match(name)
}

/// Strategy used by [`PluginConfig`](crate::plugin_config::PluginConfig) to
/// judge its file path.
pub trait FilePathValidator {
    fn validate_file_path(&self, path: &Path) -> bool;
}

/// The default strategy, backed by [`validate_file_path`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFilePathValidator;

impl FilePathValidator for DefaultFilePathValidator {
    fn validate_file_path(&self, path: &Path) -> bool {
        validate_file_path(path)
    }
}

impl<F> FilePathValidator for F
where
    F: Fn(&Path) -> bool,
{
    fn validate_file_path(&self, path: &Path) -> bool {
        self(path)
    }
}
