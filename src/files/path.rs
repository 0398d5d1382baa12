//! Request path to filesystem path translation.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// A request path mapped beneath the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Filesystem location beneath the root.
    pub path: PathBuf,
    /// The request path ended in `/`.
    pub trailing_slash: bool,
}

/// Map a request path onto `root`.
///
/// Query and fragment are ignored, the path is percent-decoded and then
/// normalized lexically: `.` segments are dropped and `..` pops the previous
/// segment but never climbs above the root.
pub fn resolve(root: &Path, request_path: &str) -> ResolvedPath {
    let path = request_path
        .split_once('?')
        .map_or(request_path, |(path, _)| path);
    let path = path.split_once('#').map_or(path, |(path, _)| path);
    let trailing_slash = path.trim_end().ends_with('/');

    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            // A decoded segment may still smuggle a separator (`%5C` on Windows).
            s if s.contains(std::path::MAIN_SEPARATOR) => {}
            s => segments.push(s),
        }
    }

    let mut resolved = root.to_path_buf();
    resolved.extend(segments);

    ResolvedPath {
        path: resolved,
        trailing_slash,
    }
}
