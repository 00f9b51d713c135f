//! Output file name templating

use std::path::{Path, PathBuf};

/// Pattern used when the configured one is blank
pub const DEFAULT_FILENAME_PATTERN: &str = "{base}_{batch}_{group}_{ts}.{ext}";

/// Values substituted into a filename pattern
#[derive(Debug, Clone, Copy)]
pub struct PathVars<'a> {
    pub base: &'a str,
    pub batch: &'a str,
    pub group: &'a str,
    pub ts: &'a str,
    pub ext: &'a str,
}

impl PathVars<'_> {
    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "base" => Some(self.base),
            "batch" => Some(self.batch),
            "group" => Some(if self.group.is_empty() { "all" } else { self.group }),
            "ts" => Some(self.ts),
            "ext" => Some(self.ext.trim_start_matches('.')),
            _ => None,
        }
    }
}

/// Substitute `{base} {batch} {group} {ts} {ext}` in `pattern`.
///
/// Any other brace sequence is copied through unchanged, and substituted
/// values are never re-scanned.
pub fn render_file_name(pattern: &str, vars: &PathVars<'_>) -> String {
    let pattern = match pattern.trim() {
        "" => DEFAULT_FILENAME_PATTERN,
        p => p,
    };

    let mut out = String::with_capacity(pattern.len() + 32);
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after
            .find('}')
            .and_then(|close| vars.lookup(&after[..close]).map(|v| (close, v)))
        {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            },
            None => {
                out.push('{');
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

/// Render the pattern and place the file inside `folder`
pub fn render_path(folder: &Path, pattern: &str, vars: &PathVars<'_>) -> PathBuf {
    folder.join(render_file_name(pattern, vars))
}
