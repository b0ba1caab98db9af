//! Environment template module
//!
//! Rewrites configured files in place, replacing `$NAME` and `${NAME}`
//! references with the values of process environment variables.
//! References to unknown variables are kept verbatim.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::logger;

/// Failure while rewriting a template file
#[derive(Debug)]
pub enum TemplateError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl TemplateError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read template file '{}': {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write template file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Expand every template file with the current process environment
///
/// Files are handled strictly in order and the first failure aborts the run;
/// files before it stay rewritten. Returns the number of files processed.
pub fn process_template_files(files: &[PathBuf]) -> Result<usize, TemplateError> {
    process_template_files_with(files, |name| std::env::var(name).ok())
}

/// Same as [`process_template_files`] with an explicit variable lookup
pub fn process_template_files_with<F>(files: &[PathBuf], lookup: F) -> Result<usize, TemplateError>
where
    F: Fn(&str) -> Option<String>,
{
    for path in files {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;

        let expanded = expand_env_vars(&content, &lookup);
        let changed = expanded != content;

        fs::write(path, expanded).map_err(|source| TemplateError::Write {
            path: path.clone(),
            source,
        })?;

        logger::log_template_processed(path, changed);
    }

    Ok(files.len())
}

/// Substitute `$NAME` / `${NAME}` references in a single pass
///
/// # Examples
/// ```
/// use spa_server::startup::templates::expand_env_vars;
///
/// let lookup = |name: &str| (name == "HOME").then(|| "/srv".to_string());
/// assert_eq!(expand_env_vars("$HOME/data", lookup), "/srv/data");
/// assert_eq!(expand_env_vars("${MISSING}/x", lookup), "${MISSING}/x");
/// ```
pub fn expand_env_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let Some((name, consumed)) = parse_reference(after) else {
            out.push('$');
            rest = after;
            continue;
        };

        match lookup(name) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[pos..=pos + consumed]),
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

/// Parse the reference following a `$`, returning the name and the bytes consumed
fn parse_reference(s: &str) -> Option<(&str, usize)> {
    if let Some(braced) = s.strip_prefix('{') {
        let end = braced.find('}')?;
        let name = &braced[..end];
        return (!name.is_empty() && name_len(name) == name.len()).then_some((name, end + 2));
    }

    let len = name_len(s);
    (len > 0).then(|| (&s[..len], len))
}

/// Length of the variable name at the start of `s`, zero if there is none
fn name_len(s: &str) -> usize {
    match s.chars().next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return 0,
    }

    s.char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map_or(s.len(), |(i, _)| i)
}
