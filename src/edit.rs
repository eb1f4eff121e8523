use crate::rule::{CompiledRule, FixRule};
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("invalid pattern /{pattern}/: {source}")]
pub struct PatternError {
    pub pattern: &'static str,
    #[source]
    pub source: regex::Error,
}

/// Run `rules` over `content` in order, each rule seeing the previous output.
///
/// Fails on the first pattern that does not compile; nothing is applied in
/// that case.
pub fn apply_rules(content: &str, rules: &[FixRule]) -> Result<String, PatternError> {
    let compiled = rules
        .iter()
        .map(|rule| {
            rule.compile().map_err(|source| PatternError {
                pattern: rule.pattern,
                source,
            })
        })
        .collect::<Result<Vec<CompiledRule>, _>>()?;

    Ok(apply_compiled(content, &compiled))
}

pub fn apply_compiled(content: &str, rules: &[CompiledRule]) -> String {
    let mut buffer = content.to_string();
    for rule in rules {
        buffer = rule.replace_all(&buffer).into_owned();
    }
    buffer
}

/// Atomic file write: tempfile + fsync + rename.
///
/// The temp file lives next to the target so the rename stays on one
/// filesystem. The target's permissions are carried over to the new file.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };

    let permissions = fs::metadata(path).map(|meta| meta.permissions()).ok();

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    if let Some(permissions) = permissions {
        temp.as_file().set_permissions(permissions)?;
    }

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
