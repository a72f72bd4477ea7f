//! Precondition checks shared by every scan.
//!
//! All checks here are pure: they never touch the filesystem, so a scan can
//! reject bad arguments before its first directory read.

use std::path::Path;

use crate::error::{Error, Result};

/// Validate a scan root.
pub fn validate_root(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Err(Error::EmptyRoot);
    }

    Ok(())
}

/// Validate suffix tokens for extension filtering.
///
/// An empty collection is allowed and matches nothing. Tokens are plain
/// suffixes, so a leading dot is permitted.
pub fn validate_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<()> {
    for ext in extensions {
        if ext.as_ref().is_empty() {
            return Err(Error::InvalidExtension {
                extension: String::new(),
                message: "Extension must not be empty".to_string(),
            });
        }
    }

    Ok(())
}

/// Validate the key extension and paired extensions for pairing.
pub fn validate_pairing<S: AsRef<str>>(key_ext: &str, paired_exts: &[S]) -> Result<()> {
    validate_pair_token(key_ext)?;

    for ext in paired_exts {
        validate_pair_token(ext.as_ref())?;
    }

    if paired_exts.iter().any(|ext| ext.as_ref() == key_ext) {
        return Err(Error::KeyInPairedSet(key_ext.to_string()));
    }

    Ok(())
}

/// Pairing tokens are compared against the text after the last dot, so they
/// can be neither empty nor dotted at the front.
fn validate_pair_token(ext: &str) -> Result<()> {
    if ext.is_empty() {
        return Err(Error::InvalidExtension {
            extension: String::new(),
            message: "Extension must not be empty".to_string(),
        });
    }

    if ext.starts_with('.') {
        return Err(Error::InvalidExtension {
            extension: ext.to_string(),
            message: format!(
                "Give the extension without a leading dot (e.g. '{}')",
                ext.trim_start_matches('.')
            ),
        });
    }

    Ok(())
}
