//! Filename validation policy.

use serde::{Deserialize, Serialize};

use crate::NameError;

/// Device names that are never valid as a filename component, matched
/// case-insensitively either as the whole name or followed by a dot.
pub const RESERVED_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Default restricted character set.
pub const DEFAULT_RESTRICTED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Settings-driven filename policy.
///
/// The restricted character set comes from live settings; callers take a
/// snapshot of the policy per validation call so a batch sees one
/// consistent value. The reserved device name list is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingPolicy {
    /// Characters rejected anywhere in a filename.
    pub restricted_chars: Vec<char>,
    /// Maximum filename length in characters.
    pub max_length: usize,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            restricted_chars: DEFAULT_RESTRICTED_CHARS.to_vec(),
            max_length: 255,
        }
    }
}

impl NamingPolicy {
    /// Validate a candidate filename.
    ///
    /// Runs before any I/O; the filesystem still enforces its own rules
    /// at the call site.
    pub fn is_valid_for_filename(&self, name: &str) -> Result<(), NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name == "." || name == ".." {
            return Err(NameError::DotComponent);
        }
        let length = name.chars().count();
        if length > self.max_length {
            return Err(NameError::TooLong {
                length,
                max: self.max_length,
            });
        }
        if let Some(c) = name
            .chars()
            .find(|c| c.is_control() || self.restricted_chars.contains(c))
        {
            return Err(NameError::RestrictedCharacter(c));
        }
        if let Some(reserved) = reserved_component(name) {
            return Err(NameError::ReservedName(reserved.to_string()));
        }
        if name.ends_with(' ') || name.ends_with('.') {
            return Err(NameError::TrailingSpaceOrDot);
        }
        Ok(())
    }
}

/// Return the reserved device name a filename collides with, if any.
fn reserved_component(name: &str) -> Option<&'static str> {
    let base = name.split('.').next().unwrap_or(name);
    RESERVED_DEVICE_NAMES
        .iter()
        .find(|reserved| base.eq_ignore_ascii_case(reserved))
        .copied()
}
