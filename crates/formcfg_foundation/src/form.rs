//! Form references.
//!
//! A form is addressed by the plugin that defines it plus a hexadecimal
//! form ID local to that plugin, written `Plugin.esp|1A2B` (an optional
//! `0x` prefix on the ID is accepted).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// A plugin-qualified form ID.
///
/// Plugin names compare case-insensitively, as the host's file system does.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormRef {
    plugin: String,
    id: u32,
}

impl FormRef {
    /// Creates a form reference.
    #[must_use]
    pub fn new(plugin: impl Into<String>, id: u32) -> Self {
        Self {
            plugin: plugin.into(),
            id,
        }
    }

    /// Returns the defining plugin's file name.
    #[must_use]
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Returns the plugin-local form ID.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }
}

/// Strips an optional `0x`/`0X` prefix from a hex form ID.
#[must_use]
pub fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Returns true if `text` is a non-empty run of hex digits, optionally `0x`-prefixed.
#[must_use]
pub fn is_hex_string(text: &str) -> bool {
    let digits = strip_hex_prefix(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl FromStr for FormRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::new(ErrorKind::UnknownForm(format!("malformed form reference: {s}")));
        let (plugin, id) = s.rsplit_once('|').ok_or_else(invalid)?;
        if plugin.is_empty() || !is_hex_string(id) {
            return Err(invalid());
        }
        let id = u32::from_str_radix(strip_hex_prefix(id), 16).map_err(|_| invalid())?;
        Ok(Self::new(plugin, id))
    }
}

impl PartialEq for FormRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.plugin.eq_ignore_ascii_case(&other.plugin)
    }
}

impl Eq for FormRef {}

impl Hash for FormRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.plugin.to_ascii_lowercase().hash(state);
        self.id.hash(state);
    }
}

impl PartialOrd for FormRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FormRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.plugin
            .to_ascii_lowercase()
            .cmp(&other.plugin.to_ascii_lowercase())
            .then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for FormRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{:X}", self.plugin, self.id)
    }
}
