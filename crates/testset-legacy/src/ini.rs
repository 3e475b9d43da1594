//! Reader for the INI `config` files of legacy questions.
//!
//! Supports the subset legacy trees use:
//! - `[section]` headers; repeated headers merge into one section
//! - `key = value` and `key: value`, split at the first delimiter
//! - keys are case-insensitive and stored lower-cased; values are trimmed
//! - full-line comments starting with `#` or `;`
//! - indented lines continue the previous value, joined with a newline

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::ConvertError;

/// Syntax error at a 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSyntaxError {
    pub line: usize,
    pub reason: String,
}

/// Parsed INI document, sections and keys in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl Ini {
    pub fn parse(text: &str) -> Result<Self, IniSyntaxError> {
        let mut sections: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        let mut section: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = line.len() != trimmed.len();
            if indented
                && let (Some(name), Some(key)) = (&section, &last_key)
                && let Some(value) = sections.get_mut(name).and_then(|keys| keys.get_mut(key))
            {
                value.push('\n');
                value.push_str(trimmed);
                continue;
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| IniSyntaxError {
                    line: line_no,
                    reason: "unterminated section header".to_string(),
                })?;
                let name = name.trim().to_string();
                sections.entry(name.clone()).or_default();
                section = Some(name);
                last_key = None;
                continue;
            }

            let Some(name) = &section else {
                return Err(IniSyntaxError {
                    line: line_no,
                    reason: "key outside of any section".to_string(),
                });
            };
            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(IniSyntaxError {
                    line: line_no,
                    reason: format!("expected 'key = value', got '{trimmed}'"),
                });
            };
            let key = trimmed[..split].trim().to_lowercase();
            if key.is_empty() {
                return Err(IniSyntaxError {
                    line: line_no,
                    reason: "empty key".to_string(),
                });
            }
            let value = trimmed[split + 1..].trim().to_string();

            sections.entry(name.clone()).or_default().insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(Self { sections })
    }

    /// Read and parse the INI file at `path`.
    pub fn read(path: &Path) -> Result<Self, ConvertError> {
        let text = fs::read_to_string(path).map_err(|error| ConvertError::from_read(path, error))?;
        Self::parse(&text).map_err(|error| ConvertError::Ini {
            path: path.to_path_buf(),
            line: error.line,
            reason: error.reason,
        })
    }

    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Value of `key` in `section`. Key lookup is case-insensitive.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(&key.to_lowercase())
            .map(String::as_str)
    }
}
