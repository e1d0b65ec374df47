//! Unicode character name lookup for `\N{NAME}` escapes.

use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Resolves Unicode character names to characters.
pub trait UnicodeNames {
    /// Look up a name, ignoring case.
    fn lookup(&self, name: &str) -> Option<char>;
}

/// An in-memory name table, usually loaded from `UnicodeData.txt`.
#[derive(Debug, Default, Clone)]
pub struct UnicodeNameTable {
    names: HashMap<String, char>,
}

impl UnicodeNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, ch: char) {
        self.names.insert(name.to_ascii_uppercase(), ch);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parse the `CODE;NAME;...` lines of `UnicodeData.txt`.
    ///
    /// Range markers such as `<CJK Ideograph, First>` and `<control>` entries
    /// carry no usable name; controls fall back to their Unicode 1.0 name
    /// (field 10) when present.
    pub fn from_unicode_data(data: &str) -> Self {
        let mut table = Self::new();

        for line in data.lines() {
            let fields: Vec<&str> = line.split(';').collect();
            if fields.len() < 2 {
                continue;
            }
            let Some(ch) = u32::from_str_radix(fields[0].trim(), 16)
                .ok()
                .and_then(char::from_u32)
            else {
                continue;
            };

            let name = fields[1].trim();
            if !name.starts_with('<') {
                table.insert(name, ch);
            } else if let Some(old_name) = fields.get(10).map(|n| n.trim()) {
                if !old_name.is_empty() {
                    table.insert(old_name, ch);
                }
            }
        }

        log::debug!("Loaded {} Unicode character names", table.len());
        table
    }

    /// Load a `UnicodeData.txt` file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::from_unicode_data(&data))
    }
}

impl UnicodeNames for UnicodeNameTable {
    fn lookup(&self, name: &str) -> Option<char> {
        self.names.get(&name.trim().to_ascii_uppercase()).copied()
    }
}
