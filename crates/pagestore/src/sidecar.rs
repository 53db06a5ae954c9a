//! # Attribute Sidecar
//!
//! Author and persistable attributes live next to the content file in
//! `<encoded-name>.properties`, one `key=value` entry per line:
//!
//! ```text
//! author=Min\u00E4
//! @test=Save Me
//! @test2=Save You
//! ```
//!
//! ## Format
//!
//! The syntax follows Java `.properties` files so existing page directories
//! stay readable by hand and by other tools:
//!
//! - `#` and `!` start a comment line; blank lines are ignored.
//! - The first unescaped `=` separates key from value. Whitespace around it is
//!   ignored.
//! - `\\`, `\n`, `\r`, `\t`, `\f`, `\=`, `\:`, `\#`, `\!` and `\ ` are escapes.
//! - Anything outside printable ASCII is written as `\uXXXX` (UTF-16 code
//!   units), so the file is pure ASCII whatever charset the content uses.
//!
//! ## Robustness
//!
//! A damaged sidecar must never hide a page's content. [`SidecarRecord::parse`]
//! cannot fail: lines without a separator or with a broken escape are logged
//! and skipped. A missing file reads as an empty record.

use crate::charset::Charset;
use crate::error::{Result, StoreError};
use crate::model::{is_persistable_key, Page};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

pub const SIDECAR_EXT: &str = ".properties";

/// Key holding the page author.
pub const AUTHOR_KEY: &str = "author";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidecarRecord {
    pub author: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl SidecarRecord {
    pub fn from_page(page: &Page) -> Self {
        Self {
            author: page.author.clone(),
            attributes: page
                .persistable_attributes()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.attributes.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(author) = &self.author {
            push_entry(&mut out, AUTHOR_KEY, author);
        }
        for (key, value) in &self.attributes {
            push_entry(&mut out, key, value);
        }
        out
    }

    pub fn parse(text: &str) -> Self {
        let mut record = SidecarRecord::default();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim_start_matches(is_blank);
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let Some((raw_key, raw_value)) = split_entry(line) else {
                warn!(line = lineno + 1, "Skipping sidecar line without '='");
                continue;
            };
            let (Some(key), Some(value)) = (unescape(raw_key), unescape(raw_value)) else {
                warn!(line = lineno + 1, "Skipping sidecar line with malformed escape");
                continue;
            };

            if key == AUTHOR_KEY {
                record.author = Some(value);
            } else if is_persistable_key(&key) {
                record.attributes.insert(key, value);
            }
        }

        record
    }

    /// Read a sidecar file. A missing file is an empty record.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read(path) {
            // Latin-1 decoding is total, so stray bytes cannot fail the read
            Ok(bytes) => Ok(Self::parse(&Charset::Latin1.decode(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// Upper bounds on what a single page may persist as attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidecarLimits {
    pub max_attributes: usize,
    pub max_key_len: usize,
    pub max_value_len: usize,
}

impl Default for SidecarLimits {
    fn default() -> Self {
        Self {
            max_attributes: 200,
            max_key_len: 255,
            max_value_len: 4096,
        }
    }
}

impl SidecarLimits {
    pub fn check(&self, record: &SidecarRecord) -> Result<()> {
        if record.attributes.len() > self.max_attributes {
            return Err(StoreError::AttributeLimit(format!(
                "{} attributes, at most {} allowed",
                record.attributes.len(),
                self.max_attributes
            )));
        }
        for (key, value) in &record.attributes {
            if key.chars().count() > self.max_key_len {
                return Err(StoreError::AttributeLimit(format!(
                    "key '{}' is longer than {} characters",
                    key, self.max_key_len
                )));
            }
            if value.chars().count() > self.max_value_len {
                return Err(StoreError::AttributeLimit(format!(
                    "value of '{}' is longer than {} characters",
                    key, self.max_value_len
                )));
            }
        }
        Ok(())
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn push_entry(out: &mut String, key: &str, value: &str) {
    escape_into(out, key, true);
    out.push('=');
    escape_into(out, value, false);
    out.push('\n');
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if i == 0 && is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
}

/// Split at the first unescaped `=`, dropping unescaped blanks around it.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    let mut key_end = 0;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            key_end = i + c.len_utf8();
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' => {
                let value = line[i + 1..].trim_start_matches(is_blank);
                return Some((&line[..key_end], value));
            }
            c if is_blank(c) => {}
            _ => key_end = i + c.len_utf8(),
        }
    }
    None
}

fn unescape(raw: &str) -> Option<String> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut buf = [0u16; 2];

    while let Some(c) = chars.next() {
        if c != '\\' {
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let unit = match chars.next()? {
            't' => u16::from(b'\t'),
            'n' => u16::from(b'\n'),
            'r' => u16::from(b'\r'),
            'f' => 0x0c,
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                u16::from_str_radix(&hex, 16).ok()?
            }
            other => {
                units.extend_from_slice(other.encode_utf16(&mut buf));
                continue;
            }
        };
        units.push(unit);
    }

    String::from_utf16(&units).ok()
}
