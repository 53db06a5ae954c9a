//! # Filename Codec
//!
//! Maps a logical page name to the stem of its on-disk filenames and back.
//!
//! ## Encoding
//!
//! 1. The name is converted to bytes with the store's [`Charset`].
//! 2. ASCII letters, digits, `-`, `_` and `.` pass through unchanged.
//! 3. Every other byte becomes `%XX` with uppercase hex digits. This covers
//!    path separators, `%` itself, spaces, control bytes and every byte of a
//!    non-ASCII character.
//! 4. A leading `.` is always written as `%2E` so no page maps to a hidden file
//!    or to `.`/`..`.
//!
//! The namespace is flat: `Test/Foobar` becomes `Test%2FFoobar`, never a
//! subdirectory.
//!
//! ## Charset Sensitivity
//!
//! Non-ASCII names encode differently per charset:
//!
//! ```text
//! "ÅäTest"  ISO-8859-1  →  %C5%E4Test
//! "ÅäTest"  UTF-8       →  %C3%85%C3%A4Test
//! ```
//!
//! A page directory must always be opened with the charset it was written
//! with; opening it with another one does not find those pages.
//!
//! ## Decoding
//!
//! [`decode_name`] reverses the mapping. It is only needed when enumerating a
//! directory; `put`/`get` always derive the filename from the caller's name.

use crate::charset::Charset;
use crate::error::{Result, StoreError};
use percent_encoding::{percent_decode, percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes that must be escaped. Everything outside ASCII is always escaped.
const UNSAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

pub fn encode_name(name: &str, charset: Charset) -> Result<String> {
    let bytes = charset.encode(name)?;

    let mut encoded = String::with_capacity(bytes.len());
    let rest = match bytes.split_first() {
        Some((b'.', rest)) => {
            encoded.push_str("%2E");
            rest
        }
        _ => &bytes[..],
    };
    encoded.extend(percent_encode(rest, UNSAFE));
    Ok(encoded)
}

pub fn decode_name(stem: &str, charset: Charset) -> Result<String> {
    let raw = stem.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let valid = raw.len() > i + 2
                && raw[i + 1].is_ascii_hexdigit()
                && raw[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(StoreError::Format(format!(
                    "Malformed escape at offset {} in '{}'",
                    i, stem
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let bytes: Vec<u8> = percent_decode(raw).collect();
    charset.decode(&bytes)
}
