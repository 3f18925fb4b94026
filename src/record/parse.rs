//! Record tokenizer and value parsers.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use num_traits::Float;

use super::{Field, FilterHint, ParseWarning, Record};
use crate::params::TransformParameters;

const FILTER_KEY: &str = "filter";

/// Parse a record string into a Record + warnings.
pub(crate) fn parse_record(text: &str) -> (Record, Vec<ParseWarning>) {
    let mut params = TransformParameters::IDENTITY;
    let mut filter: Option<FilterHint> = None;
    let mut seen = [false; Field::ALL.len()];
    let mut warnings = Vec::new();

    for pair in split_record(text) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key.trim()).to_ascii_lowercase();
        let value = percent_decode(raw_value.trim());

        if key == FILTER_KEY {
            if filter.is_some() {
                warnings.push(ParseWarning::DuplicateKey {
                    key,
                    value: value.clone(),
                });
            }
            filter = Some(FilterHint::new(value));
            continue;
        }

        let Some(field) = Field::from_key(&key) else {
            warnings.push(ParseWarning::KeyNotRecognized { key, value });
            continue;
        };

        let parsed = if field == Field::KeepAspectRatio {
            parse_flag(&value).ok_or("expected 0|1|true|false")
        } else {
            parse_number(&value).ok_or("expected a number")
        };
        match parsed {
            Ok(v) => {
                if seen[field.index()] {
                    warnings.push(ParseWarning::DuplicateKey {
                        key,
                        value: value.clone(),
                    });
                }
                seen[field.index()] = true;
                params = params.with_field(field, v);
            }
            Err(reason) => warnings.push(ParseWarning::ValueInvalid {
                key: field.key(),
                value,
                reason,
            }),
        }
    }

    (Record { params, filter }, warnings)
}

// ---- Value parsers ----

/// Accepts `inf`/`-inf`, which inverting a tiny scale can produce, but not NaN.
fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| !Float::is_nan(*v))
}

fn parse_flag(s: &str) -> Option<f64> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" => Some(1.0),
        "0" | "false" => Some(0.0),
        _ => None,
    }
}

// ---- Tokenizer ----

fn split_record(text: &str) -> impl Iterator<Item = &str> {
    let text = text.strip_prefix('?').unwrap_or(text);
    text.split(['&', ';']).filter(|s| !s.trim().is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    match pair.split_once('=') {
        Some((k, v)) => (k, v),
        None => (pair, ""),
    }
}

/// Percent-decode a component. Malformed escapes pass through literally.
fn percent_decode(s: &str) -> String {
    if !s.contains('%') {
        return s.to_owned();
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2]))
        {
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Escape the characters that would break tokenizing, plus whitespace,
/// which the parser trims.
pub(super) fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            ';' => out.push_str("%3B"),
            '=' => out.push_str("%3D"),
            c if c.is_whitespace() => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "%{b:02X}");
                }
            }
            _ => out.push(c),
        }
    }
    out
}
