//! Flat text form of a transform parameter record.
//!
//! The host's native mask representation is converted to and from this form
//! by the plugin glue; the core only ever sees the typed record.
//!
//! ```text
//! center_x=640&center_y=360&scale_x=2&scale_y=2&keep_aspect_ratio=1&...&filter=Lanczos3
//! ```
//!
//! Pairs are separated by `&` or `;`. Keys are case-insensitive. Missing
//! fields default to identity values; a perspective component exists iff at
//! least one `m11`..`m33` key is present.
//!
//! # Example
//!
//! ```
//! use maskfit::record;
//!
//! let parsed = record::parse("scale_x=2&scale_y=4&rotation_z=30&filter=Lanczos3");
//! assert!(parsed.warnings.is_empty());
//!
//! let inverse = parsed.record.params.inverse();
//! assert_eq!(inverse.scale_y, 0.25);
//! assert_eq!(parsed.record.filter.as_ref().map(|f| f.as_str()), Some("Lanczos3"));
//! ```

mod field;
mod parse;

pub use field::Field;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::params::TransformParameters;

/// Resampling filter name that travels with a record. Never interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterHint(String);

impl FilterHint {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parameters plus the opaque filter hint, as exchanged with the host.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub params: TransformParameters,
    pub filter: Option<FilterHint>,
}

impl Record {
    pub fn new(params: TransformParameters) -> Self {
        Self {
            params,
            filter: None,
        }
    }

    /// Attach a filter hint.
    pub fn with_filter(mut self, filter: FilterHint) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Render as a `key=value&...` string that [`parse`] reads back exactly.
    pub fn to_query(&self) -> String {
        alloc::format!("{self}")
    }
}

impl From<TransformParameters> for Record {
    fn from(params: TransformParameters) -> Self {
        Self::new(params)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in Field::ALL {
            let Some(value) = self.params.get(field) else {
                continue;
            };
            if !first {
                f.write_str("&")?;
            }
            first = false;
            write!(f, "{}={}", field.key(), value)?;
        }
        if let Some(filter) = &self.filter {
            write!(f, "&filter={}", parse::percent_encode(filter.as_str()))?;
        }
        Ok(())
    }
}

/// Result of parsing a record string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub record: Record,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from record parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key that names no field.
    KeyNotRecognized { key: String, value: String },
    /// A known key whose value could not be used. The field keeps its previous value.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a record string (with or without leading `?`).
pub fn parse(text: &str) -> ParseResult {
    let (record, warnings) = parse::parse_record(text);
    ParseResult { record, warnings }
}
