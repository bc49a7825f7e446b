//! The set of operations to apply to an image.
//!
//! [`Options`] is the contract between whoever chooses what to do (the command
//! line, or an options file) and the [`pipeline`]. Options files are JSON5:
//!
//! ```text
//! {
//!   pad: "$ff",
//!   title: "POCKETDEMO",
//!   gbc_compatible: true,
//!   mbc_type: "0x1b",
//!   ram_size: 3,
//!   validate: true,
//! }
//! ```
//!
//! Byte values may be JSON numbers or strings in any syntax [`syn`] accepts.
//!
//! [`Options`]: struct.Options.html
//! [`pipeline`]: ../pipeline/index.html
//! [`syn`]: ../syn/index.html

use std::fmt;

use serde::de;
use serde::Deserialize;
use serde::Deserializer;

use crate::error::Error;
use crate::error::Result;
use crate::header::TITLE_LEN;
use crate::syn;

/// Which operations to run, and with what values.
///
/// Operations are independent and are always applied in field order,
/// regardless of how they were requested.
#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
  /// Pad the image to a power-of-two length with this byte.
  #[serde(deserialize_with = "opt_byte")]
  pub pad: Option<u8>,
  /// Truncate the image to a power-of-two length.
  pub truncate: bool,
  /// Overwrite the title.
  pub title: Option<String>,
  /// Mark the image as CGB-enhanced.
  pub gbc_compatible: bool,
  /// Mark the image as CGB-only.
  pub gbc_only: bool,
  /// Overwrite the cartridge type.
  #[serde(deserialize_with = "opt_byte")]
  pub mbc_type: Option<u8>,
  /// Overwrite the RAM size code.
  #[serde(deserialize_with = "opt_byte")]
  pub ram_size: Option<u8>,
  /// Repair the header.
  pub validate: bool,
}

impl Options {
  /// Parses an `Options` from JSON5 text.
  pub fn from_json5(text: &str) -> Result<Self> {
    Ok(json5::from_str(text)?)
  }

  /// Overlays `other` on top of `self`: flags are combined, and values set in
  /// `other` win.
  pub fn merge(self, other: Options) -> Self {
    Self {
      pad: other.pad.or(self.pad),
      truncate: self.truncate || other.truncate,
      title: other.title.or(self.title),
      gbc_compatible: self.gbc_compatible || other.gbc_compatible,
      gbc_only: self.gbc_only || other.gbc_only,
      mbc_type: other.mbc_type.or(self.mbc_type),
      ram_size: other.ram_size.or(self.ram_size),
      validate: self.validate || other.validate,
    }
  }

  /// Returns whether any operation has been requested.
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }

  /// Checks the options for values the header cannot hold.
  pub fn check(&self) -> Result<()> {
    if let Some(title) = &self.title {
      if title.is_empty() {
        return Err(Error::BadOptions("blank cartridge title supplied".into()));
      }
      if title.len() > TITLE_LEN {
        return Err(Error::BadOptions(format!(
          "cartridge title is {} bytes long; at most {} fit",
          title.len(),
          TITLE_LEN
        )));
      }
    }
    Ok(())
  }
}

fn opt_byte<'de, D>(de: D) -> Result<Option<u8>, D::Error>
where
  D: Deserializer<'de>,
{
  struct ByteVisitor;
  impl<'de> de::Visitor<'de> for ByteVisitor {
    type Value = Option<u8>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
      formatter.write_str("a byte, as a number or a literal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
      if v > u8::MAX as u64 {
        return Err(E::invalid_value(de::Unexpected::Unsigned(v), &self));
      }
      Ok(Some(v as u8))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
      if v < 0 || v > u8::MAX as i64 {
        return Err(E::invalid_value(de::Unexpected::Signed(v), &self));
      }
      Ok(Some(v as u8))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
      if v.fract() != 0.0 || v < 0.0 || v > u8::MAX as f64 {
        return Err(E::invalid_value(de::Unexpected::Float(v), &self));
      }
      Ok(Some(v as u8))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
      syn::parse_byte(v).map(Some).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
      Ok(None)
    }
  }

  de.deserialize_any(ByteVisitor)
}
