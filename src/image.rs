//! The in-memory ROM image.
//!
//! An [`Image`] owns every byte of a ROM file. It is created once from the
//! bytes on disk, mutated in place by the [`edit`] and [`validate`] passes, and
//! finally handed back for writing.
//!
//! An `Image` must always be large enough to contain a header; header
//! operations call [`Image::check()`] before touching any field, so a
//! too-short buffer surfaces as an [`Error::TooSmall`] rather than an
//! out-of-bounds panic.
//!
//! [`Image`]: struct.Image.html
//! [`Image::check()`]: struct.Image.html#method.check
//! [`Error::TooSmall`]: ../error/enum.Error.html#variant.TooSmall
//! [`edit`]: ../edit/index.html
//! [`validate`]: ../validate/index.html

use std::io;

use crate::error::Error;
use crate::error::Result;
use crate::header::Field;
use crate::header::MIN_LEN;

/// A mutable ROM image.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
  bytes: Vec<u8>,
}

impl Image {
  /// Wraps `bytes` in an `Image`, refusing buffers too short for a header.
  pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
    let image = Self {
      bytes: bytes.into(),
    };
    image.check()?;
    Ok(image)
  }

  /// Checks that this image is still large enough to hold a header.
  #[inline]
  pub fn check(&self) -> Result<()> {
    if self.bytes.len() < MIN_LEN {
      return Err(Error::TooSmall {
        len: self.bytes.len(),
      });
    }
    Ok(())
  }

  /// Returns the length of this image, in bytes.
  #[inline]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  /// Returns the byte at `offset`, if it is within the image.
  #[inline]
  pub fn get(&self, offset: usize) -> Option<u8> {
    self.bytes.get(offset).copied()
  }

  /// Gets a mutable reference to the byte at `offset`, if it is within the
  /// image.
  #[inline]
  pub fn at(&mut self, offset: usize) -> Option<&mut u8> {
    self.bytes.get_mut(offset)
  }

  /// Returns the value of a single-byte header field.
  ///
  /// # Panics
  ///
  /// Panics if the image fails [`check()`](#method.check).
  #[inline]
  pub fn field(&self, field: Field) -> u8 {
    self.bytes[field.offset()]
  }

  /// Sets the value of a single-byte header field.
  ///
  /// # Panics
  ///
  /// Panics if the image fails [`check()`](#method.check).
  #[inline]
  pub fn set_field(&mut self, field: Field, value: u8) {
    self.bytes[field.offset()] = value;
  }

  /// Returns the big-endian global checksum stored in the header.
  pub fn stored_checksum(&self) -> u16 {
    u16::from_be_bytes([
      self.field(Field::ChecksumHi),
      self.field(Field::ChecksumLo),
    ])
  }

  /// Returns the bytes of this image.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Returns the bytes of this image, mutably.
  ///
  /// The length cannot change through this slice; use
  /// [`replace()`](#method.replace) or [`resize()`](#method.resize) for that.
  #[inline]
  pub fn as_bytes_mut(&mut self) -> &mut [u8] {
    &mut self.bytes
  }

  /// Replaces the whole contents of this image with `bytes`.
  ///
  /// The new contents must still hold a header; on failure the image is left
  /// untouched.
  pub fn replace(&mut self, bytes: Vec<u8>) -> Result<()> {
    if bytes.len() < MIN_LEN {
      return Err(Error::TooSmall { len: bytes.len() });
    }
    self.bytes = bytes;
    Ok(())
  }

  /// Resizes this image to `len` bytes, keeping the existing prefix and
  /// filling any new bytes with `fill`.
  pub fn resize(&mut self, len: usize, fill: u8) -> Result<()> {
    if len < MIN_LEN {
      return Err(Error::TooSmall { len });
    }
    self.bytes.resize(len, fill);
    Ok(())
  }

  /// Dumps the header region of this image to the given `Write`, 16 bytes to
  /// a line.
  pub fn dump(&self, mut w: impl io::Write) -> io::Result<()> {
    let start = 0x100;
    let end = MIN_LEN.min(self.bytes.len());
    if start >= end {
      return Ok(());
    }

    let mut ascii_str = String::new();
    for (i, chunk) in self.bytes[start..end].chunks(16).enumerate() {
      write!(w, "{:06x}:", start + i * 16)?;

      ascii_str.clear();
      for &byte in chunk {
        write!(w, " {:02x}", byte)?;

        if 0x20 <= byte && byte <= 0x7e {
          ascii_str.push(byte as char);
        } else {
          ascii_str.push('.');
        }
      }
      writeln!(w, "  |{}|", ascii_str)?;
    }
    Ok(())
  }

  /// Consumes this `Image`, returning the raw bytes.
  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }
}

impl std::fmt::Debug for Image {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.debug_struct("Image")
      .field("len", &self.bytes.len())
      .finish()
  }
}
