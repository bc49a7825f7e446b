//! Field-level header edits.
//!
//! Each function here applies one unconditional change to an [`Image`] and
//! returns the [`Event`] describing it. None of them fail on a well-formed
//! image; the only error is the shared buffer-too-small check, plus a title
//! that would run off the end of the image entirely.
//!
//! [`Image`]: ../image/struct.Image.html
//! [`Event`]: ../report/enum.Event.html

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::error::Error;
use crate::error::Result;
use crate::header;
use crate::header::Field;
use crate::image::Image;
use crate::mbc;
use crate::report::Event;
use crate::report::Len;

/// Pads `image` with `value` up to the next power-of-two length of at least
/// 32 KiB.
///
/// Existing bytes keep their offsets; this is a no-op if the image already
/// has such a length.
pub fn pad(image: &mut Image, value: u8) -> Result<Event> {
  image.check()?;

  let from = image.len();
  let to = header::padded_len(from);
  debug!(from, to, "computed padded length");
  if to == from {
    info!("No padding needed");
    return Ok(Event::NoPaddingNeeded);
  }

  info!("Padding to {}kB with pad value {:#04x}", to / 1024, value);
  image.resize(to, value)?;
  info!("Added {} bytes", to - from);
  Ok(Event::Padded { from, to, value })
}

/// Truncates `image` down to the largest step of `8 MiB, 4 MiB, 2 MiB, ...`
/// that fits inside it, discarding the tail.
///
/// Steps shorter than a header are never taken.
pub fn truncate(image: &mut Image) -> Result<Event> {
  image.check()?;

  let from = image.len();
  let to = header::truncated_len(from);
  debug!(from, to, "computed truncated length");
  if to == from {
    info!("No truncation needed");
    return Ok(Event::NoTruncationNeeded);
  }

  info!("Truncating to {}", Len(to));
  image.resize(to, 0)?;
  Ok(Event::Truncated { from, to })
}

/// Writes the bytes of `title` over the image starting at the title field.
///
/// Exactly `title.len()` bytes are written: the title is neither padded nor
/// terminated. A title longer than 16 bytes spills into the following header
/// fields; this is allowed, but logged.
pub fn set_title(image: &mut Image, title: &str) -> Result<Event> {
  image.check()?;

  let bytes = title.as_bytes();
  let start = Field::Title.offset();
  let end = start + bytes.len();
  if end > image.len() {
    return Err(Error::OutOfBounds {
      offset: start,
      len: bytes.len(),
    });
  }
  if bytes.len() > header::TITLE_LEN {
    let names = overrun_fields(bytes.len())
      .into_iter()
      .map(Field::name)
      .collect::<Vec<_>>();
    warn!(
      "title is {} bytes long and overwrites header bytes {:#06x}..{:#06x} [{}]",
      bytes.len(),
      start + header::TITLE_LEN,
      end,
      names.join(", ")
    );
  }

  info!("Setting cartridge title");
  image.as_bytes_mut()[start..end].copy_from_slice(bytes);
  info!("Title set to {}", title);
  Ok(Event::TitleSet(title.to_string()))
}

/// Returns the named fields past the 16-byte title field that a title of
/// `len` bytes writes over.
fn overrun_fields(len: usize) -> Vec<Field> {
  let start = Field::Title.offset();
  let overrun = start + header::TITLE_LEN..start + len;
  Field::ALL
    .iter()
    .copied()
    .filter(|f| overrun.contains(&f.offset()))
    .collect()
}

/// Marks the image as CGB-enhanced, but still DMG-compatible.
pub fn set_gbc_compatible(image: &mut Image) -> Result<Event> {
  image.check()?;

  image.set_field(Field::CgbFlag, header::CGB_COMPATIBLE);
  info!("Colour GameBoy compatible mode set");
  Ok(Event::GbcCompatibleSet)
}

/// Marks the image as CGB-only.
pub fn set_gbc_only(image: &mut Image) -> Result<Event> {
  image.check()?;

  image.set_field(Field::CgbFlag, header::CGB_ONLY);
  info!("Colour GameBoy only mode set");
  Ok(Event::GbcOnlySet)
}

/// Sets the cartridge type byte.
pub fn set_mbc_type(image: &mut Image, ty: u8) -> Result<Event> {
  image.check()?;

  image.set_field(Field::CartType, ty);
  info!("MBC Type set to {:#04x}", ty);
  info!("  {}", mbc::describe(ty));
  Ok(Event::MbcTypeSet(ty))
}

/// Sets the RAM size code.
pub fn set_ram_size(image: &mut Image, size: u8) -> Result<Event> {
  image.check()?;

  image.set_field(Field::RamSize, size);
  info!("RAM Size set to {:#04x}", size);
  Ok(Event::RamSizeSet(size))
}
