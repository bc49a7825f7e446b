//! A read-only summary of an image's header.

use std::fmt;

use crate::header;
use crate::header::Field;
use crate::image::Image;
use crate::mbc;
use crate::validate;

/// The decoded header of an image, along with what the header *should* say.
#[derive(Clone, Debug)]
pub struct Summary {
  /// The title bytes, up to the first NUL, shown lossily.
  pub title: String,
  /// The CGB flag.
  pub cgb_flag: u8,
  /// The cartridge type.
  pub cart_type: u8,
  /// The stored ROM size code.
  pub rom_size: u8,
  /// The RAM size code.
  pub ram_size: u8,
  /// The version number.
  pub version: u8,
  /// The stored header complement.
  pub complement: u8,
  /// The stored global checksum.
  pub checksum: u16,
  /// The actual length of the image.
  pub len: usize,
  /// Whether the logo matches the canonical one.
  pub logo_ok: bool,
  /// The complement the header should carry.
  pub expected_complement: u8,
  /// The checksum the header should carry.
  pub expected_checksum: u16,
}

impl Summary {
  /// Summarizes `image`'s header.
  pub fn new(image: &Image) -> Self {
    let bytes = image.as_bytes();
    let start = Field::Title.offset();
    let title = &bytes[start..start + header::TITLE_LEN];
    let title = title.split(|&b| b == 0).next().unwrap_or(title);

    let logo = Field::Logo.offset();
    let expected_complement = validate::compute_complement(bytes);
    Self {
      title: String::from_utf8_lossy(title).into_owned(),
      cgb_flag: image.field(Field::CgbFlag),
      cart_type: image.field(Field::CartType),
      rom_size: image.field(Field::RomSize),
      ram_size: image.field(Field::RamSize),
      version: image.field(Field::Version),
      complement: image.field(Field::Complement),
      checksum: image.stored_checksum(),
      len: image.len(),
      logo_ok: bytes[logo..logo + header::LOGO.len()] == header::LOGO[..],
      expected_complement,
      expected_checksum: validate::compute_checksum(bytes, expected_complement),
    }
  }
}

fn ok(good: bool) -> &'static str {
  if good {
    "ok"
  } else {
    "BAD"
  }
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "Title:          {}", self.title)?;
    let cgb = match self.cgb_flag {
      header::CGB_COMPATIBLE => "CGB compatible",
      header::CGB_ONLY => "CGB only",
      _ => "DMG",
    };
    writeln!(f, "CGB flag:       {:#04x} ({})", self.cgb_flag, cgb)?;
    writeln!(
      f,
      "Cartridge type: {:#04x} ({})",
      self.cart_type,
      mbc::describe(self.cart_type)
    )?;
    let code = header::rom_size_code(self.len);
    match header::rom_size_kb(self.rom_size) {
      Some(kb) => write!(f, "ROM size:       {:#04x} ({}kB)", self.rom_size, kb)?,
      None => write!(f, "ROM size:       {:#04x} (?kB)", self.rom_size)?,
    }
    writeln!(f, " [{}; image is {} bytes]", ok(code == self.rom_size), self.len)?;
    writeln!(f, "RAM size:       {:#04x}", self.ram_size)?;
    writeln!(f, "Version:        {:#04x}", self.version)?;
    writeln!(f, "Logo:           [{}]", ok(self.logo_ok))?;
    writeln!(
      f,
      "Complement:     {:#04x} [{}]",
      self.complement,
      ok(self.complement == self.expected_complement)
    )?;
    write!(
      f,
      "Checksum:       {:#06x} [{}]",
      self.checksum,
      ok(self.checksum == self.expected_checksum)
    )
  }
}
