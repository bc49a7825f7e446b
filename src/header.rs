//! The fixed layout of a Game Boy cartridge header.
//!
//! Every Game Boy ROM carries a metadata block at `$0100..$0150`. The fields
//! this tool touches are named by [`Field`], which maps each of them to its
//! byte offset in the image. The layout is fixed by the hardware: the boot
//! ROM refuses to start a cartridge whose logo bytes do not match [`LOGO`] or
//! whose header complement is wrong.
//!
//! ```text
//!  $0100..$0103  entry point
//!  $0104..$0133  logo                      (48 bytes, must equal LOGO)
//!  $0134..$0142  title
//!  $0143         CGB flag                  ($80 compatible, $c0 only)
//!  $0144..$0146  licensee, SGB flag
//!  $0147         cartridge (MBC) type
//!  $0148         ROM size code             (32 KiB << code)
//!  $0149         RAM size code
//!  $014a..$014c  region, old licensee, version
//!  $014d         header complement
//!  $014e..$014f  global checksum           (big-endian)
//! ```
//!
//! [`Field`]: enum.Field.html
//! [`LOGO`]: constant.LOGO.html

/// The smallest image that contains a complete header.
pub const MIN_LEN: usize = 0x150;

/// The size of the smallest real cartridge, and the first step of the padding
/// sequence: 32 KiB.
pub const BASE_LEN: usize = 0x8000;

/// The first step of the truncation sequence: 256 banks of 32 KiB, or 8 MiB.
pub const MAX_LEN: usize = 256 * BASE_LEN;

/// The canonical logo bitmap the boot ROM compares against.
pub const LOGO: [u8; 48] = [
  0xce, 0xed, 0x66, 0x66, 0xcc, 0x0d, 0x00, 0x0b, 0x03, 0x73, 0x00, 0x83, //
  0x00, 0x0c, 0x00, 0x0d, 0x00, 0x08, 0x11, 0x1f, 0x88, 0x89, 0x00, 0x0e, //
  0xdc, 0xcc, 0x6e, 0xe6, 0xdd, 0xdd, 0xd9, 0x99, 0xbb, 0xbb, 0x67, 0x63, //
  0x6e, 0x0e, 0xec, 0xcc, 0xdd, 0xdc, 0x99, 0x9f, 0xbb, 0xb9, 0x33, 0x3e, //
];

/// The seed of the header complement: `$e7 - sum(title..=version)`.
pub const COMPLEMENT_SEED: u8 = 0xe7;

/// A CGB flag value marking a ROM as CGB-enhanced but DMG-compatible.
pub const CGB_COMPATIBLE: u8 = 0x80;

/// A CGB flag value marking a ROM as CGB-only.
pub const CGB_ONLY: u8 = 0xc0;

/// The conventional width of the title field.
///
/// Newer cartridges reuse the tail of the title for the manufacturer code and
/// the CGB flag, so writing a full 16-byte title clobbers `$0143`.
pub const TITLE_LEN: usize = 16;

/// A named header field.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Field {
  /// The start of the 48-byte logo.
  Logo,
  /// The start of the title.
  Title,
  /// The CGB compatibility flag.
  CgbFlag,
  /// The cartridge (MBC) type.
  CartType,
  /// The ROM size code.
  RomSize,
  /// The RAM size code.
  RamSize,
  /// The mask ROM version number; the last byte covered by the complement.
  Version,
  /// The header complement.
  Complement,
  /// The high byte of the global checksum.
  ChecksumHi,
  /// The low byte of the global checksum.
  ChecksumLo,
}

impl Field {
  /// Every field, in address order.
  pub const ALL: [Field; 10] = [
    Field::Logo,
    Field::Title,
    Field::CgbFlag,
    Field::CartType,
    Field::RomSize,
    Field::RamSize,
    Field::Version,
    Field::Complement,
    Field::ChecksumHi,
    Field::ChecksumLo,
  ];

  /// Returns the byte offset of this field within an image.
  #[inline]
  pub const fn offset(self) -> usize {
    match self {
      Self::Logo => 0x104,
      Self::Title => 0x134,
      Self::CgbFlag => 0x143,
      Self::CartType => 0x147,
      Self::RomSize => 0x148,
      Self::RamSize => 0x149,
      Self::Version => 0x14c,
      Self::Complement => 0x14d,
      Self::ChecksumHi => 0x14e,
      Self::ChecksumLo => 0x14f,
    }
  }

  /// Returns a short, human-readable name for this field.
  pub fn name(self) -> &'static str {
    match self {
      Self::Logo => "logo",
      Self::Title => "title",
      Self::CgbFlag => "CGB flag",
      Self::CartType => "cartridge type",
      Self::RomSize => "ROM size",
      Self::RamSize => "RAM size",
      Self::Version => "version",
      Self::Complement => "complement",
      Self::ChecksumHi => "checksum (high)",
      Self::ChecksumLo => "checksum (low)",
    }
  }
}

/// Returns the length `pad` grows an image of `len` bytes to: the first
/// power of two, starting from 32 KiB, that is at least `len`.
pub fn padded_len(len: usize) -> usize {
  let mut size = BASE_LEN;
  while len > size {
    size *= 2;
  }
  size
}

/// Returns the length `truncate` shrinks an image of `len` bytes to: the first
/// step of `8 MiB, 4 MiB, 2 MiB, ...` that is at most `len`.
///
/// If that step would be too short to hold a header, `len` is returned
/// unchanged.
pub fn truncated_len(len: usize) -> usize {
  let mut size = MAX_LEN;
  while len < size {
    size /= 2;
  }
  if size < MIN_LEN {
    len
  } else {
    size
  }
}

/// Returns the ROM size code describing an image of `len` bytes: the smallest
/// `k` such that `32 KiB << k` covers `len`.
pub fn rom_size_code(len: usize) -> u8 {
  let mut code = 0u8;
  while (len as u64) > (BASE_LEN as u64) << code {
    code += 1;
  }
  code
}

/// The largest ROM size code whose byte count, `32 KiB << code`, fits in a
/// `u64`.
pub const MAX_SIZE_CODE: u8 = 48;

/// Returns the size in KiB that a ROM size code claims, or `None` past
/// [`MAX_SIZE_CODE`].
///
/// [`MAX_SIZE_CODE`]: constant.MAX_SIZE_CODE.html
pub fn rom_size_kb(code: u8) -> Option<u64> {
  if code > MAX_SIZE_CODE {
    return None;
  }
  Some(((BASE_LEN as u64) << code) / 1024)
}

#[cfg(test)]
mod test {
  use super::*;

  macro_rules! assert_len {
    ($f:ident, $len:expr => $expected:expr) => {
      assert_eq!($f($len), $expected, "{}({:#x})", stringify!($f), $len);
    };
  }

  #[test]
  fn field_offsets() {
    assert_eq!(Field::Logo.offset() + LOGO.len(), Field::Title.offset());
    assert_eq!(Field::Title.offset() + TITLE_LEN, Field::CgbFlag.offset() + 1);
    assert_eq!(Field::ChecksumLo.offset() + 1, MIN_LEN);

    let offsets = Field::ALL.iter().map(|f| f.offset()).collect::<Vec<_>>();
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets, sorted);
  }

  #[test]
  fn padding_sequence() {
    assert_len!(padded_len, MIN_LEN => 0x8000);
    assert_len!(padded_len, 0x8000 => 0x8000);
    assert_len!(padded_len, 0x8001 => 0x10000);
    assert_len!(padded_len, 600 * 1024 => 1024 * 1024);
    assert_len!(padded_len, 0x80_0001 => 0x100_0000);
  }

  #[test]
  fn truncation_sequence() {
    assert_len!(truncated_len, 600 * 1024 => 512 * 1024);
    assert_len!(truncated_len, 0x8000 => 0x8000);
    assert_len!(truncated_len, 0xffff => 0x8000);
    assert_len!(truncated_len, 0x80_0000 => 0x80_0000);
    assert_len!(truncated_len, 0x90_0000 => 0x80_0000);
    assert_len!(truncated_len, 0x7fff => 0x4000);
    assert_len!(truncated_len, 0x5000 => 0x4000);
    assert_len!(truncated_len, 0x300 => 0x200);
    assert_len!(truncated_len, 0x200 => 0x200);
    assert_len!(truncated_len, 0x1ff => 0x1ff);
    assert_len!(truncated_len, MIN_LEN => MIN_LEN);
  }

  #[test]
  fn size_codes() {
    assert_len!(rom_size_code, MIN_LEN => 0);
    assert_len!(rom_size_code, 0x8000 => 0);
    assert_len!(rom_size_code, 0x8001 => 1);
    assert_len!(rom_size_code, 0x10000 => 1);
    assert_len!(rom_size_code, 0x20_0000 => 6);

    assert_eq!(rom_size_kb(0), Some(32));
    assert_eq!(rom_size_kb(5), Some(1024));
    assert_eq!(rom_size_kb(40), Some(32 << 40));
    assert_eq!(rom_size_kb(MAX_SIZE_CODE), Some(1 << 53));
    assert_eq!(rom_size_kb(MAX_SIZE_CODE + 1), None);
    assert_eq!(rom_size_kb(0xff), None);
  }

  #[test]
  fn field_names() {
    assert_eq!(Field::CgbFlag.name(), "CGB flag");
    assert_eq!(Field::ChecksumLo.name(), "checksum (low)");
  }
}
