//! Records of what each operation did to an image.
//!
//! Every editing and validation step returns one or more [`Event`]s. Their
//! `Display` implementation produces the status lines shown to the user; tests
//! and other callers can match on them directly instead.
//!
//! [`Event`]: enum.Event.html

use std::fmt;

use crate::header::rom_size_kb;
use crate::mbc;

/// Something that happened (or was found not to need happening) to an image.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
  /// The image was padded from `from` to `to` bytes with `value`.
  Padded {
    /// The original length.
    from: usize,
    /// The new length.
    to: usize,
    /// The fill byte.
    value: u8,
  },
  /// The image was already a valid padded length.
  NoPaddingNeeded,
  /// The image was truncated from `from` to `to` bytes.
  Truncated {
    /// The original length.
    from: usize,
    /// The new length.
    to: usize,
  },
  /// The image was already a valid truncated length.
  NoTruncationNeeded,
  /// The title was overwritten.
  TitleSet(String),
  /// The CGB flag was set to `$80`.
  GbcCompatibleSet,
  /// The CGB flag was set to `$c0`.
  GbcOnlySet,
  /// The cartridge type was set.
  MbcTypeSet(u8),
  /// The RAM size code was set.
  RamSizeSet(u8),
  /// The logo needed `changed` bytes replaced; zero means it was intact.
  Logo {
    /// The number of bytes that differed from the canonical logo.
    changed: usize,
  },
  /// The ROM size code was rewritten.
  RomSizeChanged {
    /// The stored code.
    old: u8,
    /// The code matching the actual image length.
    new: u8,
  },
  /// The ROM size code matched the image length.
  RomSizeOk,
  /// A cartridge type of `$00` was rewritten to `$01`.
  CartTypeChanged,
  /// The cartridge type was acceptable for the image length.
  CartTypeOk,
  /// The global checksum was rewritten.
  ChecksumChanged {
    /// The stored checksum.
    old: u16,
    /// The computed checksum.
    new: u16,
  },
  /// The global checksum was correct.
  ChecksumOk,
  /// The header complement was rewritten.
  ComplementChanged {
    /// The stored complement.
    old: u8,
    /// The computed complement.
    new: u8,
  },
  /// The header complement was correct.
  ComplementOk,
}

impl Event {
  /// Returns whether this event records a modification to the image.
  pub fn is_change(&self) -> bool {
    match self {
      Self::NoPaddingNeeded
      | Self::NoTruncationNeeded
      | Self::RomSizeOk
      | Self::CartTypeOk
      | Self::ChecksumOk
      | Self::ComplementOk => false,
      Self::Logo { changed } => *changed != 0,
      _ => true,
    }
  }
}

/// Formats an image length in kB, or in bytes if it is not a whole number of
/// KiB.
pub(crate) struct Len(pub usize);

impl fmt::Display for Len {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.0 % 1024 == 0 {
      write!(f, "{}kB", self.0 / 1024)
    } else {
      write!(f, "{} bytes", self.0)
    }
  }
}

struct Kb(u8);

impl fmt::Display for Kb {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match rom_size_kb(self.0) {
      Some(kb) => write!(f, "{}kB", kb),
      None => write!(f, "?kB"),
    }
  }
}

impl fmt::Display for Event {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Padded { from, to, value } => write!(
        f,
        "Padded to {}kB with pad value {:#04x}; added {} bytes",
        to / 1024,
        value,
        to - from
      ),
      Self::NoPaddingNeeded => write!(f, "No padding needed"),
      Self::Truncated { to, .. } => {
        write!(f, "Truncated to {}", Len(*to))
      }
      Self::NoTruncationNeeded => write!(f, "No truncation needed"),
      Self::TitleSet(title) => write!(f, "Title set to {}", title),
      Self::GbcCompatibleSet => {
        write!(f, "Colour GameBoy compatible mode set")
      }
      Self::GbcOnlySet => write!(f, "Colour GameBoy only mode set"),
      Self::MbcTypeSet(ty) => {
        write!(f, "MBC Type set to {:#04x} ({})", ty, mbc::describe(*ty))
      }
      Self::RamSizeSet(size) => write!(f, "RAM Size set to {:#04x}", size),
      Self::Logo { changed: 0 } => {
        write!(f, "Nintendo Character Area is OK")
      }
      Self::Logo { changed } => write!(
        f,
        "Changed {} bytes in the Nintendo Character Area",
        changed
      ),
      Self::RomSizeChanged { old, new } => write!(
        f,
        "Changed ROM size byte from {:#04x} ({}) to {:#04x} ({})",
        old,
        Kb(*old),
        new,
        Kb(*new)
      ),
      Self::RomSizeOk => write!(f, "ROM size byte is OK"),
      Self::CartTypeChanged => write!(f, "Cartridge type byte changed to 0x01"),
      Self::CartTypeOk => write!(f, "Cartridge type byte is OK"),
      Self::ChecksumChanged { old, new } => {
        write!(f, "Checksum changed from {:#06x} to {:#06x}", old, new)
      }
      Self::ChecksumOk => write!(f, "Checksum is OK"),
      Self::ComplementChanged { old, new } => write!(
        f,
        "Complement Checksum changed from {:#04x} to {:#04x}",
        old, new
      ),
      Self::ComplementOk => write!(f, "Complement Checksum is OK"),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn messages() {
    let padded = Event::Padded {
      from: 0x150,
      to: 0x8000,
      value: 0xff,
    };
    assert_eq!(
      padded.to_string(),
      "Padded to 32kB with pad value 0xff; added 32432 bytes"
    );
    assert_eq!(
      Event::RomSizeChanged { old: 0xff, new: 1 }.to_string(),
      "Changed ROM size byte from 0xff (?kB) to 0x01 (64kB)"
    );
    assert_eq!(
      Event::Truncated {
        from: 0x300,
        to: 0x200
      }
      .to_string(),
      "Truncated to 512 bytes"
    );
    assert_eq!(
      Event::Truncated {
        from: 0x5000,
        to: 0x4000
      }
      .to_string(),
      "Truncated to 16kB"
    );
    assert_eq!(
      Event::RomSizeChanged { old: 48, new: 49 }.to_string(),
      "Changed ROM size byte from 0x30 (9007199254740992kB) to 0x31 (?kB)"
    );
    assert_eq!(
      Event::ChecksumChanged { old: 0, new: 0xbeef }.to_string(),
      "Checksum changed from 0x0000 to 0xbeef"
    );
    assert_eq!(
      Event::MbcTypeSet(0x13).to_string(),
      "MBC Type set to 0x13 (MBC 0x03 -- ROM & RAM & Battery)"
    );
  }

  #[test]
  fn changes() {
    assert!(!Event::Logo { changed: 0 }.is_change());
    assert!(Event::Logo { changed: 3 }.is_change());
    assert!(!Event::ChecksumOk.is_change());
    assert!(Event::CartTypeChanged.is_change());
  }
}
