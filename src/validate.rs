//! Header repair.
//!
//! [`validate()`] runs four independent passes over an image, in order:
//! 1. [`logo()`] restores the 48 logo bytes.
//! 2. [`rom_size()`] recomputes the ROM size code from the image length.
//! 3. [`cart_type()`] replaces a cartridge type of `$00` on images larger
//!    than 32 KiB, where "ROM only" cannot be right.
//! 4. [`checksum()`] recomputes the header complement and global checksum.
//!
//! Every pass either finds its field correct or rewrites it; anomalies are
//! repaired, never rejected. Each pass is idempotent, and so is the whole
//! pipeline: a second `validate()` reports no changes.
//!
//! [`validate()`]: fn.validate.html
//! [`logo()`]: fn.logo.html
//! [`rom_size()`]: fn.rom_size.html
//! [`cart_type()`]: fn.cart_type.html
//! [`checksum()`]: fn.checksum.html

use tracing::debug;
use tracing::info;

use crate::error::Result;
use crate::header;
use crate::header::Field;
use crate::header::LOGO;
use crate::image::Image;
use crate::report::Event;

/// Runs every repair pass over `image`, returning everything that was found.
pub fn validate(image: &mut Image) -> Result<Vec<Event>> {
  image.check()?;

  info!("Validating header");
  let mut events = Vec::with_capacity(5);
  events.push(logo(image)?);
  events.push(rom_size(image)?);
  events.push(cart_type(image)?);
  events.extend_from_slice(&checksum(image)?);
  Ok(events)
}

/// Overwrites every logo byte that differs from the canonical logo.
pub fn logo(image: &mut Image) -> Result<Event> {
  image.check()?;

  let start = Field::Logo.offset();
  let stored = &mut image.as_bytes_mut()[start..start + LOGO.len()];
  let mut changed = 0;
  for (byte, &expected) in stored.iter_mut().zip(LOGO.iter()) {
    if *byte != expected {
      *byte = expected;
      changed += 1;
    }
  }

  let event = Event::Logo { changed };
  info!("{}", event);
  Ok(event)
}

/// Rewrites the ROM size code if it does not describe the image's length.
pub fn rom_size(image: &mut Image) -> Result<Event> {
  image.check()?;

  let old = image.field(Field::RomSize);
  let new = header::rom_size_code(image.len());
  debug!(len = image.len(), code = new, "computed ROM size code");

  let event = if old == new {
    Event::RomSizeOk
  } else {
    image.set_field(Field::RomSize, new);
    Event::RomSizeChanged { old, new }
  };
  info!("{}", event);
  Ok(event)
}

/// Rewrites a cartridge type of `$00` to `$01` on images larger than 32 KiB.
///
/// Any type is accepted on a 32 KiB image.
pub fn cart_type(image: &mut Image) -> Result<Event> {
  image.check()?;

  let event =
    if image.len() > header::BASE_LEN && image.field(Field::CartType) == 0x00 {
      image.set_field(Field::CartType, 0x01);
      Event::CartTypeChanged
    } else {
      Event::CartTypeOk
    };
  info!("{}", event);
  Ok(event)
}

/// Computes the header complement over `bytes`, which must hold a header.
///
/// This is `$e7` minus the wrapping sum of the title through the version
/// byte.
pub fn compute_complement(bytes: &[u8]) -> u8 {
  let range = Field::Title.offset()..=Field::Version.offset();
  bytes[range]
    .iter()
    .fold(header::COMPLEMENT_SEED, |acc, &b| acc.wrapping_sub(b))
}

/// Computes the global checksum over `bytes`, given the complement that will
/// be stored alongside it.
///
/// Every byte counts except the complement and the two checksum bytes; the
/// complement is then added in on its own.
pub fn compute_checksum(bytes: &[u8], complement: u8) -> u16 {
  let skip = Field::Complement.offset()..=Field::ChecksumLo.offset();
  bytes
    .iter()
    .enumerate()
    .filter(|(i, _)| !skip.contains(i))
    .fold(complement as u16, |acc, (_, &b)| acc.wrapping_add(b as u16))
}

/// Recomputes the header complement and the global checksum, writing each
/// only if it differs from what is stored.
///
/// Returns the checksum event followed by the complement event.
pub fn checksum(image: &mut Image) -> Result<[Event; 2]> {
  image.check()?;

  let complement = compute_complement(image.as_bytes());
  let checksum = compute_checksum(image.as_bytes(), complement);
  debug!(complement, checksum, "computed header checksums");

  let old = image.stored_checksum();
  let checksum_event = if old == checksum {
    Event::ChecksumOk
  } else {
    let [hi, lo] = checksum.to_be_bytes();
    image.set_field(Field::ChecksumHi, hi);
    image.set_field(Field::ChecksumLo, lo);
    Event::ChecksumChanged { old, new: checksum }
  };
  info!("{}", checksum_event);

  let old = image.field(Field::Complement);
  let complement_event = if old == complement {
    Event::ComplementOk
  } else {
    image.set_field(Field::Complement, complement);
    Event::ComplementChanged {
      old,
      new: complement,
    }
  };
  info!("{}", complement_event);

  Ok([checksum_event, complement_event])
}

#[cfg(test)]
mod test {
  use super::*;

  use proptest::prelude::*;

  use crate::edit;
  use crate::header::MIN_LEN;

  fn image(len: usize) -> Image {
    Image::new(vec![0; len]).unwrap()
  }

  /// The number of logo bytes a zeroed logo gets wrong; six of them are
  /// already `$00`.
  fn nonzero_logo_bytes() -> usize {
    LOGO.iter().filter(|&&b| b != 0).count()
  }

  #[test]
  fn logo_all_zero() {
    let mut img = image(MIN_LEN);
    assert_eq!(nonzero_logo_bytes(), 42);
    assert_eq!(
      logo(&mut img).unwrap(),
      Event::Logo {
        changed: nonzero_logo_bytes()
      }
    );
    assert_eq!(&img.as_bytes()[0x104..0x134], &LOGO[..]);
    assert_eq!(logo(&mut img).unwrap(), Event::Logo { changed: 0 });
  }

  #[test]
  fn logo_partial() {
    let mut img = image(MIN_LEN);
    img.as_bytes_mut()[0x104..0x134].copy_from_slice(&LOGO);
    img.as_bytes_mut()[0x110] ^= 0xff;
    img.as_bytes_mut()[0x133] = 0;
    assert_eq!(logo(&mut img).unwrap(), Event::Logo { changed: 2 });
  }

  #[test]
  fn rom_size_codes() {
    let mut img = image(0x8000);
    img.set_field(Field::RomSize, 0x05);
    assert_eq!(
      rom_size(&mut img).unwrap(),
      Event::RomSizeChanged { old: 5, new: 0 }
    );
    assert_eq!(img.field(Field::RomSize), 0);

    let mut img = image(0x10000);
    rom_size(&mut img).unwrap();
    assert_eq!(img.field(Field::RomSize), 1);
    assert_eq!(rom_size(&mut img).unwrap(), Event::RomSizeOk);
  }

  #[test]
  fn cart_type_rule() {
    let mut img = image(0x8000);
    assert_eq!(cart_type(&mut img).unwrap(), Event::CartTypeOk);
    assert_eq!(img.field(Field::CartType), 0x00);

    let mut img = image(0x8001);
    assert_eq!(cart_type(&mut img).unwrap(), Event::CartTypeChanged);
    assert_eq!(img.field(Field::CartType), 0x01);

    let mut img = image(0x10000);
    img.set_field(Field::CartType, 0x13);
    assert_eq!(cart_type(&mut img).unwrap(), Event::CartTypeOk);
    assert_eq!(img.field(Field::CartType), 0x13);
  }

  #[test]
  fn complement_of_zeroes() {
    let img = image(MIN_LEN);
    assert_eq!(compute_complement(img.as_bytes()), 0xe7);
  }

  #[test]
  fn checksum_skips_its_own_bytes() {
    let mut img = image(MIN_LEN);
    img.set_field(Field::Complement, 0x55);
    img.set_field(Field::ChecksumHi, 0x66);
    img.set_field(Field::ChecksumLo, 0x77);
    assert_eq!(compute_checksum(img.as_bytes(), 0xe7), 0x00e7);
  }

  #[test]
  fn checksum_writes_big_endian() {
    let mut img = image(MIN_LEN);
    img.set_field(Field::Title, 0x01);
    let events = checksum(&mut img).unwrap();
    // complement = $e7 - 1 = $e6; checksum = 1 + $e6.
    assert_eq!(
      events,
      [
        Event::ChecksumChanged { old: 0, new: 0x00e7 },
        Event::ComplementChanged { old: 0, new: 0xe6 },
      ]
    );
    assert_eq!(img.field(Field::ChecksumHi), 0x00);
    assert_eq!(img.field(Field::ChecksumLo), 0xe7);
    assert_eq!(img.field(Field::Complement), 0xe6);
  }

  #[test]
  fn checksum_wraps() {
    let mut img = Image::new(vec![0xff; 0x200]).unwrap();
    let complement = compute_complement(img.as_bytes());
    // 25 bytes of $ff in title..=version.
    assert_eq!(complement, 0xe7u8.wrapping_sub((25 * 0xff) as u8));
    let expected = ((0x200 - 3) * 0xff + complement as usize) as u16;
    checksum(&mut img).unwrap();
    assert_eq!(img.stored_checksum(), expected);
  }

  #[test]
  fn padded_blank_image() {
    let mut img = image(MIN_LEN);
    edit::pad(&mut img, 0xff).unwrap();
    let events = validate(&mut img).unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(
      events[0],
      Event::Logo {
        changed: nonzero_logo_bytes()
      }
    );
    assert_eq!(&img.as_bytes()[0x104..0x134], &LOGO[..]);
    assert_eq!(events[1], Event::RomSizeOk);
    assert_eq!(events[2], Event::CartTypeOk);

    let bytes = img.as_bytes();
    assert_eq!(img.field(Field::RomSize), 0);
    assert_eq!(img.field(Field::CartType), 0);
    assert_eq!(img.field(Field::Complement), 0xe7);

    let logo_sum = LOGO.iter().map(|&b| b as u16).fold(0u16, u16::wrapping_add);
    let pad_sum = ((0x8000 - MIN_LEN) * 0xff) as u16;
    let expected = logo_sum.wrapping_add(pad_sum).wrapping_add(0xe7);
    assert_eq!(img.stored_checksum(), expected);
    assert_eq!(compute_checksum(bytes, 0xe7), expected);
  }

  fn arb_image() -> impl Strategy<Value = Image> {
    (MIN_LEN..0x1000usize)
      .prop_flat_map(|len| proptest::collection::vec(any::<u8>(), len))
      .prop_map(|bytes| Image::new(bytes).unwrap())
  }

  proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn validate_is_idempotent(mut img in arb_image()) {
      validate(&mut img).unwrap();
      let once = img.clone();
      let events = validate(&mut img).unwrap();
      prop_assert!(events.iter().all(|e| !e.is_change()), "{:?}", events);
      prop_assert_eq!(img, once);
    }

    #[test]
    fn checksum_sees_every_covered_byte(
      mut img in arb_image(),
      pick: prop::sample::Index,
      delta in 1u8..,
    ) {
      // A byte under the complement moves the complement by the opposite
      // amount, which can cancel out in the checksum.
      let skip = Field::Title.offset()..=Field::ChecksumLo.offset();
      let covered = (0..img.len()).filter(|i| !skip.contains(i)).collect::<Vec<_>>();
      let offset = covered[pick.index(covered.len())];

      checksum(&mut img).unwrap();
      let before = img.stored_checksum();

      let byte = img.at(offset).unwrap();
      *byte = byte.wrapping_add(delta);
      checksum(&mut img).unwrap();
      prop_assert_ne!(img.stored_checksum(), before);
    }
  }
}
