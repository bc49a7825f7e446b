//! The cartridge type catalog.
//!
//! The byte at `$0147` selects the memory bank controller and the extra
//! hardware on the cartridge. This tool does not interpret it beyond giving
//! each known value a label.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

/// The label used for type bytes missing from the catalog.
pub const UNKNOWN: &str = "Unknown";

lazy_static! {
  static ref CATALOG: BTreeMap<u8, &'static str> = {
    let mut m = BTreeMap::new();
    m.insert(0x00, "No MBC -- ROM Only");
    m.insert(0x01, "MBC 0x01 -- ROM Only");
    m.insert(0x02, "MBC 0x01 -- ROM & RAM");
    m.insert(0x03, "MBC 0x01 -- ROM & RAM & Battery");
    m.insert(0x05, "MBC 0x02 -- ROM Only");
    m.insert(0x06, "MBC 0x02 -- ROM & Battery");
    m.insert(0x08, "ROM & RAM");
    m.insert(0x09, "ROM & RAM & Battery");
    m.insert(0x0b, "MMM01 -- ROM Only");
    m.insert(0x0c, "MMM01 -- ROM & RAM");
    m.insert(0x0d, "MMM01 -- ROM & RAM & Battery");
    m.insert(0x0f, "MBC 0x03 -- ROM & Timer & Battery");
    m.insert(0x10, "MBC 0x03 -- ROM & RAM & Timer & Battery");
    m.insert(0x11, "MBC 0x03 -- ROM Only");
    m.insert(0x12, "MBC 0x03 -- ROM & RAM");
    m.insert(0x13, "MBC 0x03 -- ROM & RAM & Battery");
    m.insert(0x15, "MBC 0x04 -- ROM Only");
    m.insert(0x16, "MBC 0x04 -- ROM & RAM");
    m.insert(0x17, "MBC 0x04 -- ROM & RAM & Battery");
    m.insert(0x19, "MBC 0x05 -- ROM Only");
    m.insert(0x1a, "MBC 0x05 -- ROM & RAM");
    m.insert(0x1b, "MBC 0x05 -- ROM & RAM & Battery");
    m.insert(0x1c, "MBC 0x05 -- ROM & Rumble");
    m.insert(0x1d, "MBC 0x05 -- ROM & RAM & Rumble");
    m.insert(0x1e, "MBC 0x05 -- ROM & RAM & Battery & Rumble");
    m.insert(0xfc, "Pocket Camera");
    m.insert(0xfd, "Bandai TAMA5");
    m.insert(0xfe, "HuC 3");
    m.insert(0xff, "HuC 1 -- ROM & RAM & Battery");
    m
  };
}

/// Returns the label for the cartridge type `ty`, or [`UNKNOWN`].
///
/// [`UNKNOWN`]: constant.UNKNOWN.html
pub fn describe(ty: u8) -> &'static str {
  CATALOG.get(&ty).copied().unwrap_or(UNKNOWN)
}

/// Returns an iterator over every cataloged type byte and its label, in
/// ascending order.
pub fn catalog() -> impl Iterator<Item = (u8, &'static str)> {
  CATALOG.iter().map(|(&k, &v)| (k, v))
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn known_and_unknown() {
    assert_eq!(describe(0x00), "No MBC -- ROM Only");
    assert_eq!(describe(0x1b), "MBC 0x05 -- ROM & RAM & Battery");
    assert_eq!(describe(0xff), "HuC 1 -- ROM & RAM & Battery");
    assert_eq!(describe(0x04), UNKNOWN);
    assert_eq!(describe(0x20), UNKNOWN);
  }

  #[test]
  fn catalog_is_sorted() {
    let keys = catalog().map(|(k, _)| k).collect::<Vec<_>>();
    assert_eq!(keys.len(), 29);
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
  }
}
