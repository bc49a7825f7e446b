//! Applying a set of [`Options`] to an image.
//!
//! [`Options`]: ../options/struct.Options.html

use tracing::info_span;

use crate::edit;
use crate::error::Action;
use crate::error::Error;
use crate::image::Image;
use crate::options::Options;
use crate::report::Event;
use crate::validate;

/// Applies every operation requested in `opts` to `image`, in the fixed order
/// pad, truncate, title, CGB compatible, CGB only, cartridge type, RAM size,
/// validate.
///
/// On error, returns the [`Action`] that failed along with the error; the
/// image may have been partially modified.
///
/// [`Action`]: ../error/enum.Action.html
pub fn process(
  image: &mut Image,
  opts: &Options,
) -> Result<Vec<Event>, (Action, Error)> {
  let mut events = Vec::new();

  {
    let _span = info_span!("patch").entered();
    let patching = |e| (Action::Patching, e);

    if let Some(value) = opts.pad {
      events.push(edit::pad(image, value).map_err(patching)?);
    }
    if opts.truncate {
      events.push(edit::truncate(image).map_err(patching)?);
    }
    if let Some(title) = &opts.title {
      events.push(edit::set_title(image, title).map_err(patching)?);
    }
    if opts.gbc_compatible {
      events.push(edit::set_gbc_compatible(image).map_err(patching)?);
    }
    if opts.gbc_only {
      events.push(edit::set_gbc_only(image).map_err(patching)?);
    }
    if let Some(ty) = opts.mbc_type {
      events.push(edit::set_mbc_type(image, ty).map_err(patching)?);
    }
    if let Some(size) = opts.ram_size {
      events.push(edit::set_ram_size(image, size).map_err(patching)?);
    }
  }

  if opts.validate {
    let _span = info_span!("validate").entered();
    let found =
      validate::validate(image).map_err(|e| (Action::Validating, e))?;
    events.extend(found);
  }

  Ok(events)
}

#[cfg(test)]
mod test {
  use super::*;

  use crate::header::Field;
  use crate::header::LOGO;
  use crate::header::MIN_LEN;

  #[test]
  fn blank_image_end_to_end() {
    let mut image = Image::new(vec![0; MIN_LEN]).unwrap();
    let opts = Options {
      pad: Some(0xff),
      validate: true,
      ..Options::default()
    };
    let events = process(&mut image, &opts).unwrap();

    assert_eq!(image.len(), 0x8000);
    assert!(image.as_bytes()[MIN_LEN..].iter().all(|&b| b == 0xff));
    assert_eq!(&image.as_bytes()[0x104..0x134], &LOGO[..]);
    assert_eq!(image.field(Field::RomSize), 0);
    assert_eq!(image.field(Field::CartType), 0);
    assert_eq!(image.field(Field::Complement), 0xe7);
    assert_eq!(image.stored_checksum(), 0x477d);

    assert_eq!(events.len(), 6);
    let changed = LOGO.iter().filter(|&&b| b != 0).count();
    assert_eq!(events[1], Event::Logo { changed });

    let again = process(
      &mut image,
      &Options {
        validate: true,
        ..Options::default()
      },
    )
    .unwrap();
    assert!(again.iter().all(|e| !e.is_change()));
  }

  #[test]
  fn fixed_order() {
    let mut image = Image::new(vec![0; 0x9000]).unwrap();
    let opts = Options {
      validate: true,
      mbc_type: Some(0x00),
      gbc_only: true,
      gbc_compatible: true,
      title: Some("ORDER".into()),
      truncate: true,
      pad: Some(0x00),
      ram_size: Some(0x02),
    };
    let events = process(&mut image, &opts).unwrap();

    assert_eq!(
      &events[..7],
      &[
        Event::Padded {
          from: 0x9000,
          to: 0x10000,
          value: 0
        },
        Event::NoTruncationNeeded,
        Event::TitleSet("ORDER".into()),
        Event::GbcCompatibleSet,
        Event::GbcOnlySet,
        Event::MbcTypeSet(0x00),
        Event::RamSizeSet(0x02),
      ][..]
    );

    // Validation runs last, so it sees (and repairs) the $00 type byte.
    assert_eq!(events[9], Event::CartTypeChanged);
    assert_eq!(image.field(Field::CartType), 0x01);
    assert_eq!(image.field(Field::CgbFlag), 0xc0);
    assert_eq!(image.field(Field::RomSize), 1);
  }

  #[test]
  fn title_past_the_end_is_a_patch_error() {
    let mut image = Image::new(vec![0; MIN_LEN]).unwrap();
    let opts = Options {
      title: Some("X".repeat(40)),
      ..Options::default()
    };
    assert!(matches!(
      process(&mut image, &opts),
      Err((Action::Patching, Error::OutOfBounds { .. }))
    ));
  }
}
