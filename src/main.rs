//! The `gbfix` command-line tool.

#![deny(missing_docs)]
#![deny(unused)]
#![deny(warnings)]
#![deny(unsafe_code)]

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use structopt::StructOpt;
use tracing::info;
use tracing::Level;

use gbfix::error::Action;
use gbfix::error::Diagnostic;
use gbfix::error::Error;
use gbfix::file;
use gbfix::info::Summary;
use gbfix::mbc;
use gbfix::options::Options;
use gbfix::pipeline;
use gbfix::syn::parse_byte;

/// Patches and repairs the header of a Game Boy ROM image, in place.
///
/// Byte values may be written as `255`, `$ff`, `0xff`, `%11111111`, or
/// `0b11111111`. Whatever order the flags are given in, operations run as:
/// pad, truncate, title, CGB flags, MBC type, RAM size, validate.
#[derive(StructOpt, Debug)]
#[structopt(name = "gbfix")]
struct Opts {
  /// Pad the image to a power-of-two size with this byte.
  #[structopt(short, long, parse(try_from_str = parse_byte))]
  pad: Option<u8>,

  /// Truncate the image to a power-of-two size.
  #[structopt(short, long)]
  truncate: bool,

  /// Set the cartridge title (at most 16 bytes).
  #[structopt(short = "T", long)]
  title: Option<String>,

  /// Mark the image as Color Game Boy compatible ($80).
  #[structopt(short = "c", long)]
  gbc_compatible: bool,

  /// Mark the image as Color Game Boy only ($c0).
  #[structopt(short = "o", long)]
  gbc_only: bool,

  /// Set the cartridge (MBC) type byte.
  #[structopt(short, long, parse(try_from_str = parse_byte))]
  mbc_type: Option<u8>,

  /// Set the RAM size byte.
  #[structopt(short, long, parse(try_from_str = parse_byte))]
  ram_size: Option<u8>,

  /// Repair the logo, ROM size, cartridge type, and checksums.
  #[structopt(short, long)]
  validate: bool,

  /// Do everything except write the image back.
  #[structopt(short = "n", long)]
  dry_run: bool,

  /// Read further options from a JSON5 file; flags given here win.
  #[structopt(long, parse(from_os_str))]
  config: Option<PathBuf>,

  /// Print the image's header before changing anything.
  #[structopt(long)]
  info: bool,

  /// List every known cartridge type byte, then exit.
  #[structopt(long)]
  list_mbc_types: bool,

  /// Log level (trace, debug, info, warn, error).
  #[structopt(short, long, default_value = "info")]
  log_level: Level,

  /// Only log warnings and errors.
  #[structopt(short, long)]
  quiet: bool,

  /// The ROM image to patch.
  #[structopt(parse(from_os_str), required_unless = "list-mbc-types")]
  image: Option<PathBuf>,
}

impl Opts {
  fn operations(&self) -> Options {
    Options {
      pad: self.pad,
      truncate: self.truncate,
      title: self.title.clone(),
      gbc_compatible: self.gbc_compatible,
      gbc_only: self.gbc_only,
      mbc_type: self.mbc_type,
      ram_size: self.ram_size,
      validate: self.validate,
    }
  }
}

fn main() {
  let opts = Opts::from_args();

  let level = if opts.quiet { Level::WARN } else { opts.log_level };
  let subscriber = tracing_subscriber::fmt()
    .with_max_level(level)
    .with_target(false)
    .without_time()
    .with_writer(io::stderr)
    .compact()
    .finish();
  if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
    eprintln!("warning: could not install logger: {}", e);
  }

  if opts.list_mbc_types {
    for (ty, label) in mbc::catalog() {
      println!("{:#04x}  {}", ty, label);
    }
    return;
  }

  let path = match &opts.image {
    Some(path) => path.as_path(),
    None => return,
  };

  let operations = match &opts.config {
    Some(config) => {
      let from_file = fs::read_to_string(config)
        .map_err(Error::from)
        .and_then(|text| Options::from_json5(&text))
        .unwrap_or_else(|e| {
          Diagnostic::new(e, Action::Configuring, config).dump_and_die(1)
        });
      from_file.merge(opts.operations())
    }
    None => opts.operations(),
  };

  if let Err(e) = run(path, &operations, opts.info, opts.dry_run) {
    e.dump_and_die(1);
  }
}

fn run<'a>(
  path: &'a Path,
  operations: &Options,
  show_info: bool,
  dry_run: bool,
) -> Result<(), Diagnostic<'a>> {
  let configuring = |e| Diagnostic::new(e, Action::Configuring, path);
  operations.check().map_err(configuring)?;
  if operations.is_empty() && !show_info {
    return Err(configuring(Error::BadOptions(
      "no operations requested".into(),
    )));
  }

  let mut image =
    file::load(path).map_err(|e| Diagnostic::new(e, Action::Loading, path))?;

  if show_info {
    println!("{}", Summary::new(&image));
    image
      .dump(io::stdout())
      .map_err(|e| Diagnostic::new(e.into(), Action::Loading, path))?;
  }
  if operations.is_empty() {
    return Ok(());
  }

  let events = pipeline::process(&mut image, operations)
    .map_err(|(action, e)| Diagnostic::new(e, action, path))?;
  let changes = events.iter().filter(|e| e.is_change()).count();

  if dry_run {
    info!("Dry run: {} change(s) not written", changes);
    return Ok(());
  }
  file::store(path, &image)
    .map_err(|e| Diagnostic::new(e, Action::Writing, path))?;
  info!("Wrote {} change(s) to {}", changes, path.display());
  Ok(())
}
