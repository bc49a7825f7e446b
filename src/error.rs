//! Errors, and their display to the user.
//!
//! Nearly every header operation is total: it either finds a field already
//! correct or rewrites it. What can go wrong is the image not being big enough
//! to hold a header, and everything around the core: reading and writing the
//! file, and understanding the user's options.
//!
//! [`Error`] is the error type returned throughout the crate; a [`Diagnostic`]
//! attaches the file and the [`Action`] in progress, for printing.
//!
//! [`Error`]: enum.Error.html
//! [`Diagnostic`]: struct.Diagnostic.html
//! [`Action`]: enum.Action.html

use std::io;
use std::path::Path;

use crate::header::MIN_LEN;

/// A `Result` whose error type is [`Error`].
///
/// [`Error`]: enum.Error.html
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error produced by `gbfix`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Indicates that an image is too short to hold a header.
  #[error("image is {len} bytes long, but a header needs at least {} bytes", MIN_LEN)]
  TooSmall {
    /// The length of the offending image.
    len: usize,
  },
  /// Indicates that a write would run past the end of the image.
  #[error("cannot write {len} bytes at {offset:#06x}: past the end of the image")]
  OutOfBounds {
    /// The offset the write started at.
    offset: usize,
    /// The number of bytes that were to be written.
    len: usize,
  },
  /// Indicates that the image path does not exist.
  #[error("file does not exist")]
  NotFound,
  /// Indicates that the image path names something other than a file.
  #[error("specified image is not a file")]
  NotAFile,
  /// Indicates that the image cannot be written back.
  #[error("file cannot be read and/or written")]
  ReadOnly,
  /// An I/O error while reading or writing the image.
  #[error(transparent)]
  Io(#[from] io::Error),
  /// A malformed options file.
  #[error("bad options file: {0}")]
  Config(#[from] json5::Error),
  /// A malformed byte literal.
  #[error("bad byte value `{0}`")]
  BadByte(String),
  /// A well-formed, but unusable, combination of options.
  #[error("{0}")]
  BadOptions(String),
}

/// An action that `gbfix` performs, which an error may be associated with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
  /// Reading the options file.
  Configuring,
  /// Reading the image from disk.
  Loading,
  /// Padding, truncating, or setting header fields.
  Patching,
  /// Repairing the header.
  Validating,
  /// Writing the image back to disk.
  Writing,
}

impl Action {
  fn describe(self) -> &'static str {
    match self {
      Self::Configuring => "configuring from",
      Self::Loading => "loading",
      Self::Patching => "patching",
      Self::Validating => "validating",
      Self::Writing => "writing",
    }
  }
}

/// An [`Error`] together with where and when it happened.
///
/// [`Error`]: enum.Error.html
#[derive(Debug)]
pub struct Diagnostic<'a> {
  /// The error itself.
  pub error: Error,
  /// The action being performed.
  pub action: Action,
  /// The file being worked on.
  pub file: &'a Path,
}

impl<'a> Diagnostic<'a> {
  /// Creates a new `Diagnostic`.
  pub fn new(error: Error, action: Action, file: &'a Path) -> Self {
    Self {
      error,
      action,
      file,
    }
  }

  /// Dumps this diagnostic as user-displayable text into `sink`.
  pub fn dump_to(&self, mut sink: impl io::Write) -> io::Result<()> {
    writeln!(sink, "error: {}", self.error)?;
    writeln!(
      sink,
      "  while {} {}",
      self.action.describe(),
      self.file.display()
    )
  }

  /// Calls `dump_to()` on `stderr`, then exits the process with `code`.
  pub fn dump_and_die(self, code: i32) -> ! {
    // If stderr is gone there is nobody left to tell.
    let _ = self.dump_to(io::stderr());
    std::process::exit(code)
  }
}
