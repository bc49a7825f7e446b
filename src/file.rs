//! Reading and writing image files.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::error::Result;
use crate::image::Image;

/// Loads the image at `path`.
///
/// The file must exist, be a regular file, be both readable and writable
/// (since it will be rewritten in place), and hold at least a header.
pub fn load(path: &Path) -> Result<Image> {
  let meta = fs::metadata(path).map_err(open_error)?;
  if !meta.is_file() {
    return Err(Error::NotAFile);
  }

  let mut file = open(path, OpenOptions::new().read(true).write(true))?;
  let mut bytes = Vec::with_capacity(meta.len() as usize);
  file.read_to_end(&mut bytes)?;
  debug!(path = %path.display(), len = bytes.len(), "read image");
  Image::new(bytes)
}

/// Writes `image` to `path`, replacing the file's contents.
pub fn store(path: &Path, image: &Image) -> Result<()> {
  image.check()?;

  let mut file = open(path, OpenOptions::new().write(true).truncate(true))?;
  file.write_all(image.as_bytes())?;
  file.sync_all()?;
  debug!(path = %path.display(), len = image.len(), "wrote image");
  Ok(())
}

/// Opens `path`, reporting a refused open as [`Error::ReadOnly`].
///
/// [`Error::ReadOnly`]: ../error/enum.Error.html#variant.ReadOnly
fn open(path: &Path, opts: &OpenOptions) -> Result<File> {
  opts.open(path).map_err(open_error)
}

fn open_error(e: io::Error) -> Error {
  match e.kind() {
    io::ErrorKind::NotFound => Error::NotFound,
    io::ErrorKind::PermissionDenied => Error::ReadOnly,
    _ => Error::Io(e),
  }
}
