//! gbfix, a Game Boy ROM header patching and repair tool.
//!
//! The crate is organized bottom-up: [`header`] describes the fixed layout of
//! the cartridge header, [`image`] owns the bytes of a ROM, [`edit`] and
//! [`validate`] mutate them, and [`pipeline`] strings those passes together in
//! the order an [`options::Options`] asks for.
//!
//! [`header`]: header/index.html
//! [`image`]: image/index.html
//! [`edit`]: edit/index.html
//! [`validate`]: validate/index.html
//! [`pipeline`]: pipeline/index.html
//! [`options::Options`]: options/struct.Options.html

#![deny(missing_docs)]
#![deny(unused)]
#![deny(warnings)]
#![deny(unsafe_code)]

pub mod edit;
pub mod error;
pub mod file;
pub mod header;
pub mod image;
pub mod info;
pub mod mbc;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod syn;
pub mod validate;
