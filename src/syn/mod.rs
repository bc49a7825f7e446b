//! Byte-literal syntax.
//!
//! Byte values given on the command line or in an options file may be written
//! as decimal, binary, or hexadecimal:
//! - Decimal: `0`, `255`.
//! - Binary: `%1010` (assembler-style), `0b1010` (C-style).
//! - Hexadecimal: `$ff` (assembler-style), `0xff` (C-style); case-insensitive.
//!
//! Underscores may be interspersed throughout a literal, except as the first
//! digit, to separate groups of digits: `%1111_0000`. A literal must fit in a
//! byte; `256` is an error, not `0`.

mod parse;

pub use parse::parse_byte;
