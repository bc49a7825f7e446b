//! The pest parser behind [`parse_byte()`](../fn.parse_byte.html).

use pest::Parser as _;
use pest_derive::Parser;

use crate::error::Error;
use crate::error::Result;

#[derive(Parser)]
#[grammar = "syn/grammar.pest"]
struct PegParser;

/// Parses `src` as a byte literal.
pub fn parse_byte(src: &str) -> Result<u8> {
  let bad = || Error::BadByte(src.to_string());

  let byte = PegParser::parse(Rule::Byte, src)
    .map_err(|_| bad())?
    .next()
    .ok_or_else(bad)?;
  let int = byte.into_inner().next().ok_or_else(bad)?;

  let radix = match int.as_rule() {
    Rule::IntDec => 10,
    Rule::IntHex => 16,
    Rule::IntBin => 2,
    _ => return Err(bad()),
  };
  let token = int.into_inner().last().ok_or_else(bad)?;
  let digits = token
    .as_str()
    .chars()
    .filter(|&c| c != '_')
    .collect::<String>();

  u8::from_str_radix(&digits, radix).map_err(|_| bad())
}
