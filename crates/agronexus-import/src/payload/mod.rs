//! Import payload reading: byte decoding and delimited-text parsing.

mod decode;
mod parse;

pub use decode::{decode_payload, read_payload_file};
pub use parse::{ParsedRow, ParsedRows, parse_payload};
