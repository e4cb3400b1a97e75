use crate::error::Result;
use crate::header::Id3v2Version;
use crate::items::verify_encoding;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// Decode a text information frame body into its string value
///
/// NOTE: This expects the frame header to have already been consumed
///
/// # Errors
///
/// * Unable to decode the text
///
/// ID3v2.2:
///
/// * The encoding is not Latin-1 or UTF-16
pub(crate) fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<String>>
where
	R: Read,
{
	let Ok(encoding_byte) = reader.read_u8() else {
		return Ok(None);
	};

	let encoding = verify_encoding(encoding_byte, version)?;
	let value = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?.content;

	Ok(Some(value))
}

/// Encode `value` into a text frame body
///
/// The most compact encoding able to represent the text is used, and its marker byte
/// leads the body.
pub(crate) fn as_bytes(value: &str) -> Result<Vec<u8>> {
	let encoding = TextEncoding::preferred_for(value);

	let mut content = encoding.encode(value, false)?;
	content.insert(0, encoding as u8);
	Ok(content)
}
