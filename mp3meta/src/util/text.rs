use crate::error::{Error, ErrorKind, Result};
use crate::macros::err;

use std::io::Read;

use byteorder::ReadBytesExt;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	pub(crate) fn verify_latin1(text: &str) -> bool {
		text.chars().all(|c| c as u32 <= 255)
	}

	/// The most compact encoding able to represent `text`
	///
	/// Latin-1 when every character fits, otherwise UTF-16 with a byte order mark.
	pub(crate) fn preferred_for(text: &str) -> Self {
		if Self::verify_latin1(text) {
			Self::Latin1
		} else {
			Self::UTF16
		}
	}

	pub(crate) fn encode(self, text: &str, terminated: bool) -> Result<Vec<u8>> {
		match self {
			TextEncoding::Latin1 => {
				let mut out = Vec::with_capacity(text.len() + usize::from(terminated));
				for c in text.chars() {
					if c as u32 > 255 {
						err!(TextEncode("Latin-1 cannot represent the given text"));
					}

					out.push(c as u8);
				}

				if terminated {
					out.push(0);
				}

				Ok(out)
			},
			TextEncoding::UTF16 => Ok(utf16_encode(text, u16::to_le_bytes, true, terminated)),
			TextEncoding::UTF16BE => Ok(utf16_encode(text, u16::to_be_bytes, false, terminated)),
			TextEncoding::UTF8 => {
				let mut out = text.as_bytes().to_vec();

				if terminated {
					out.push(0);
				}

				Ok(out)
			},
		}
	}
}

#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodeTextResult {
	pub(crate) content: String,
	pub(crate) bytes_read: usize,
	pub(crate) bom: [u8; 2],
}

impl DecodeTextResult {
	pub(crate) fn text_or_none(self) -> Option<String> {
		if self.content.is_empty() {
			return None;
		}

		Some(self.content)
	}
}

/// Specify how to decode the provided text
///
/// By default, this will:
///
/// * Use [`TextEncoding::UTF8`] as the encoding
/// * Not expect the text to be null terminated
/// * Have no byte order mark
#[derive(Copy, Clone, Debug)]
pub(crate) struct TextDecodeOptions {
	pub encoding: TextEncoding,
	pub terminated: bool,
	pub bom: [u8; 2],
}

impl TextDecodeOptions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn encoding(mut self, encoding: TextEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub(crate) fn terminated(mut self, terminated: bool) -> Self {
		self.terminated = terminated;
		self
	}

	pub(crate) fn bom(mut self, bom: [u8; 2]) -> Self {
		self.bom = bom;
		self
	}
}

impl Default for TextDecodeOptions {
	fn default() -> Self {
		Self {
			encoding: TextEncoding::UTF8,
			terminated: false,
			bom: [0, 0],
		}
	}
}

pub(crate) fn decode_text<R>(reader: &mut R, options: TextDecodeOptions) -> Result<DecodeTextResult>
where
	R: Read,
{
	let raw_bytes;
	let bytes_read;

	if options.terminated {
		let (bytes, terminator_len) = read_to_terminator(reader, options.encoding);

		if bytes.is_empty() {
			return Ok(DecodeTextResult {
				bytes_read: terminator_len,
				..DecodeTextResult::default()
			});
		}

		bytes_read = bytes.len() + terminator_len;
		raw_bytes = bytes;
	} else {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes)?;

		if bytes.is_empty() {
			return Ok(DecodeTextResult::default());
		}

		bytes_read = bytes.len();
		raw_bytes = bytes;
	}

	let mut bom = [0, 0];
	let content = match options.encoding {
		TextEncoding::Latin1 => latin1_decode(&raw_bytes),
		TextEncoding::UTF16 => {
			if raw_bytes.len() < 2 {
				err!(TextDecode("UTF-16 string has an invalid length (< 2)"));
			}

			if raw_bytes.len() % 2 != 0 {
				err!(TextDecode("UTF-16 string has an odd length"));
			}

			match (raw_bytes[0], raw_bytes[1]) {
				(0xFE, 0xFF) => {
					bom = [0xFE, 0xFF];
					utf16_decode_bytes(&raw_bytes[2..], u16::from_be_bytes)?
				},
				(0xFF, 0xFE) => {
					bom = [0xFF, 0xFE];
					utf16_decode_bytes(&raw_bytes[2..], u16::from_le_bytes)?
				},
				// Some encoders only write a BOM for the first string of a frame, the
				// remaining strings are assumed to share its byte order. The caller
				// passes the first string's BOM through `options`.
				_ => match options.bom {
					[0xFE, 0xFF] => {
						bom = options.bom;
						utf16_decode_bytes(&raw_bytes, u16::from_be_bytes)?
					},
					[0xFF, 0xFE] => {
						bom = options.bom;
						utf16_decode_bytes(&raw_bytes, u16::from_le_bytes)?
					},
					_ => err!(TextDecode("UTF-16 string has an invalid byte order mark")),
				},
			}
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(&raw_bytes, u16::from_be_bytes)?,
		TextEncoding::UTF8 => utf8_decode(raw_bytes)?,
	};

	Ok(DecodeTextResult {
		content,
		bytes_read,
		bom,
	})
}

pub(crate) fn read_to_terminator<R>(reader: &mut R, encoding: TextEncoding) -> (Vec<u8>, usize)
where
	R: Read,
{
	let mut text_bytes = Vec::new();
	let mut terminator_len = 0;

	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			while let Ok(byte) = reader.read_u8() {
				if byte == 0 {
					terminator_len = 1;
					break;
				}

				text_bytes.push(byte)
			}
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			while let (Ok(b1), Ok(b2)) = (reader.read_u8(), reader.read_u8()) {
				if b1 == 0 && b2 == 0 {
					terminator_len = 2;
					break;
				}

				text_bytes.push(b1);
				text_bytes.push(b2)
			}
		},
	}

	(text_bytes, terminator_len)
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| *c as char).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| Error::new(ErrorKind::TextDecode("Expected a UTF-8 string")))
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	let words = bytes
		.chunks_exact(2)
		// It is possible to have multiple UTF-16 strings separated by null, which also
		// makes it possible to encounter multiple BOMs in a single string. They have to
		// be filtered out.
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			_ => Some(endianness([c[0], c[1]])),
		})
		.collect::<Vec<u16>>();

	String::from_utf16(&words)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| Error::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}

#[cfg(test)]
mod tests {
	use super::{TextDecodeOptions, TextEncoding};
	use std::io::Cursor;

	const TEST_STRING: &str = "m\u{00e9}ta\u{00ff}";

	#[test_log::test]
	fn text_decode() {
		// No BOM
		let utf16_decode = super::utf16_decode_bytes(
			&[
				0x00, 0x6D, 0x00, 0xE9, 0x00, 0x74, 0x00, 0x61, 0x00, 0xFF, 0x00, 0x00,
			],
			u16::from_be_bytes,
		)
		.unwrap();

		assert_eq!(utf16_decode, TEST_STRING.to_string());

		// BOM test
		let be_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFE, 0xFF, 0x00, 0x6D, 0x00, 0xE9, 0x00, 0x74, 0x00, 0x61, 0x00, 0xFF, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();
		let le_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFF, 0xFE, 0x6D, 0x00, 0xE9, 0x00, 0x74, 0x00, 0x61, 0x00, 0xFF, 0x00, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();

		assert_eq!(be_utf16_decode.content, le_utf16_decode.content);
		assert_eq!(be_utf16_decode.bytes_read, le_utf16_decode.bytes_read);
		assert_eq!(be_utf16_decode.content, TEST_STRING.to_string());

		let utf8_decode = super::decode_text(
			&mut TEST_STRING.as_bytes(),
			TextDecodeOptions::new().encoding(TextEncoding::UTF8),
		)
		.unwrap();

		assert_eq!(utf8_decode.content, TEST_STRING.to_string());
	}

	#[test_log::test]
	fn empty_text_fragment() {
		let empty_text_fragment = super::decode_text(
			&mut Cursor::new(&[0x00, 0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x00]),
			TextDecodeOptions::new()
				.encoding(TextEncoding::UTF8)
				.terminated(true),
		)
		.unwrap();

		assert_eq!(empty_text_fragment.content, "");
		assert_eq!(empty_text_fragment.bytes_read, 1);
	}

	#[test_log::test]
	fn bom_carries_over_to_unmarked_strings() {
		// Terminated description with a BOM, then a continuation with none
		let mut reader = Cursor::new(&[
			0xFE, 0xFF, 0x00, 0x68, 0x00, 0x69, 0x00, 0x00, 0x00, 0x79, 0x00, 0x6F,
		]);

		let description = super::decode_text(
			&mut reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::UTF16)
				.terminated(true),
		)
		.unwrap();
		assert_eq!(description.content, "hi");
		assert_eq!(description.bom, [0xFE, 0xFF]);

		let content = super::decode_text(
			&mut reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::UTF16)
				.bom(description.bom),
		)
		.unwrap();
		assert_eq!(content.content, "yo");
	}

	#[test_log::test]
	fn text_encode() {
		let latin1_encode = TextEncoding::Latin1.encode(TEST_STRING, false).unwrap();
		assert_eq!(latin1_encode.as_slice(), &[0x6D, 0xE9, 0x74, 0x61, 0xFF]);

		// Not every character fits in Latin-1
		assert!(TextEncoding::Latin1.encode("\u{65e5}\u{672c}\u{8a9e}", false).is_err());

		// UTF-16 output leads with a little endian BOM
		let utf16_encode = TextEncoding::UTF16.encode(TEST_STRING, false).unwrap();
		assert_eq!(
			utf16_encode.as_slice(),
			&[
				0xFF, 0xFE, 0x6D, 0x00, 0xE9, 0x00, 0x74, 0x00, 0x61, 0x00, 0xFF, 0x00
			]
		);

		let utf8_encode = TextEncoding::UTF8.encode(TEST_STRING, false).unwrap();
		assert_eq!(utf8_encode.as_slice(), TEST_STRING.as_bytes());
	}

	#[test_log::test]
	fn preferred_encoding() {
		assert_eq!(
			TextEncoding::preferred_for("plain ascii"),
			TextEncoding::Latin1
		);
		assert_eq!(TextEncoding::preferred_for(TEST_STRING), TextEncoding::Latin1);
		assert_eq!(
			TextEncoding::preferred_for("\u{65e5}\u{672c}\u{8a9e}"),
			TextEncoding::UTF16
		);
	}
}
