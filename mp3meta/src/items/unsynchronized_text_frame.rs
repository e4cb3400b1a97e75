use crate::error::Result;
use crate::header::Id3v2Version;
use crate::items::verify_encoding;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// An ID3v2 unsynchronized lyrics frame (`USLT`)
///
/// Similar to `TXXX` and `WXXX` frames, USLT frames are told apart by their descriptions.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UnsynchronizedTextFrame {
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The actual lyrics text
	pub content: String,
}

impl UnsynchronizedTextFrame {
	/// The language code written when the caller doesn't supply a valid one
	pub const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

	/// Create a lyrics frame with the default language and an empty description
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3meta::items::UnsynchronizedTextFrame;
	///
	/// let lyrics = UnsynchronizedTextFrame::new("Never gonna give you up");
	/// assert_eq!(lyrics.language, *b"eng");
	/// ```
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			language: Self::DEFAULT_LANGUAGE,
			description: String::new(),
			content: content.into(),
		}
	}

	/// Read an `UnsynchronizedTextFrame` from a frame body
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
	pub(crate) fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version)?;

		let mut language = [0; 3];
		reader.read_exact(&mut language)?;

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(encoding)
				.bom(description.bom),
		)?
		.content;

		Ok(Some(Self {
			language,
			description: description.content,
			content,
		}))
	}

	/// Convert an `UnsynchronizedTextFrame` to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// The description and content share one encoding: Latin-1 when both fit, UTF-16
	/// otherwise. A language that is not 3 ASCII letters is replaced with
	/// [`Self::DEFAULT_LANGUAGE`].
	pub(crate) fn as_bytes(&self) -> Result<Vec<u8>> {
		let encoding = if TextEncoding::verify_latin1(&self.description)
			&& TextEncoding::verify_latin1(&self.content)
		{
			TextEncoding::Latin1
		} else {
			TextEncoding::UTF16
		};

		let mut language = self.language;
		if !language.iter().all(u8::is_ascii_alphabetic) {
			log::warn!(
				"Substituting invalid lyrics language {:?} with \"eng\"",
				language
			);
			language = Self::DEFAULT_LANGUAGE;
		}

		let mut bytes = vec![encoding as u8];
		bytes.extend_from_slice(&language);
		bytes.extend(encoding.encode(&self.description, true)?);
		bytes.extend(encoding.encode(&self.content, false)?);

		Ok(bytes)
	}
}
