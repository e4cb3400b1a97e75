//! Frame content types

pub(crate) mod attached_picture_frame;
pub(crate) mod text_information_frame;
mod unsynchronized_text_frame;

pub use unsynchronized_text_frame::UnsynchronizedTextFrame;

use crate::error::Result;
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::util::text::TextEncoding;

pub(crate) fn verify_encoding(encoding: u8, version: Id3v2Version) -> Result<TextEncoding> {
	if version == Id3v2Version::V2 && (encoding != 0 && encoding != 1) {
		err!(TextDecode("ID3v2.2 only supports Latin-1 and UTF-16 encodings"));
	}

	match TextEncoding::from_u8(encoding) {
		None => err!(TextDecode("Found invalid encoding")),
		Some(e) => Ok(e),
	}
}
