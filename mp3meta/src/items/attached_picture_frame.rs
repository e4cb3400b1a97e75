use crate::error::Result;
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::picture::{MimeType, Picture, PictureType};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// Read a [`Picture`] from an ID3v2 `APIC`/`PIC` frame body
///
/// NOTE: This expects *only* the frame content
///
/// # Errors
///
/// * There isn't enough data present
/// * Unable to decode any of the text
///
/// ID3v2.2:
///
/// * The format is not "PNG" or "JPG"
pub(crate) fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Picture>
where
	R: Read,
{
	let Some(encoding) = TextEncoding::from_u8(reader.read_u8()?) else {
		err!(NotAPicture);
	};

	let mime_type;
	if version == Id3v2Version::V2 {
		let mut format = [0; 3];
		reader.read_exact(&mut format)?;

		match &format {
			b"PNG" => mime_type = Some(MimeType::Png),
			b"JPG" => mime_type = Some(MimeType::Jpeg),
			_ => err!(NotAPicture),
		}
	} else {
		mime_type = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		)?
		.text_or_none()
		.map(|mime_type_str| MimeType::from_str(&mime_type_str));
	}

	let pic_type = PictureType::from_u8(reader.read_u8()?);

	let description = decode_text(
		reader,
		TextDecodeOptions::new().encoding(encoding).terminated(true),
	)?
	.text_or_none();

	let mut data = Vec::new();
	reader.read_to_end(&mut data)?;

	Ok(Picture {
		pic_type,
		mime_type,
		description,
		data,
	})
}

/// Convert a [`Picture`] to an ID3v2 `APIC` frame body
///
/// NOTE: This does not include the frame header
///
/// The picture type is always written as front cover, the description is always written
/// empty in Latin-1, and the image bytes are appended verbatim.
///
/// # Errors
///
/// * Too much data was provided
pub(crate) fn as_bytes(picture: &Picture) -> Result<Vec<u8>> {
	let mut data = vec![TextEncoding::Latin1 as u8];

	if let Some(mime_type) = &picture.mime_type {
		data.extend_from_slice(mime_type.as_str().as_bytes());
	}
	data.push(0);

	data.push(PictureType::CoverFront.as_u8());

	// Empty, terminated description
	data.push(0);

	data.extend_from_slice(&picture.data);

	if data.len() > 0xFFF_FFFF {
		err!(TooMuchData);
	}

	Ok(data)
}
