use crate::error::{Error, ErrorKind, Result};
use crate::items::{attached_picture_frame, text_information_frame};
use crate::tag::Id3v2Tag;
use crate::util::synchsafe::SynchsafeInteger;
use crate::util::text::TextEncoding;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

// Frames are emitted in a fixed order so identical models always produce identical bytes
pub(in crate::write) fn create_frames<W>(writer: &mut W, tag: &Id3v2Tag) -> Result<()>
where
	W: Write,
{
	let text_frames: [(&str, Option<&str>); 6] = [
		("TIT2", tag.title.as_deref()),
		("TPE1", tag.artist.as_deref()),
		("TALB", tag.album.as_deref()),
		("TCON", tag.genre.as_deref()),
		("TYER", tag.year.as_deref()),
		("TRCK", tag.track_number.as_deref()),
	];

	for (id, value) in text_frames {
		let Some(value) = value else { continue };
		if value.is_empty() {
			continue;
		}

		let body = match text_information_frame::as_bytes(value) {
			Ok(body) => body,
			Err(err) => {
				// A single unencodable field shouldn't take the whole write down with it
				log::warn!("Failed to encode frame {id}, writing it empty: {err}");
				vec![TextEncoding::Latin1 as u8]
			},
		};

		write_frame(writer, id, &body)?;
	}

	if let Some(lyrics) = &tag.lyrics {
		if lyrics.content.is_empty() {
			log::debug!("Skipping empty USLT frame");
		} else {
			match lyrics.as_bytes() {
				Ok(body) => write_frame(writer, "USLT", &body)?,
				Err(err) => log::warn!("Dropping USLT frame: {err}"),
			}
		}
	}

	if let Some(picture) = &tag.picture {
		if picture.is_writable() {
			match attached_picture_frame::as_bytes(picture) {
				Ok(body) => write_frame(writer, "APIC", &body)?,
				Err(err) => log::warn!("Dropping APIC frame: {err}"),
			}
		} else {
			log::warn!("Dropping APIC frame: empty payload or missing MIME type");
		}
	}

	Ok(())
}

fn write_frame<W>(writer: &mut W, id: &str, body: &[u8]) -> Result<()>
where
	W: Write,
{
	let len = u32::try_from(body.len()).map_err(|_| Error::new(ErrorKind::TooMuchData))?;

	writer.write_all(id.as_bytes())?;
	writer.write_u32::<BigEndian>(len.synch()?)?;
	// No frame flags are ever written
	writer.write_u16::<BigEndian>(0)?;
	writer.write_all(body)?;

	Ok(())
}
