//! ID3v2 tag parsing

use crate::config::ParseOptions;
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::frame::{FrameFlags, FrameId, parse_frame_header};
use crate::header::{Id3v2Header, Id3v2Version, ParsedHeader};
use crate::items::{UnsynchronizedTextFrame, attached_picture_frame, text_information_frame};
use crate::picture::Picture;
use crate::tag::Id3v2Tag;
use crate::util::synchsafe::{SynchsafeInteger, unsynchronize};

use std::borrow::Cow;
use std::io::Read;

/// The result of [`parse_tag`]
///
/// Parsing never fails outward. When there is no tag, or the tag is damaged, the model
/// comes back empty or partial and [`diagnostics`](Self::diagnostics) says why, leaving
/// the caller free to fall back to other sources (e.g. filename-derived defaults).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagReadResult {
	/// The parsed tag, empty if no usable tag was found
	pub tag: Id3v2Tag,
	/// Everything unexpected encountered along the way
	pub diagnostics: Vec<Diagnostic>,
}

/// Parse the ID3v2 tag at the start of `buffer` into an [`Id3v2Tag`]
///
/// ID3v2.3 and ID3v2.4 are fully supported, ID3v2.2 frames are upgraded on the fly, and
/// unknown versions get a best-effort scan. Structural damage truncates the scan rather
/// than failing it; everything parsed up to that point is kept.
///
/// # Examples
///
/// ```rust
/// use mp3meta::config::ParseOptions;
/// use mp3meta::diagnostic::Diagnostic;
///
/// let not_an_mp3 = b"RIFF\x24\x00\x00\x00WAVE";
///
/// let result = mp3meta::parse_tag(not_an_mp3, ParseOptions::new());
/// assert!(result.tag.is_empty());
/// assert_eq!(result.diagnostics, vec![Diagnostic::NoTagFound]);
/// ```
pub fn parse_tag(buffer: &[u8], parse_options: ParseOptions) -> TagReadResult {
	let mut result = TagReadResult::default();

	let header = match Id3v2Header::parse(buffer) {
		ParsedHeader::NoTag => {
			log::debug!("No ID3v2 tag found");
			result.diagnostics.push(Diagnostic::NoTagFound);
			return result;
		},
		ParsedHeader::V2Compression(_) => {
			log::warn!("Encountered a compressed ID3v2.2 tag, skipping");
			result.diagnostics.push(Diagnostic::V2Compression);
			return result;
		},
		ParsedHeader::UnknownVersion {
			major,
			revision,
			header,
		} => {
			log::warn!("Unknown ID3v2 version (v{major}.{revision}), scanning best-effort");
			result
				.diagnostics
				.push(Diagnostic::UnsupportedVersion { major, revision });
			header
		},
		ParsedHeader::Tag(header) => header,
	};

	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let available = (buffer.len() - 10) as u32;
	let mut size = header.size;
	if size > available {
		log::warn!("Tag claims {size} bytes with {available} available, clamping");
		result.diagnostics.push(Diagnostic::TruncatedTag {
			declared: size,
			available,
		});
		size = available;
	}

	let mut tag_region = Cow::Borrowed(&buffer[10..10 + size as usize]);
	if header.unsynchronisation {
		tag_region = Cow::Owned(unsynchronize(&tag_region));
	}

	parse_frames(&tag_region, &header, parse_options, &mut result);
	result
}

/// Return the audio payload of `buffer`, with any leading ID3v2 tag removed
///
/// A buffer with no tag is returned as-is. Re-tagging a buffer is `strip_tag` followed
/// by [`render_tag`](crate::render_tag).
///
/// # Examples
///
/// ```rust
/// let untagged = [0xFF, 0xFB, 0x90, 0x00];
/// assert_eq!(mp3meta::strip_tag(&untagged), &untagged[..]);
/// ```
pub fn strip_tag(buffer: &[u8]) -> &[u8] {
	let header = match Id3v2Header::parse(buffer) {
		ParsedHeader::NoTag => return buffer,
		ParsedHeader::V2Compression(header) | ParsedHeader::Tag(header) => header,
		ParsedHeader::UnknownVersion { header, .. } => header,
	};

	let full_tag_size = header.full_tag_size() as usize;
	if full_tag_size >= buffer.len() {
		return &[];
	}

	&buffer[full_tag_size..]
}

fn parse_frames(
	data: &[u8],
	header: &Id3v2Header,
	parse_options: ParseOptions,
	result: &mut TagReadResult,
) {
	let mut pos = 0_usize;

	if header.extended_header {
		match skip_extended_header(data, header.version) {
			Some(new_pos) => pos = new_pos,
			None => {
				log::warn!("Found an extended header with an invalid size, ending the scan");
				result
					.diagnostics
					.push(Diagnostic::MalformedFrame { id: None });
				return;
			},
		}
	}

	while pos < data.len() {
		let remaining = &data[pos..];

		// Assume we just started reading padding
		if remaining[0] == 0 {
			break;
		}

		let parsed_header = match parse_frame_header(remaining, header.version) {
			Ok(Some(parsed_header)) => parsed_header,
			// Not enough bytes left for another header
			Ok(None) => break,
			Err(err) => {
				log::warn!("Failed to read a frame header, ending the scan: {err}");
				result
					.diagnostics
					.push(Diagnostic::MalformedFrame { id: None });
				break;
			},
		};

		pos += parsed_header.header_len;

		let size = parsed_header.size as usize;
		if size > data.len() - pos {
			let id = parsed_header.id.map(|id| id.to_string());
			log::warn!(
				"Frame claims {size} bytes with {} remaining, ending the scan",
				data.len() - pos
			);
			result.diagnostics.push(Diagnostic::MalformedFrame { id });
			break;
		}

		let body = &data[pos..pos + size];
		pos += size;

		let Some(id) = parsed_header.id else {
			// A valid ID3v2.2 frame outside the modeled set
			log::trace!("Skipping unrecognized legacy frame of size {size}");
			continue;
		};

		if size == 0 {
			log::debug!("Encountered a zero length frame, skipping");
			continue;
		}

		match prepare_frame_body(body, parsed_header.flags) {
			FrameBody::Ready(body) => {
				dispatch_frame(&id, &body, header.version, parse_options, result)
			},
			FrameBody::Unsupported => {
				result
					.diagnostics
					.push(Diagnostic::UnsupportedFrame { id: id.to_string() });
			},
			FrameBody::Malformed => {
				result.diagnostics.push(Diagnostic::MalformedFrame {
					id: Some(id.to_string()),
				});
			},
		}
	}
}

fn skip_extended_header(data: &[u8], version: Id3v2Version) -> Option<usize> {
	if data.len() < 4 {
		return None;
	}

	let declared = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);

	// ID3v2.4 sizes are synchsafe and include the four size bytes themselves; ID3v2.3
	// sizes are plain and exclude them
	let skip = match version {
		Id3v2Version::V4 => {
			let len = declared.unsynch() as usize;
			if len < 6 {
				return None;
			}
			len
		},
		_ => declared as usize + 4,
	};

	if skip > data.len() {
		return None;
	}

	log::debug!("Skipping {skip} byte extended header");
	Some(skip)
}

enum FrameBody<'a> {
	Ready(Cow<'a, [u8]>),
	Unsupported,
	Malformed,
}

// Frame flags stack in the order: grouping identity and data length indicator prefixes,
// then unsynchronisation, then compression
fn prepare_frame_body(body: &[u8], flags: FrameFlags) -> FrameBody<'_> {
	if flags.encryption {
		log::warn!("Skipping encrypted frame");
		return FrameBody::Unsupported;
	}

	let mut body = Cow::Borrowed(body);

	if flags.grouping_identity {
		if body.is_empty() {
			return FrameBody::Malformed;
		}

		log::trace!("Skipping group identifier");
		body = match body {
			Cow::Borrowed(b) => Cow::Borrowed(&b[1..]),
			Cow::Owned(b) => Cow::Owned(b[1..].to_vec()),
		};
	}

	// For some reason, no one can follow the spec, so while a data length indicator is
	// *written*, the flag isn't always set alongside compression
	if flags.data_length_indicator || flags.compression {
		if body.len() < 4 {
			return FrameBody::Malformed;
		}

		log::trace!("Skipping data length indicator");
		body = match body {
			Cow::Borrowed(b) => Cow::Borrowed(&b[4..]),
			Cow::Owned(b) => Cow::Owned(b[4..].to_vec()),
		};
	}

	if flags.unsynchronisation {
		body = Cow::Owned(unsynchronize(&body));
	}

	if flags.compression {
		#[cfg(not(feature = "id3v2_compression_support"))]
		{
			log::warn!("Encountered a compressed frame, support is disabled");
			return FrameBody::Unsupported;
		}

		#[cfg(feature = "id3v2_compression_support")]
		match decompress_frame(&body) {
			Ok(inflated) => body = Cow::Owned(inflated),
			Err(err) => {
				log::warn!("Failed to decompress frame: {err}");
				return FrameBody::Malformed;
			},
		}
	}

	if body.is_empty() {
		return FrameBody::Malformed;
	}

	FrameBody::Ready(body)
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress_frame(body: &[u8]) -> Result<Vec<u8>> {
	let mut inflated = Vec::new();
	flate2::read::ZlibDecoder::new(body).read_to_end(&mut inflated)?;
	Ok(inflated)
}

fn dispatch_frame(
	id: &FrameId,
	body: &[u8],
	version: Id3v2Version,
	parse_options: ParseOptions,
	result: &mut TagReadResult,
) {
	log::trace!("Parsing frame content for ID: {id}");

	let mut reader = body;
	let tag = &mut result.tag;

	let outcome: Result<()> = match id.as_str() {
		"TIT2" => parse_text_into(&mut reader, version, &mut tag.title, None),
		// Multi-valued artists keep their first entry
		"TPE1" => parse_text_into(
			&mut reader,
			version,
			&mut tag.artist,
			Some(first_list_element),
		),
		"TALB" => parse_text_into(&mut reader, version, &mut tag.album, None),
		"TCON" => parse_text_into(&mut reader, version, &mut tag.genre, None),
		// TYER is the ID3v2.3 year, TDRC its ID3v2.4 successor; either way only a
		// 4 digit year is kept
		"TYER" | "TDRC" => parse_text_into(&mut reader, version, &mut tag.year, Some(four_digit_year)),
		"TRCK" => parse_text_into(
			&mut reader,
			version,
			&mut tag.track_number,
			Some(leading_track_number),
		),
		"USLT" => match UnsynchronizedTextFrame::parse(&mut reader, version) {
			Ok(Some(lyrics)) => {
				insert_lyrics(tag, lyrics);
				Ok(())
			},
			Ok(None) => Ok(()),
			Err(err) => Err(err),
		},
		"APIC" => {
			if !parse_options.read_cover_art {
				log::debug!("Skipping attached picture frame");
				Ok(())
			} else {
				attached_picture_frame::parse(&mut reader, version)
					.map(|picture| insert_picture(tag, picture))
			}
		},
		_ => {
			log::trace!("Skipping unrecognized frame: {id}");
			Ok(())
		},
	};

	if let Err(err) = outcome {
		log::warn!("Failed to parse frame {id}: {err}");
		result.diagnostics.push(Diagnostic::MalformedFrame {
			id: Some(id.to_string()),
		});
	}
}

fn parse_text_into<R: Read>(
	reader: &mut R,
	version: Id3v2Version,
	slot: &mut Option<String>,
	normalize: Option<fn(&str) -> String>,
) -> Result<()> {
	let Some(mut value) = text_information_frame::parse(reader, version)? else {
		return Ok(());
	};

	if let Some(normalize) = normalize {
		value = normalize(&value);
	}

	insert_text(slot, value);
	Ok(())
}

// Duplicate frames are not allowed, but when they occur the non-empty content wins.
// Superfluous duplicates that follow the first frame are often empty.
fn insert_text(slot: &mut Option<String>, value: String) {
	if value.is_empty() && slot.as_deref().is_some_and(|existing| !existing.is_empty()) {
		log::warn!("Ignoring an empty duplicate frame; keeping the non-empty value");
		return;
	}

	if slot.is_some() {
		log::warn!("Replaced a frame with a duplicate of the same ID");
	}

	*slot = Some(value);
}

fn insert_lyrics(tag: &mut Id3v2Tag, lyrics: UnsynchronizedTextFrame) {
	if lyrics.content.is_empty()
		&& tag
			.lyrics
			.as_ref()
			.is_some_and(|existing| !existing.content.is_empty())
	{
		log::warn!("Ignoring an empty duplicate USLT frame");
		return;
	}

	if tag.lyrics.is_some() {
		log::warn!("Replaced a duplicate USLT frame");
	}

	tag.lyrics = Some(lyrics);
}

fn insert_picture(tag: &mut Id3v2Tag, picture: Picture) {
	if picture.data.is_empty()
		&& tag
			.picture
			.as_ref()
			.is_some_and(|existing| !existing.data.is_empty())
	{
		log::warn!("Ignoring an empty duplicate APIC frame");
		return;
	}

	if tag.picture.is_some() {
		log::warn!("Replaced a duplicate APIC frame");
	}

	tag.picture = Some(picture);
}

fn first_list_element(value: &str) -> String {
	value.split('\0').next().unwrap_or_default().to_owned()
}

fn four_digit_year(value: &str) -> String {
	let bytes = value.as_bytes();
	for (i, window) in bytes.windows(4).enumerate() {
		if window.iter().all(u8::is_ascii_digit) {
			// ASCII digits can't sit inside a multi-byte character
			return value[i..i + 4].to_owned();
		}
	}

	value.to_owned()
}

fn leading_track_number(value: &str) -> String {
	value.split('/').next().unwrap_or_default().to_owned()
}
