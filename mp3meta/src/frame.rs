//! Frame headers, IDs, and flags

use crate::error::{Error, ErrorKind, Result};
use crate::header::Id3v2Version;
use crate::util::synchsafe::SynchsafeInteger;

use std::fmt::{Display, Formatter};

/// A 4 character ID3v2.3/ID3v2.4 frame ID
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct FrameId([u8; 4]);

impl FrameId {
	/// Frame IDs must be within `'A'..'Z'` or `'0'..'9'`
	pub(crate) fn parse(bytes: [u8; 4]) -> Result<Self> {
		if bytes
			.iter()
			.any(|b| !b.is_ascii_uppercase() && !b.is_ascii_digit())
		{
			return Err(Error::new(ErrorKind::BadFrameId(bytes.to_vec())));
		}

		Ok(Self(bytes))
	}

	pub(crate) fn as_str(&self) -> &str {
		// Verified ASCII in `parse`
		std::str::from_utf8(&self.0).unwrap_or_default()
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Upgrade an ID3v2.2 frame ID to its ID3v2.3/4 equivalent
///
/// Only the frames this codec models are mapped; anything else is skipped by the caller
/// the same way an unrecognized 4 character ID would be.
pub(crate) fn upgrade_v2(id: [u8; 3]) -> Option<FrameId> {
	match &id {
		b"TT2" => Some(FrameId(*b"TIT2")),
		b"TP1" => Some(FrameId(*b"TPE1")),
		b"TAL" => Some(FrameId(*b"TALB")),
		b"TCO" => Some(FrameId(*b"TCON")),
		b"TYE" => Some(FrameId(*b"TYER")),
		b"TRK" => Some(FrameId(*b"TRCK")),
		b"ULT" => Some(FrameId(*b"USLT")),
		b"PIC" => Some(FrameId(*b"APIC")),
		_ => None,
	}
}

/// Flags an ID3v2.3/ID3v2.4 frame header can carry
///
/// ID3v2.2 headers have no flag bytes; they always map to the default here.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameFlags {
	/// Whether the frame content is unsynchronised (ID3v2.4 only)
	pub unsynchronisation: bool,
	/// Whether the frame content is zlib compressed
	pub compression: bool,
	/// Whether the frame content is encrypted
	pub encryption: bool,
	/// Whether the frame content is preceded by a grouping identity byte
	pub grouping_identity: bool,
	/// Whether the frame content is preceded by a data length indicator (ID3v2.4 only)
	pub data_length_indicator: bool,
}

impl FrameFlags {
	pub(crate) fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			unsynchronisation: flags & 0x0002 == 0x0002,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			grouping_identity: flags & 0x0040 == 0x0040,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	pub(crate) fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			unsynchronisation: false,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			grouping_identity: flags & 0x0020 == 0x0020,
			data_length_indicator: false,
		}
	}
}

pub(crate) struct ParsedFrameHeader {
	/// `None` for a structurally valid ID3v2.2 frame outside the modeled set; the caller
	/// skips its content
	pub id: Option<FrameId>,
	pub size: u32,
	pub flags: FrameFlags,
	pub header_len: usize,
}

/// Read one frame header from the front of `data`
///
/// Returns `Ok(None)` when the remaining bytes cannot hold another header, which ends
/// the scan the same way padding does.
pub(crate) fn parse_frame_header(
	data: &[u8],
	version: Id3v2Version,
) -> Result<Option<ParsedFrameHeader>> {
	if version == Id3v2Version::V2 {
		if data.len() < 6 {
			return Ok(None);
		}

		let mut id = [0; 3];
		id.copy_from_slice(&data[..3]);

		if id
			.iter()
			.any(|b| !b.is_ascii_uppercase() && !b.is_ascii_digit())
		{
			return Err(Error::new(ErrorKind::BadFrameId(id.to_vec())));
		}

		let size = u32::from_be_bytes([0, data[3], data[4], data[5]]);

		return Ok(Some(ParsedFrameHeader {
			id: upgrade_v2(id),
			size,
			flags: FrameFlags::default(),
			header_len: 6,
		}));
	}

	if data.len() < 10 {
		return Ok(None);
	}

	let mut id = [0; 4];
	id.copy_from_slice(&data[..4]);
	let id = FrameId::parse(id)?;

	let mut size = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
	let flags = u16::from_be_bytes([data[8], data[9]]);

	let flags = match version {
		Id3v2Version::V4 => {
			size = size.unsynch();
			FrameFlags::parse_id3v24(flags)
		},
		_ => FrameFlags::parse_id3v23(flags),
	};

	Ok(Some(ParsedFrameHeader {
		id: Some(id),
		size,
		flags,
		header_len: 10,
	}))
}
