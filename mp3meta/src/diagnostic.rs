//! Non-fatal conditions reported by the read path

use std::fmt::{Display, Formatter};

/// A non-fatal condition encountered while parsing a tag
///
/// [`parse_tag`](crate::parse_tag) never fails outward. Anything unexpected degrades to
/// an empty or partial [`Id3v2Tag`](crate::tag::Id3v2Tag), with one of these explaining
/// what was lost along the way.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
	/// The buffer does not start with an ID3v2 tag
	NoTagFound,
	/// An unknown major version was found
	///
	/// The tag contents are still scanned best-effort with ID3v2.4 frame rules.
	UnsupportedVersion {
		/// The major version found in the tag header
		major: u8,
		/// The revision found in the tag header
		revision: u8,
	},
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
	/// As such, the tag is skipped entirely.
	V2Compression,
	/// The declared tag size overruns the buffer; the scan was clamped to the available bytes
	TruncatedTag {
		/// The size declared in the tag header
		declared: u32,
		/// The number of bytes actually available after the header
		available: u32,
	},
	/// A frame header or body could not be read
	///
	/// An undecodable body drops that single frame; an inconsistent header ends the scan.
	/// Frames parsed up to that point are kept either way.
	MalformedFrame {
		/// The frame ID, when one could be read
		id: Option<String>,
	},
	/// A frame the codec cannot process (encrypted, or compressed with
	/// `id3v2_compression_support` disabled)
	UnsupportedFrame {
		/// The frame ID
		id: String,
	},
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NoTagFound => write!(f, "No ID3v2 tag found at the start of the buffer"),
			Self::UnsupportedVersion { major, revision } => write!(
				f,
				"Found an invalid version (v{major}.{revision}), expected any major revision in: \
				 (2, 3, 4)"
			),
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::TruncatedTag {
				declared,
				available,
			} => write!(
				f,
				"Tag claims {declared} bytes, only {available} are available"
			),
			Self::MalformedFrame { id: Some(id) } => write!(f, "Frame `{id}` is malformed"),
			Self::MalformedFrame { id: None } => write!(f, "Encountered a malformed frame"),
			Self::UnsupportedFrame { id } => write!(f, "Frame `{id}` is unsupported"),
		}
	}
}
