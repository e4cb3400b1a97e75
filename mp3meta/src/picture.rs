//! Embedded picture items

use std::fmt::{Display, Formatter};

/// The picture type, as defined in the ID3v2 APIC frame
///
/// The reader accepts any of these; the writer only ever emits [`PictureType::CoverFront`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a u8 from a `PictureType`
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

/// The picture's MIME type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// Unrecognized MIME types are preserved verbatim in [`MimeType::Unknown`].
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	pub fn as_str(&self) -> &str {
		match self {
			Self::Jpeg => "image/jpeg",
			Self::Png => "image/png",
			Self::Tiff => "image/tiff",
			Self::Bmp => "image/bmp",
			Self::Gif => "image/gif",
			Self::Unknown(mime_type) => mime_type,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Represents a picture attached to a tag
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Picture {
	/// The picture type according to the ID3v2 APIC frame
	pub pic_type: PictureType,
	/// The picture's MIME type
	///
	/// A picture without a MIME type is unplayable for most consumers and is dropped on
	/// write.
	pub mime_type: Option<MimeType>,
	/// The picture's description
	pub description: Option<String>,
	/// The binary data of the picture
	pub data: Vec<u8>,
}

impl Picture {
	/// Create a front cover `Picture` from raw bytes and a MIME type
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3meta::picture::{MimeType, Picture, PictureType};
	///
	/// let picture = Picture::front_cover(vec![0x89, b'P', b'N', b'G'], MimeType::Png);
	/// assert_eq!(picture.pic_type, PictureType::CoverFront);
	/// ```
	pub fn front_cover(data: Vec<u8>, mime_type: MimeType) -> Self {
		Self {
			pic_type: PictureType::CoverFront,
			mime_type: Some(mime_type),
			description: None,
			data,
		}
	}

	// A picture needs a payload and a MIME type to be worth writing
	pub(crate) fn is_writable(&self) -> bool {
		!self.data.is_empty()
			&& self
				.mime_type
				.as_ref()
				.is_some_and(|mime| !mime.as_str().is_empty())
	}
}
