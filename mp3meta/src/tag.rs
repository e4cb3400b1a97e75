//! The frame model shared by the read and write paths

use crate::config::WriteOptions;
use crate::error::Result;
use crate::items::UnsynchronizedTextFrame;
use crate::picture::Picture;

use std::io::Write;

/// The in-memory representation of an ID3v2 tag's contents
///
/// This is a plain value type. The reader builds one per buffer, the caller edits it,
/// and the writer consumes it; there is no identity beyond the buffer it came from.
///
/// For text fields, `None` means the frame was not present, while `Some(String::new())`
/// means it was present but empty. Both mean "nothing to write" on output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Id3v2Tag {
	/// `TIT2` — title
	pub title: Option<String>,
	/// `TPE1` — lead artist
	pub artist: Option<String>,
	/// `TALB` — album
	pub album: Option<String>,
	/// `TCON` — genre
	pub genre: Option<String>,
	/// `TYER`/`TDRC` — release year
	pub year: Option<String>,
	/// `TRCK` — track number
	pub track_number: Option<String>,
	/// `USLT` — unsynchronized lyrics
	pub lyrics: Option<UnsynchronizedTextFrame>,
	/// `APIC` — attached picture
	pub picture: Option<Picture>,
}

impl Id3v2Tag {
	/// Create an empty tag
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the tag has nothing worth writing
	///
	/// Empty text fields, empty lyrics, and pictures without a payload or MIME type all
	/// count as nothing; a tag made up of only those produces no tag block at all.
	pub fn is_empty(&self) -> bool {
		let Self {
			title,
			artist,
			album,
			genre,
			year,
			track_number,
			lyrics,
			picture,
		} = self;

		[title, artist, album, genre, year, track_number]
			.iter()
			.all(|field| field.as_deref().is_none_or(str::is_empty))
			&& lyrics.as_ref().is_none_or(|lyrics| lyrics.content.is_empty())
			&& picture.as_ref().is_none_or(|picture| !picture.is_writable())
	}

	/// Derive fallback metadata from a filename
	///
	/// The original filename is the only thing to go on when a file carries no tag.
	/// A `"Artist - Title.mp3"` shape fills both fields; anything else becomes the
	/// title. The `.mp3` extension is stripped case-insensitively.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3meta::tag::Id3v2Tag;
	///
	/// let tag = Id3v2Tag::from_filename("Daft Punk - Around the World.mp3");
	/// assert_eq!(tag.artist.as_deref(), Some("Daft Punk"));
	/// assert_eq!(tag.title.as_deref(), Some("Around the World"));
	///
	/// let tag = Id3v2Tag::from_filename("recording_004.mp3");
	/// assert_eq!(tag.title.as_deref(), Some("recording_004"));
	/// assert_eq!(tag.artist, None);
	/// ```
	pub fn from_filename(filename: &str) -> Self {
		let mut stem = filename;
		if let Some(idx) = filename.len().checked_sub(4) {
			if filename
				.get(idx..)
				.is_some_and(|ext| ext.eq_ignore_ascii_case(".mp3"))
			{
				stem = &filename[..idx];
			}
		}

		let mut tag = Self::default();

		let parts = stem.split(" - ").collect::<Vec<_>>();
		if parts.len() >= 2 {
			tag.artist = Some(parts[0].trim().to_owned());
			tag.title = Some(parts[1].trim().to_owned());
		} else {
			tag.title = Some(stem.trim().to_owned());
		}

		tag
	}

	/// Serialize just the tag block into `writer`
	///
	/// This is the tag header and frames without any audio; see
	/// [`render_tag`](crate::render_tag) for producing a whole file buffer.
	///
	/// # Errors
	///
	/// * The tag or one of its frames exceeds the 28 bit synchsafe size limit
	/// * `writer` fails
	pub fn dump_to<W: Write>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()> {
		let tag_block = crate::write::create_tag(self, write_options)?;
		writer.write_all(&tag_block)?;
		Ok(())
	}
}
