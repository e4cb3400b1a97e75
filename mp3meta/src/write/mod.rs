//! ID3v2 tag rendering

mod frame;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::macros::err;
use crate::tag::Id3v2Tag;
use crate::util::synchsafe::SynchsafeInteger;

/// Render `tag` as an ID3v2.4 block in front of `audio`
///
/// This is a pure transform: the audio bytes are appended verbatim, never inspected or
/// re-encoded. Pass a buffer through [`strip_tag`](crate::strip_tag) first if it may
/// already carry a tag. An empty `tag` produces no tag block at all, so the output is
/// the audio unchanged.
///
/// # Errors
///
/// * The tag or one of its frames exceeds the 28 bit synchsafe size limit
///
/// # Examples
///
/// ```rust
/// use mp3meta::config::WriteOptions;
/// use mp3meta::tag::Id3v2Tag;
///
/// # fn main() -> mp3meta::error::Result<()> {
/// let audio = [0xFF, 0xFB, 0x90, 0x00];
///
/// let mut tag = Id3v2Tag::new();
/// tag.title = Some(String::from("Some title"));
///
/// let tagged = mp3meta::render_tag(&audio, &tag, WriteOptions::new())?;
///
/// assert!(tagged.starts_with(b"ID3"));
/// assert!(tagged.ends_with(&audio));
/// # Ok(()) }
/// ```
pub fn render_tag(audio: &[u8], tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	let tag_block = create_tag(tag, write_options)?;

	let mut out = Vec::with_capacity(tag_block.len() + audio.len());
	out.extend_from_slice(&tag_block);
	out.extend_from_slice(audio);
	Ok(out)
}

pub(crate) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	let mut frames = Vec::new();
	frame::create_frames(&mut frames, tag)?;

	// We are stripping the tag
	if frames.is_empty() {
		log::debug!("Tag is empty, writing nothing");
		return Ok(Vec::new());
	}

	let padding_len = write_options.preferred_padding.unwrap_or(0) as usize;
	if padding_len > 0 {
		log::trace!("Padding tag with {} bytes", padding_len);
	}

	let tag_size = frames.len() + padding_len;
	if tag_size > 0xFFF_FFFF {
		err!(TooMuchData);
	}

	let mut id3v2 = Vec::with_capacity(10 + tag_size);
	id3v2.extend_from_slice(b"ID3");
	// Version 4, rev 0, no tag flags
	id3v2.extend_from_slice(&[4, 0, 0]);
	id3v2.extend_from_slice(&(tag_size as u32).synch()?.to_be_bytes());
	id3v2.extend_from_slice(&frames);
	id3v2.resize(id3v2.len() + padding_len, 0);

	Ok(id3v2)
}
