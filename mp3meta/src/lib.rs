//! Parse and write ID3v2 tags on in-memory MP3 buffers.
//!
//! The read path tolerates missing and malformed tags: [`parse_tag`] never fails outward,
//! it degrades to an empty [`Id3v2Tag`](tag::Id3v2Tag) and reports what it ran into as
//! [`Diagnostic`](diagnostic::Diagnostic)s. ID3v2.2, ID3v2.3, and ID3v2.4 tags are read;
//! unknown versions get a best-effort scan.
//!
//! The write path is a pure transform: [`render_tag`] prepends a freshly built ID3v2.4
//! tag block to the audio bytes, which are carried over untouched. Re-tagging a buffer is
//! a matter of [`strip_tag`] + [`render_tag`].
//!
//! # Examples
//!
//! ```rust
//! use mp3meta::config::{ParseOptions, WriteOptions};
//! use mp3meta::tag::Id3v2Tag;
//!
//! # fn main() -> mp3meta::error::Result<()> {
//! // An untagged "song"
//! let audio = vec![0_u8; 1024];
//!
//! let mut tag = Id3v2Tag::new();
//! tag.title = Some(String::from("Intro"));
//! tag.artist = Some(String::from("Foo artist"));
//!
//! let tagged = mp3meta::render_tag(&audio, &tag, WriteOptions::new())?;
//!
//! // The audio bytes always come through unchanged
//! assert_eq!(&tagged[tagged.len() - audio.len()..], &audio[..]);
//!
//! let reread = mp3meta::parse_tag(&tagged, ParseOptions::new());
//! assert!(reread.diagnostics.is_empty());
//! assert_eq!(reread.tag.title.as_deref(), Some("Intro"));
//! assert_eq!(reread.tag.artist.as_deref(), Some("Foo artist"));
//! # Ok(()) }
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
mod frame;
mod header;
pub mod items;
pub(crate) mod macros;
pub mod picture;
mod read;
pub mod tag;
mod util;
mod write;

pub use read::{TagReadResult, parse_tag, strip_tag};
pub use write::render_tag;

pub use util::text::TextEncoding;
