//! Contains the errors that can arise within mp3meta
//!
//! The primary error is [`Error`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! Note that the read path never surfaces these to the caller; anything unexpected in a
//! tag degrades to a [`Diagnostic`](crate::diagnostic::Diagnostic) instead.

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// A tag or frame size does not fit in a 28 bit synchsafe integer
	TooMuchData,
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(&'static str),
	/// Arises when a picture frame contains invalid data
	NotAPicture,
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or if the ID is too short/long.
	BadFrameId(Vec<u8>),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
}

/// Errors that could occur within mp3meta
pub struct Error {
	pub(crate) kind: ErrorKind,
}

impl Error {
	/// Create an `Error` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3meta::error::{Error, ErrorKind};
	///
	/// let oversized = Error::new(ErrorKind::TooMuchData);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3meta::error::{Error, ErrorKind};
	///
	/// let oversized = Error::new(ErrorKind::TooMuchData);
	/// if let ErrorKind::TooMuchData = oversized.kind() {
	/// 	println!("That's a big tag");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Error {}

impl Debug for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<std::io::Error> for Error {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),

			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(message) => write!(f, "Text encoding: {message}"),
			ErrorKind::NotAPicture => write!(f, "Picture: Encountered invalid data"),
			ErrorKind::BadFrameId(ref frame_id) => {
				write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}")
			},
		}
	}
}
