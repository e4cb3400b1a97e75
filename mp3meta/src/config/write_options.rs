/// Options to control how mp3meta writes a tag
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3meta::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			preferred_padding: None,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// Padding is zero-filled space after the last frame, counted in the declared tag
	/// size. A consumer rewriting the tag in place can grow into it without moving the
	/// audio data.
	///
	/// By default no padding is written, so the output is exactly header + frames + audio.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3meta::config::WriteOptions;
	///
	/// // I expect to re-tag this file a lot!
	/// let options = WriteOptions::new().preferred_padding(1024);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: None,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
