mod common;

use mp3meta::config::{ParseOptions, WriteOptions};
use mp3meta::diagnostic::Diagnostic;
use mp3meta::items::UnsynchronizedTextFrame;
use mp3meta::picture::{MimeType, Picture, PictureType};
use mp3meta::tag::Id3v2Tag;
use mp3meta::{parse_tag, render_tag, strip_tag};

fn sample_audio() -> Vec<u8> {
	(0..=255_u8).cycle().take(4096).collect()
}

#[test_log::test]
fn scenario_edit_title_and_rewrite() {
	// A v2.4 tag with a title and artist, followed by 1 KiB of zeroed "audio"
	let audio = vec![0_u8; 1024];
	let buffer = common::v24_tag(
		&[
			common::v24_text_frame(b"TIT2", "Test"),
			common::v24_text_frame(b"TPE1", "Artist"),
		],
		&audio,
	);

	let result = parse_tag(&buffer, ParseOptions::new());
	assert!(result.diagnostics.is_empty());
	assert_eq!(result.tag.title.as_deref(), Some("Test"));
	assert_eq!(result.tag.artist.as_deref(), Some("Artist"));

	let mut edited = Id3v2Tag::new();
	edited.title = Some(String::from("New Title"));

	let rewritten = render_tag(&audio, &edited, WriteOptions::new()).unwrap();
	assert_eq!(&rewritten[rewritten.len() - 1024..], &audio[..]);

	let reread = parse_tag(&rewritten, ParseOptions::new());
	assert_eq!(reread.tag.title.as_deref(), Some("New Title"));
	assert_eq!(reread.tag.artist, None);
}

#[test_log::test]
fn latin1_model_roundtrips_exactly() {
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::from("Some title"));
	tag.artist = Some(String::from("Some artist"));
	tag.album = Some(String::from("Some album"));
	tag.genre = Some(String::from("Classical"));
	tag.year = Some(String::from("1984"));
	tag.track_number = Some(String::from("7"));
	tag.lyrics = Some(UnsynchronizedTextFrame::new("la la la"));

	let audio = sample_audio();
	let tagged = render_tag(&audio, &tag, WriteOptions::new()).unwrap();

	let reread = parse_tag(&tagged, ParseOptions::new());
	assert!(reread.diagnostics.is_empty());
	assert_eq!(reread.tag, tag);
}

#[test_log::test]
fn year_and_track_normalize_on_read() {
	let mut tag = Id3v2Tag::new();
	tag.year = Some(String::from("2015-03-12"));
	tag.track_number = Some(String::from("3/12"));

	let tagged = render_tag(&[], &tag, WriteOptions::new()).unwrap();

	let reread = parse_tag(&tagged, ParseOptions::new());
	assert_eq!(reread.tag.year.as_deref(), Some("2015"));
	assert_eq!(reread.tag.track_number.as_deref(), Some("3"));
}

#[test_log::test]
fn unicode_lyrics_take_utf16() {
	let mut tag = Id3v2Tag::new();
	tag.lyrics = Some(UnsynchronizedTextFrame::new(
		"\u{65e5}\u{672c}\u{8a9e}\u{306e}\u{6b4c}\u{8a5e}",
	));

	let audio = sample_audio();
	let tagged = render_tag(&audio, &tag, WriteOptions::new()).unwrap();

	// USLT body = encoding marker + language + terminated description + text
	let uslt_pos = tagged
		.windows(4)
		.position(|window| window == b"USLT")
		.unwrap();
	let encoding_marker = tagged[uslt_pos + 10];
	assert_eq!(encoding_marker, 1);

	let reread = parse_tag(&tagged, ParseOptions::new());
	assert_eq!(reread.tag, tag);
}

#[test_log::test]
fn retagging_stripped_audio_is_idempotent() {
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::from("Once"));
	tag.artist = Some(String::from("Twice"));
	tag.lyrics = Some(UnsynchronizedTextFrame::new("thrice"));

	let audio = sample_audio();
	let first = render_tag(&audio, &tag, WriteOptions::new()).unwrap();

	let stripped = strip_tag(&first);
	assert_eq!(stripped, &audio[..]);

	let second = render_tag(stripped, &tag, WriteOptions::new()).unwrap();
	assert_eq!(first, second);
}

#[test_log::test]
fn audio_is_preserved_regardless_of_tag_content() {
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::from("\u{65e5}\u{672c}\u{8a9e}"));
	tag.picture = Some(Picture::front_cover(
		vec![0x89, b'P', b'N', b'G', 0xFF, 0x00, 0xFF],
		MimeType::Png,
	));

	let audio = sample_audio();
	let tagged = render_tag(&audio, &tag, WriteOptions::new()).unwrap();

	assert_eq!(&tagged[tagged.len() - audio.len()..], &audio[..]);
}

#[test_log::test]
fn empty_model_writes_no_tag_block() {
	let audio = sample_audio();

	let output = render_tag(&audio, &Id3v2Tag::new(), WriteOptions::new()).unwrap();
	assert_eq!(output, audio);

	// Present-but-empty fields also have nothing to write
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::new());
	tag.artist = Some(String::new());

	let output = render_tag(&audio, &tag, WriteOptions::new()).unwrap();
	assert_eq!(output, audio);

	let reread = parse_tag(&output, ParseOptions::new());
	assert_eq!(reread.diagnostics, vec![Diagnostic::NoTagFound]);
}

#[test_log::test]
fn picture_roundtrips_as_front_cover() {
	let mut tag = Id3v2Tag::new();
	tag.picture = Some(Picture {
		pic_type: PictureType::CoverBack,
		mime_type: Some(MimeType::Jpeg),
		description: Some(String::from("Cover")),
		data: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
	});

	let tagged = render_tag(&[], &tag, WriteOptions::new()).unwrap();
	let reread = parse_tag(&tagged, ParseOptions::new());

	let picture = reread.tag.picture.unwrap();
	// Only the front cover type is ever written, and descriptions are dropped
	assert_eq!(picture.pic_type, PictureType::CoverFront);
	assert_eq!(picture.description, None);
	assert_eq!(picture.mime_type, Some(MimeType::Jpeg));
	assert_eq!(picture.data, &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
}

#[test_log::test]
fn unwritable_pictures_are_dropped() {
	let audio = sample_audio();

	// No payload
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::from("Still here"));
	tag.picture = Some(Picture::front_cover(Vec::new(), MimeType::Png));

	let tagged = render_tag(&audio, &tag, WriteOptions::new()).unwrap();
	let reread = parse_tag(&tagged, ParseOptions::new());
	assert!(reread.diagnostics.is_empty());
	assert_eq!(reread.tag.title.as_deref(), Some("Still here"));
	assert_eq!(reread.tag.picture, None);

	// No MIME type
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::from("Still here"));
	tag.picture = Some(Picture {
		pic_type: PictureType::CoverFront,
		mime_type: None,
		description: None,
		data: vec![1, 2, 3],
	});

	let tagged = render_tag(&audio, &tag, WriteOptions::new()).unwrap();
	let reread = parse_tag(&tagged, ParseOptions::new());
	assert_eq!(reread.tag.picture, None);
}

#[test_log::test]
fn padding_is_counted_in_the_tag_size() {
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::from("Padded"));

	let audio = sample_audio();
	let unpadded = render_tag(&audio, &tag, WriteOptions::new()).unwrap();
	let padded = render_tag(&audio, &tag, WriteOptions::new().preferred_padding(128)).unwrap();

	assert_eq!(padded.len(), unpadded.len() + 128);

	let reread = parse_tag(&padded, ParseOptions::new());
	assert!(reread.diagnostics.is_empty());
	assert_eq!(reread.tag.title.as_deref(), Some("Padded"));

	// The padding belongs to the tag block, not the audio
	assert_eq!(strip_tag(&padded), &audio[..]);
}

#[test_log::test]
fn skipping_cover_art_leaves_the_rest() {
	let mut tag = Id3v2Tag::new();
	tag.title = Some(String::from("Some title"));
	tag.picture = Some(Picture::front_cover(vec![1, 2, 3, 4], MimeType::Png));

	let tagged = render_tag(&[], &tag, WriteOptions::new()).unwrap();

	let reread = parse_tag(&tagged, ParseOptions::new().read_cover_art(false));
	assert!(reread.diagnostics.is_empty());
	assert_eq!(reread.tag.title.as_deref(), Some("Some title"));
	assert_eq!(reread.tag.picture, None);
}
