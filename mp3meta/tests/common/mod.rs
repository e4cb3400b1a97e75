#![allow(dead_code)]

/// Encode `value` as a 4 byte synchsafe integer
pub fn synch(value: u32) -> [u8; 4] {
	assert!(value <= 0xFFF_FFFF);

	[
		((value >> 21) & 0x7F) as u8,
		((value >> 14) & 0x7F) as u8,
		((value >> 7) & 0x7F) as u8,
		(value & 0x7F) as u8,
	]
}

/// A complete tag buffer: header + frame region + audio
pub fn tag(version: [u8; 2], flags: u8, region: &[u8], audio: &[u8]) -> Vec<u8> {
	let mut buffer = Vec::new();
	buffer.extend_from_slice(b"ID3");
	buffer.extend_from_slice(&version);
	buffer.push(flags);
	buffer.extend_from_slice(&synch(region.len() as u32));
	buffer.extend_from_slice(region);
	buffer.extend_from_slice(audio);
	buffer
}

pub fn v24_tag(frames: &[Vec<u8>], audio: &[u8]) -> Vec<u8> {
	tag([4, 0], 0, &frames.concat(), audio)
}

pub fn v23_tag(frames: &[Vec<u8>], audio: &[u8]) -> Vec<u8> {
	tag([3, 0], 0, &frames.concat(), audio)
}

pub fn v24_frame(id: &[u8; 4], flags: [u8; 2], body: &[u8]) -> Vec<u8> {
	let mut frame = Vec::new();
	frame.extend_from_slice(id);
	frame.extend_from_slice(&synch(body.len() as u32));
	frame.extend_from_slice(&flags);
	frame.extend_from_slice(body);
	frame
}

pub fn v23_frame(id: &[u8; 4], flags: [u8; 2], body: &[u8]) -> Vec<u8> {
	let mut frame = Vec::new();
	frame.extend_from_slice(id);
	frame.extend_from_slice(&u32::try_from(body.len()).unwrap().to_be_bytes());
	frame.extend_from_slice(&flags);
	frame.extend_from_slice(body);
	frame
}

pub fn v22_frame(id: &[u8; 3], body: &[u8]) -> Vec<u8> {
	let size = u32::try_from(body.len()).unwrap().to_be_bytes();

	let mut frame = Vec::new();
	frame.extend_from_slice(id);
	frame.extend_from_slice(&size[1..]);
	frame.extend_from_slice(body);
	frame
}

/// A Latin-1 text frame body
pub fn latin1_body(text: &str) -> Vec<u8> {
	assert!(text.is_ascii());

	let mut body = vec![0];
	body.extend_from_slice(text.as_bytes());
	body
}

pub fn v24_text_frame(id: &[u8; 4], text: &str) -> Vec<u8> {
	v24_frame(id, [0, 0], &latin1_body(text))
}

/// Apply unsynchronisation, padding every `0xFF` with a trailing `0x00`
pub fn unsynch_encode(data: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(data.len());
	for &byte in data {
		out.push(byte);
		if byte == 0xFF {
			out.push(0);
		}
	}
	out
}
