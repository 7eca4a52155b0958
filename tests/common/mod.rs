//! Box builders for synthetic test files.
#![allow(dead_code)]

/// Plain box: 32-bit size, type, payload.
pub fn boxed(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(8 + payload.len());
    v.extend_from_slice(&(8 + payload.len() as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

/// Box with the extended 64-bit size encoding.
pub fn large_boxed(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&1u32.to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(&(16 + payload.len() as u64).to_be_bytes());
    v.extend_from_slice(payload);
    v
}

/// Box whose size field is 0 ("extends to the end").
pub fn to_end_boxed(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&0u32.to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

pub fn container(typ: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    boxed(typ, &children.concat())
}

pub fn full_box(typ: &[u8; 4], version: u8, flags: u32, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![version];
    payload.extend_from_slice(&flags.to_be_bytes()[1..]);
    payload.extend_from_slice(body);
    boxed(typ, &payload)
}

pub fn ftyp(major: &[u8; 4], minor: u32, compatible: &[&[u8; 4]]) -> Vec<u8> {
    let mut payload = major.to_vec();
    payload.extend_from_slice(&minor.to_be_bytes());
    for brand in compatible {
        payload.extend_from_slice(*brand);
    }
    boxed(b"ftyp", &payload)
}

fn identity_matrix() -> Vec<u8> {
    let mut v = Vec::new();
    for m in [0x0001_0000u32, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000] {
        v.extend_from_slice(&m.to_be_bytes());
    }
    v
}

/// Version 0 `mvhd`; `quicktime` fills the preview/poster/selection fields with 1..=6.
pub fn mvhd(created: u32, timescale: u32, duration: u32, next_track_id: u32, quicktime: bool) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&created.to_be_bytes());
    body.extend_from_slice(&created.to_be_bytes());
    body.extend_from_slice(&timescale.to_be_bytes());
    body.extend_from_slice(&duration.to_be_bytes());
    body.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    body.extend_from_slice(&0x0100u16.to_be_bytes());
    body.extend_from_slice(&[0; 10]);
    body.extend_from_slice(&identity_matrix());
    for i in 1..=6u32 {
        let v = if quicktime { i } else { 0 };
        body.extend_from_slice(&v.to_be_bytes());
    }
    body.extend_from_slice(&next_track_id.to_be_bytes());
    full_box(b"mvhd", 0, 0, &body)
}

/// Version 0 `tkhd` with an identity matrix; width and height in whole pixels.
pub fn tkhd(track_id: u32, volume: u16, width: u32, height: u32) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&[0; 8]);
    body.extend_from_slice(&track_id.to_be_bytes());
    body.extend_from_slice(&[0; 4]);
    body.extend_from_slice(&1000u32.to_be_bytes());
    body.extend_from_slice(&[0; 8]);
    body.extend_from_slice(&[0; 4]);
    body.extend_from_slice(&volume.to_be_bytes());
    body.extend_from_slice(&[0; 2]);
    body.extend_from_slice(&identity_matrix());
    body.extend_from_slice(&(width << 16).to_be_bytes());
    body.extend_from_slice(&(height << 16).to_be_bytes());
    full_box(b"tkhd", 0, 3, &body)
}

/// Packed ISO-639-2/T code.
pub fn language(code: &[u8; 3]) -> u16 {
    code.iter().fold(0u16, |acc, &c| (acc << 5) | (c - 0x60) as u16)
}

pub fn mdhd(timescale: u32, duration: u32, lang: u16) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&[0; 8]);
    body.extend_from_slice(&timescale.to_be_bytes());
    body.extend_from_slice(&duration.to_be_bytes());
    body.extend_from_slice(&lang.to_be_bytes());
    body.extend_from_slice(&[0; 2]);
    full_box(b"mdhd", 0, 0, &body)
}

/// `hdlr` with an MP4 NUL-terminated name, or a QuickTime counted name.
pub fn hdlr(handler_type: &[u8; 4], name: &str, quicktime: bool) -> Vec<u8> {
    let mut body = Vec::new();
    let component: &[u8; 4] = if quicktime { b"mhlr" } else { &[0; 4] };
    body.extend_from_slice(component);
    body.extend_from_slice(handler_type);
    body.extend_from_slice(&[0; 12]);
    if quicktime {
        body.push(name.len() as u8);
        body.extend_from_slice(name.as_bytes());
    } else {
        body.extend_from_slice(name.as_bytes());
        body.push(0);
    }
    full_box(b"hdlr", 0, 0, &body)
}

pub fn smhd(balance: i16) -> Vec<u8> {
    let mut body = balance.to_be_bytes().to_vec();
    body.extend_from_slice(&[0; 2]);
    full_box(b"smhd", 0, 0, &body)
}

pub fn vmhd(graphics_mode: u16, opcolor: [u16; 3]) -> Vec<u8> {
    let mut body = graphics_mode.to_be_bytes().to_vec();
    for c in opcolor {
        body.extend_from_slice(&c.to_be_bytes());
    }
    full_box(b"vmhd", 0, 1, &body)
}

fn stsd(entry: &[u8]) -> Vec<u8> {
    let mut body = 1u32.to_be_bytes().to_vec();
    body.extend_from_slice(entry);
    full_box(b"stsd", 0, 0, &body)
}

fn sample_entry(format: &[u8; 4], rest: &[u8]) -> Vec<u8> {
    let mut v = (16 + rest.len() as u32).to_be_bytes().to_vec();
    v.extend_from_slice(format);
    v.extend_from_slice(&[0; 6]);
    v.extend_from_slice(&1u16.to_be_bytes());
    v.extend_from_slice(rest);
    v
}

pub fn stsd_sound(format: &[u8; 4], channels: u16, sample_size: u16, rate: u16) -> Vec<u8> {
    let mut rest = vec![0; 8];
    rest.extend_from_slice(&channels.to_be_bytes());
    rest.extend_from_slice(&sample_size.to_be_bytes());
    rest.extend_from_slice(&[0; 4]);
    rest.extend_from_slice(&((rate as u32) << 16).to_be_bytes());
    stsd(&sample_entry(format, &rest))
}

pub fn stsd_video(format: &[u8; 4], width: u16, height: u16, compressor: &str) -> Vec<u8> {
    let mut rest = vec![0; 16];
    rest.extend_from_slice(&width.to_be_bytes());
    rest.extend_from_slice(&height.to_be_bytes());
    rest.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    rest.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    rest.extend_from_slice(&[0; 4]);
    rest.extend_from_slice(&1u16.to_be_bytes());
    let mut name = vec![compressor.len() as u8];
    name.extend_from_slice(compressor.as_bytes());
    name.resize(32, 0);
    rest.extend_from_slice(&name);
    rest.extend_from_slice(&24u16.to_be_bytes());
    rest.extend_from_slice(&(-1i16).to_be_bytes());
    stsd(&sample_entry(format, &rest))
}

pub fn stsd_timecode(flags: u32, timescale: u32, frame_duration: u32, frames: u8) -> Vec<u8> {
    let mut rest = vec![0; 4];
    rest.extend_from_slice(&flags.to_be_bytes());
    rest.extend_from_slice(&timescale.to_be_bytes());
    rest.extend_from_slice(&frame_duration.to_be_bytes());
    rest.push(frames);
    rest.push(0);
    stsd(&sample_entry(b"tmcd", &rest))
}

pub fn stts(sample_count: u32, delta: u32) -> Vec<u8> {
    let mut body = 1u32.to_be_bytes().to_vec();
    body.extend_from_slice(&sample_count.to_be_bytes());
    body.extend_from_slice(&delta.to_be_bytes());
    full_box(b"stts", 0, 0, &body)
}

/// One iTunes `data` box.
pub fn data(kind: u32, value: &[u8]) -> Vec<u8> {
    let mut payload = kind.to_be_bytes().to_vec();
    payload.extend_from_slice(&[0; 4]);
    payload.extend_from_slice(value);
    boxed(b"data", &payload)
}

/// `meta` (FullBox) holding an `mdir` handler and the given `ilst` items.
pub fn itunes_meta(items: &[Vec<u8>]) -> Vec<u8> {
    let mut body = hdlr(b"mdir", "", false);
    body.extend_from_slice(&container(b"ilst", items));
    full_box(b"meta", 0, 0, &body)
}

/// Audio track: tkhd, then mdia with mdhd, hdlr(soun) and a sample table.
pub fn sound_trak(track_id: u32, quicktime: bool) -> Vec<u8> {
    container(
        b"trak",
        &[
            tkhd(track_id, 0x0100, 0, 0),
            container(
                b"mdia",
                &[
                    mdhd(44100, 441000, language(b"eng")),
                    hdlr(b"soun", "SoundHandler", quicktime),
                    container(
                        b"minf",
                        &[
                            smhd(0),
                            container(b"stbl", &[stsd_sound(b"mp4a", 2, 16, 44100)]),
                        ],
                    ),
                ],
            ),
        ],
    )
}

/// Video track at 25 frames per second.
pub fn video_trak(track_id: u32, quicktime: bool) -> Vec<u8> {
    container(
        b"trak",
        &[
            tkhd(track_id, 0, 640, 480),
            container(
                b"mdia",
                &[
                    mdhd(25000, 250000, language(b"und")),
                    hdlr(b"vide", "VideoHandler", quicktime),
                    container(
                        b"minf",
                        &[
                            vmhd(0, [0, 0, 0]),
                            container(
                                b"stbl",
                                &[stsd_video(b"avc1", 640, 480, "AVC Coding"), stts(250, 1000)],
                            ),
                        ],
                    ),
                ],
            ),
        ],
    )
}
