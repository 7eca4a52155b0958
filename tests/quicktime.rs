mod common;

use boxmeta::tags::{media, movie, sound, timecode, video};
use boxmeta::{ByteReader, ContainerFormat, TagValue, detect_format, extract};
use common::*;
use std::io::Cursor;

fn tcmi(font_name: &str) -> Vec<u8> {
    let mut body = Vec::new();
    for v in [0u16, 0, 12, 0, 0xffff, 0xffff, 0xffff, 0, 0, 0] {
        body.extend_from_slice(&v.to_be_bytes());
    }
    body.push(font_name.len() as u8);
    body.extend_from_slice(font_name.as_bytes());
    full_box(b"tcmi", 0, 0, &body)
}

fn timecode_trak() -> Vec<u8> {
    container(
        b"trak",
        &[
            tkhd(3, 0, 0, 0),
            container(
                b"mdia",
                &[
                    // Macintosh language code 0 (English)
                    mdhd(2997, 29970, 0),
                    hdlr(b"tmcd", "TimeCodeHandler", true),
                    container(
                        b"minf",
                        &[
                            container(b"gmhd", &[container(b"tmcd", &[tcmi("Helvetica")])]),
                            hdlr(b"alis", "DataHandler", true),
                            container(b"stbl", &[stsd_timecode(1, 2997, 100, 30)]),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn make_mov() -> Vec<u8> {
    let mut file = boxed(b"wide", &[]);
    file.extend(boxed(b"mdat", &[0u8; 32]));
    file.extend(container(
        b"moov",
        &[
            mvhd(2_082_844_800, 600, 1200, 4, true),
            sound_trak(1, true),
            video_trak(2, true),
            timecode_trak(),
        ],
    ));
    file
}

#[test]
fn files_without_ftyp_are_quicktime() {
    let mut r = ByteReader::new(Cursor::new(make_mov())).unwrap();
    assert_eq!(detect_format(&mut r).unwrap(), ContainerFormat::QuickTime);
    assert_eq!(r.position(), 0);

    let mut file = ftyp(b"qt  ", 0x2005_0300, &[b"qt  "]);
    file.extend(make_mov());
    let mut r = ByteReader::new(Cursor::new(file)).unwrap();
    assert_eq!(detect_format(&mut r).unwrap(), ContainerFormat::QuickTime);
    assert_eq!(r.position(), 0);
}

#[test]
fn quicktime_directories() {
    let md = extract(Cursor::new(make_mov())).unwrap();
    let names: Vec<_> = md.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["QuickTime", "QuickTime Sound", "QuickTime Video", "QuickTime Timecode"]);
    assert!(!md.has_errors(), "{:?}", md);
}

#[test]
fn quicktime_movie_header_fields() {
    let md = extract(Cursor::new(make_mov())).unwrap();
    let dir = md.first("QuickTime").unwrap();

    assert_eq!(dir.get_i64(movie::CREATION_TIME), Some(0));
    assert_eq!(dir.get_f64(movie::DURATION_SECONDS), Some(2.0));
    assert_eq!(dir.get_i64(movie::PREVIEW_TIME), Some(1));
    assert_eq!(dir.get_i64(movie::PREVIEW_DURATION), Some(2));
    assert_eq!(dir.get_i64(movie::POSTER_TIME), Some(3));
    assert_eq!(dir.get_i64(movie::SELECTION_TIME), Some(4));
    assert_eq!(dir.get_i64(movie::SELECTION_DURATION), Some(5));
    assert_eq!(dir.get_i64(movie::CURRENT_TIME), Some(6));
    assert_eq!(dir.get_i64(movie::NEXT_TRACK_ID), Some(4));
}

#[test]
fn counted_handler_names() {
    let md = extract(Cursor::new(make_mov())).unwrap();
    assert_eq!(
        md.first("QuickTime Sound").unwrap().get_str(media::HANDLER_NAME),
        Some("SoundHandler")
    );
    assert_eq!(md.first("QuickTime Sound").unwrap().get_i64(sound::NUMBER_OF_CHANNELS), Some(2));
    assert_eq!(md.first("QuickTime Video").unwrap().get_f64(video::FRAME_RATE), Some(25.0));
}

#[test]
fn timecode_track() {
    let md = extract(Cursor::new(make_mov())).unwrap();
    let dir = md.first("QuickTime Timecode").unwrap();

    assert_eq!(dir.get_str(media::HANDLER_NAME), Some("TimeCodeHandler"));
    assert!(!dir.contains(media::LANGUAGE));
    assert_eq!(dir.get_i64(media::LANGUAGE_CODE), Some(0));
    assert_eq!(dir.get_str(timecode::FORMAT), Some("tmcd"));
    assert_eq!(dir.get_i64(timecode::DROP_FRAME), Some(1));
    assert_eq!(dir.get_i64(timecode::TIMECODE_TIMESCALE), Some(2997));
    assert_eq!(dir.get_i64(timecode::FRAME_DURATION), Some(100));
    assert_eq!(dir.get_i64(timecode::NUMBER_OF_FRAMES), Some(30));
    assert_eq!(dir.get_i64(timecode::TEXT_SIZE), Some(12));
    assert_eq!(
        dir.get(timecode::TEXT_COLOR),
        Some(&TagValue::IntArray(vec![0xffff, 0xffff, 0xffff]))
    );
    assert_eq!(dir.get_str(timecode::FONT_NAME), Some("Helvetica"));
}

#[test]
fn compressed_movie_atom() {
    let file = container(
        b"moov",
        &[container(b"cmov", &[boxed(b"dcom", b"zlib")]), mvhd(0, 600, 0, 1, true)],
    );
    let md = extract(Cursor::new(file)).unwrap();
    let dir = md.first("QuickTime").unwrap();
    assert_eq!(dir.errors(), ["compressed movies are not supported"]);
    assert_eq!(dir.get_i64(movie::TIMESCALE), Some(600));
}
