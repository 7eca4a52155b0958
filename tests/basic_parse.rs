mod common;

use boxmeta::boxes::{BoxSize, FourCC};
use boxmeta::parser::read_box_header;
use boxmeta::{ByteReader, ParseError};
use std::io::Cursor;

fn make_minimal_file() -> Vec<u8> {
    // [ftyp box]
    // size: 24 (0x18), type: "ftyp", payload: 16 bytes
    common::ftyp(b"isom", 512, &[b"isom", b"avc1"])
}

#[test]
fn read_single_ftyp_header() {
    let data = make_minimal_file();
    let mut r = ByteReader::new(Cursor::new(data)).unwrap();

    let hdr = read_box_header(&mut r).expect("read_box_header failed");

    assert_eq!(hdr.start, 0);
    assert_eq!(hdr.size, BoxSize::Fixed(24));
    assert_eq!(hdr.typ, FourCC(*b"ftyp"));
    assert_eq!(hdr.header_size, 8);
    assert_eq!(hdr.payload_len(), Some(16));
    assert_eq!(r.position(), 8);
}

#[test]
fn extended_size_header_is_16_bytes() {
    let data = common::large_boxed(b"mdat", &[0u8; 32]);
    let mut r = ByteReader::new(Cursor::new(data)).unwrap();

    let hdr = read_box_header(&mut r).unwrap();
    assert_eq!(hdr.size, BoxSize::Fixed(48));
    assert_eq!(hdr.header_size, 16);
    assert_eq!(hdr.payload_start(), 16);
    assert_eq!(hdr.end(), Some(48));
}

#[test]
fn zero_size_means_to_end() {
    let data = common::to_end_boxed(b"mdat", &[0u8; 5]);
    let mut r = ByteReader::new(Cursor::new(data)).unwrap();

    let hdr = read_box_header(&mut r).unwrap();
    assert_eq!(hdr.size, BoxSize::ToEnd);
    assert!(hdr.extends_to_end());
    assert_eq!(hdr.end(), None);
    assert_eq!(hdr.payload_len(), None);
}

#[test]
fn size_below_header_is_invalid() {
    let mut data = 4u32.to_be_bytes().to_vec();
    data.extend_from_slice(b"free");
    let mut r = ByteReader::new(Cursor::new(data)).unwrap();

    let hdr = read_box_header(&mut r).unwrap();
    match hdr.validate() {
        Err(ParseError::InvalidSize { size, header_size }) => {
            assert_eq!(size, 4);
            assert_eq!(header_size, 8);
        }
        other => panic!("expected invalid size, got {:?}", other),
    }

    // an extended size must cover the 16-byte header
    let mut data = 1u32.to_be_bytes().to_vec();
    data.extend_from_slice(b"free");
    data.extend_from_slice(&12u64.to_be_bytes());
    let mut r = ByteReader::new(Cursor::new(data)).unwrap();
    assert!(read_box_header(&mut r).unwrap().validate().is_err());
}

#[test]
fn short_header_is_insufficient_data() {
    let mut r = ByteReader::new(Cursor::new(vec![0u8, 0, 0, 24, b'f'])).unwrap();
    let err = read_box_header(&mut r).unwrap_err();
    assert!(err.is_insufficient_data());
}
