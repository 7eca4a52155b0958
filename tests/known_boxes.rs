use boxmeta::boxes::FourCC;
use boxmeta::known_boxes::KnownBox;

#[test]
fn known_box_from_ftyp() {
    let cc = FourCC(*b"ftyp");
    let kb = KnownBox::from(cc);
    assert!(matches!(kb, KnownBox::Ftyp));
    assert_eq!(kb.full_name(), "File Type Box");
}

#[test]
fn known_box_free_form_item() {
    let kb = KnownBox::from(FourCC(*b"----"));
    assert_eq!(kb, KnownBox::FreeForm);
}

#[test]
fn unknown_box_keeps_its_code() {
    let cc = FourCC(*b"zzzz");
    let kb = KnownBox::from(cc);
    assert_eq!(kb, KnownBox::Unknown(cc));
    assert_eq!(kb.full_name(), "'zzzz' box");
}

#[test]
fn fourcc_display_shows_copyright_sign() {
    let cc = FourCC(*b"\xa9nam");
    assert_eq!(cc.to_string(), "©nam");
    assert_eq!(FourCC::from_str("moov"), Some(FourCC(*b"moov")));
    assert_eq!(FourCC::from_str("moo"), None);
}
