use crate::boxes::FourCC;

/// Typed view over the box types the front-ends recognise.
///
/// This only names boxes; whether a type is walked as a container or decoded as a leaf is up
/// to the handler that meets it. Anything not in this list becomes `KnownBox::Unknown(fourcc)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBox {
    // File-level / top-level
    Ftyp,
    Moov,
    Mdat,
    Free,
    Skip,
    Wide,
    Pnot,
    Cmov,
    Meta,

    // moov children
    Mvhd,
    Trak,
    Udta,

    // trak children
    Tkhd,
    Edts,
    Mdia,

    // mdia children
    Mdhd,
    Hdlr,
    Minf,

    // minf children
    Vmhd,
    Smhd,
    Hmhd,
    Nmhd,
    Gmhd,
    Dinf,
    Stbl,

    // gmhd children
    Tmcd,
    Tcmi,

    // stbl children
    Stsd,
    Stts,
    Stsz,
    Stco,

    // meta / item list
    Ilst,
    Data,
    Mean,
    Name,
    FreeForm,

    // 3GPP asset boxes
    Titl,
    Dscp,
    Cprt,
    Perf,
    Auth,
    Gnre,
    Rtng,
    Clsf,
    Kywd,
    Loci,
    Albm,
    Yrrc,

    Uuid,

    // Anything else
    Unknown(FourCC),
}

impl From<FourCC> for KnownBox {
    fn from(cc: FourCC) -> Self {
        match &cc.0 {
            b"ftyp" => KnownBox::Ftyp,
            b"moov" => KnownBox::Moov,
            b"mdat" => KnownBox::Mdat,
            b"free" => KnownBox::Free,
            b"skip" => KnownBox::Skip,
            b"wide" => KnownBox::Wide,
            b"pnot" => KnownBox::Pnot,
            b"cmov" => KnownBox::Cmov,
            b"meta" => KnownBox::Meta,

            b"mvhd" => KnownBox::Mvhd,
            b"trak" => KnownBox::Trak,
            b"udta" => KnownBox::Udta,

            b"tkhd" => KnownBox::Tkhd,
            b"edts" => KnownBox::Edts,
            b"mdia" => KnownBox::Mdia,

            b"mdhd" => KnownBox::Mdhd,
            b"hdlr" => KnownBox::Hdlr,
            b"minf" => KnownBox::Minf,

            b"vmhd" => KnownBox::Vmhd,
            b"smhd" => KnownBox::Smhd,
            b"hmhd" => KnownBox::Hmhd,
            b"nmhd" => KnownBox::Nmhd,
            b"gmhd" => KnownBox::Gmhd,
            b"dinf" => KnownBox::Dinf,
            b"stbl" => KnownBox::Stbl,

            b"tmcd" => KnownBox::Tmcd,
            b"tcmi" => KnownBox::Tcmi,

            b"stsd" => KnownBox::Stsd,
            b"stts" => KnownBox::Stts,
            b"stsz" => KnownBox::Stsz,
            b"stco" => KnownBox::Stco,

            b"ilst" => KnownBox::Ilst,
            b"data" => KnownBox::Data,
            b"mean" => KnownBox::Mean,
            b"name" => KnownBox::Name,
            b"----" => KnownBox::FreeForm,

            b"titl" => KnownBox::Titl,
            b"dscp" => KnownBox::Dscp,
            b"cprt" => KnownBox::Cprt,
            b"perf" => KnownBox::Perf,
            b"auth" => KnownBox::Auth,
            b"gnre" => KnownBox::Gnre,
            b"rtng" => KnownBox::Rtng,
            b"clsf" => KnownBox::Clsf,
            b"kywd" => KnownBox::Kywd,
            b"loci" => KnownBox::Loci,
            b"albm" => KnownBox::Albm,
            b"yrrc" => KnownBox::Yrrc,

            b"uuid" => KnownBox::Uuid,

            _ => KnownBox::Unknown(cc),
        }
    }
}

impl KnownBox {
    /// Human-readable box name, used to attribute decode errors.
    pub fn full_name(&self) -> String {
        let name = match self {
            KnownBox::Ftyp => "File Type Box",
            KnownBox::Moov => "Movie Box",
            KnownBox::Mdat => "Media Data Box",
            KnownBox::Free => "Free Space Box",
            KnownBox::Skip => "Skip Box",
            KnownBox::Wide => "Wide Atom",
            KnownBox::Pnot => "Preview Atom",
            KnownBox::Cmov => "Compressed Movie Atom",
            KnownBox::Meta => "Meta Box",
            KnownBox::Mvhd => "Movie Header Box",
            KnownBox::Trak => "Track Box",
            KnownBox::Udta => "User Data Box",
            KnownBox::Tkhd => "Track Header Box",
            KnownBox::Edts => "Edit Box",
            KnownBox::Mdia => "Media Box",
            KnownBox::Mdhd => "Media Header Box",
            KnownBox::Hdlr => "Handler Reference Box",
            KnownBox::Minf => "Media Information Box",
            KnownBox::Vmhd => "Video Media Header Box",
            KnownBox::Smhd => "Sound Media Header Box",
            KnownBox::Hmhd => "Hint Media Header Box",
            KnownBox::Nmhd => "Null Media Header Box",
            KnownBox::Gmhd => "Base Media Information Header Atom",
            KnownBox::Dinf => "Data Information Box",
            KnownBox::Stbl => "Sample Table Box",
            KnownBox::Tmcd => "Timecode Atom",
            KnownBox::Tcmi => "Timecode Media Information Atom",
            KnownBox::Stsd => "Sample Description Box",
            KnownBox::Stts => "Decoding Time to Sample Box",
            KnownBox::Stsz => "Sample Size Box",
            KnownBox::Stco => "Chunk Offset Box",
            KnownBox::Ilst => "Item List Box",
            KnownBox::Data => "Data Box",
            KnownBox::Mean => "Mean Box",
            KnownBox::Name => "Name Box",
            KnownBox::FreeForm => "Free-form Item",
            KnownBox::Titl => "Title Box",
            KnownBox::Dscp => "Description Box",
            KnownBox::Cprt => "Copyright Box",
            KnownBox::Perf => "Performer Box",
            KnownBox::Auth => "Author Box",
            KnownBox::Gnre => "Genre Box",
            KnownBox::Rtng => "Rating Box",
            KnownBox::Clsf => "Classification Box",
            KnownBox::Kywd => "Keywords Box",
            KnownBox::Loci => "Location Information Box",
            KnownBox::Albm => "Album Box",
            KnownBox::Yrrc => "Recording Year Box",
            KnownBox::Uuid => "User Extension Box",
            KnownBox::Unknown(cc) => return format!("'{}' box", cc),
        };
        name.to_string()
    }
}
