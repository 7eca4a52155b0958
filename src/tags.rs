//! Tag ids and display names for every directory the front-ends produce.
//!
//! Movie and media directories use small numeric ids. Item-keyed directories (iTunes items,
//! 3GPP asset boxes) use the box's four-character code as a big-endian `u32`.

/// Movie-level tags: the `"MP4"`, `"QuickTime"` and `"3GP"` directories.
pub mod movie {
    pub const MAJOR_BRAND: u32 = 0x0001;
    pub const MINOR_VERSION: u32 = 0x0002;
    pub const COMPATIBLE_BRANDS: u32 = 0x0003;

    pub const CREATION_TIME: u32 = 0x0100;
    pub const MODIFICATION_TIME: u32 = 0x0101;
    pub const TIMESCALE: u32 = 0x0102;
    pub const DURATION: u32 = 0x0103;
    pub const DURATION_SECONDS: u32 = 0x0104;
    pub const PREFERRED_RATE: u32 = 0x0105;
    pub const PREFERRED_VOLUME: u32 = 0x0106;
    pub const PREVIEW_TIME: u32 = 0x0108;
    pub const PREVIEW_DURATION: u32 = 0x0109;
    pub const POSTER_TIME: u32 = 0x010a;
    pub const SELECTION_TIME: u32 = 0x010b;
    pub const SELECTION_DURATION: u32 = 0x010c;
    pub const CURRENT_TIME: u32 = 0x010d;
    pub const NEXT_TRACK_ID: u32 = 0x010e;

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            MAJOR_BRAND => "Major Brand",
            MINOR_VERSION => "Minor Version",
            COMPATIBLE_BRANDS => "Compatible Brands",
            CREATION_TIME => "Creation Time",
            MODIFICATION_TIME => "Modification Time",
            TIMESCALE => "Media Time Scale",
            DURATION => "Duration",
            DURATION_SECONDS => "Duration in Seconds",
            PREFERRED_RATE => "Preferred Rate",
            PREFERRED_VOLUME => "Preferred Volume",
            PREVIEW_TIME => "Preview Time",
            PREVIEW_DURATION => "Preview Duration",
            POSTER_TIME => "Poster Time",
            SELECTION_TIME => "Selection Time",
            SELECTION_DURATION => "Selection Duration",
            CURRENT_TIME => "Current Time",
            NEXT_TRACK_ID => "Next Track ID",
            _ => return None,
        })
    }
}

/// Tags shared by every track media directory.
pub mod media {
    pub const CREATION_TIME: u32 = 0x0101;
    pub const MODIFICATION_TIME: u32 = 0x0102;
    pub const TIMESCALE: u32 = 0x0103;
    pub const DURATION: u32 = 0x0104;
    pub const DURATION_SECONDS: u32 = 0x0105;
    pub const LANGUAGE: u32 = 0x0106;
    pub const LANGUAGE_CODE: u32 = 0x0107;
    pub const HANDLER_NAME: u32 = 0x0108;
    pub const TRACK_ID: u32 = 0x0109;

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            CREATION_TIME => "Creation Time",
            MODIFICATION_TIME => "Modification Time",
            TIMESCALE => "Media Time Scale",
            DURATION => "Duration",
            DURATION_SECONDS => "Duration in Seconds",
            LANGUAGE => "ISO 639-2 Language Code",
            LANGUAGE_CODE => "Macintosh Language Code",
            HANDLER_NAME => "Handler Name",
            TRACK_ID => "Track ID",
            _ => return None,
        })
    }
}

pub mod sound {
    pub const FORMAT: u32 = 0x0201;
    pub const NUMBER_OF_CHANNELS: u32 = 0x0202;
    pub const SAMPLE_SIZE: u32 = 0x0203;
    pub const SAMPLE_RATE: u32 = 0x0204;
    pub const BALANCE: u32 = 0x0205;
    pub const TRACK_VOLUME: u32 = 0x0206;

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            FORMAT => "Format",
            NUMBER_OF_CHANNELS => "Number of Channels",
            SAMPLE_SIZE => "Sample Size",
            SAMPLE_RATE => "Sample Rate",
            BALANCE => "Balance",
            TRACK_VOLUME => "Track Volume",
            _ => return super::media::name(tag),
        })
    }
}

pub mod video {
    pub const FORMAT: u32 = 0x0201;
    pub const WIDTH: u32 = 0x0202;
    pub const HEIGHT: u32 = 0x0203;
    pub const HORIZONTAL_RESOLUTION: u32 = 0x0204;
    pub const VERTICAL_RESOLUTION: u32 = 0x0205;
    pub const FRAMES_PER_SAMPLE: u32 = 0x0206;
    pub const COMPRESSOR_NAME: u32 = 0x0207;
    pub const DEPTH: u32 = 0x0208;
    pub const GRAPHICS_MODE: u32 = 0x0209;
    pub const OPCOLOR: u32 = 0x020a;
    pub const FRAME_RATE: u32 = 0x020b;
    pub const TRACK_WIDTH: u32 = 0x020c;
    pub const TRACK_HEIGHT: u32 = 0x020d;
    pub const ROTATION: u32 = 0x020e;

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            FORMAT => "Compression Type",
            WIDTH => "Width",
            HEIGHT => "Height",
            HORIZONTAL_RESOLUTION => "Horizontal Resolution",
            VERTICAL_RESOLUTION => "Vertical Resolution",
            FRAMES_PER_SAMPLE => "Frames per Sample",
            COMPRESSOR_NAME => "Compressor Name",
            DEPTH => "Depth",
            GRAPHICS_MODE => "Graphics Mode",
            OPCOLOR => "Opcolor",
            FRAME_RATE => "Frame Rate",
            TRACK_WIDTH => "Track Width",
            TRACK_HEIGHT => "Track Height",
            ROTATION => "Rotation",
            _ => return super::media::name(tag),
        })
    }
}

pub mod hint {
    pub const FORMAT: u32 = 0x0201;
    pub const MAX_PDU_SIZE: u32 = 0x0202;
    pub const AVERAGE_PDU_SIZE: u32 = 0x0203;
    pub const MAX_BITRATE: u32 = 0x0204;
    pub const AVERAGE_BITRATE: u32 = 0x0205;

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            FORMAT => "Format",
            MAX_PDU_SIZE => "Max PDU Size",
            AVERAGE_PDU_SIZE => "Average PDU Size",
            MAX_BITRATE => "Max Bitrate",
            AVERAGE_BITRATE => "Average Bitrate",
            _ => return super::media::name(tag),
        })
    }
}

pub mod timecode {
    pub const FORMAT: u32 = 0x0201;
    pub const FLAGS: u32 = 0x0202;
    pub const DROP_FRAME: u32 = 0x0203;
    pub const TIMECODE_TIMESCALE: u32 = 0x0204;
    pub const FRAME_DURATION: u32 = 0x0205;
    pub const NUMBER_OF_FRAMES: u32 = 0x0206;
    pub const TEXT_FONT: u32 = 0x0207;
    pub const TEXT_FACE: u32 = 0x0208;
    pub const TEXT_SIZE: u32 = 0x0209;
    pub const TEXT_COLOR: u32 = 0x020a;
    pub const BACKGROUND_COLOR: u32 = 0x020b;
    pub const FONT_NAME: u32 = 0x020c;

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            FORMAT => "Format",
            FLAGS => "Flags",
            DROP_FRAME => "Drop Frame",
            TIMECODE_TIMESCALE => "Timecode Time Scale",
            FRAME_DURATION => "Frame Duration",
            NUMBER_OF_FRAMES => "Number of Frames",
            TEXT_FONT => "Text Font",
            TEXT_FACE => "Text Face",
            TEXT_SIZE => "Text Size",
            TEXT_COLOR => "Text Color",
            BACKGROUND_COLOR => "Background Color",
            FONT_NAME => "Font Name",
            _ => return super::media::name(tag),
        })
    }
}

/// iTunes-style items, keyed by item code.
pub mod itunes {
    const fn cc(b: &[u8; 4]) -> u32 {
        u32::from_be_bytes(*b)
    }

    pub const TITLE: u32 = cc(b"\xa9nam");
    pub const ARTIST: u32 = cc(b"\xa9ART");
    pub const ALBUM: u32 = cc(b"\xa9alb");
    pub const ALBUM_ARTIST: u32 = cc(b"aART");
    pub const COMMENT: u32 = cc(b"\xa9cmt");
    pub const YEAR: u32 = cc(b"\xa9day");
    pub const GENRE: u32 = cc(b"\xa9gen");
    pub const GENRE_ID: u32 = cc(b"gnre");
    pub const COMPOSER: u32 = cc(b"\xa9wrt");
    pub const ENCODER: u32 = cc(b"\xa9too");
    pub const GROUPING: u32 = cc(b"\xa9grp");
    pub const LYRICS: u32 = cc(b"\xa9lyr");
    pub const TRACK_NUMBER: u32 = cc(b"trkn");
    pub const DISK_NUMBER: u32 = cc(b"disk");
    pub const TEMPO: u32 = cc(b"tmpo");
    pub const COMPILATION: u32 = cc(b"cpil");
    pub const COVER_ART: u32 = cc(b"covr");
    pub const COPYRIGHT: u32 = cc(b"cprt");
    pub const DESCRIPTION: u32 = cc(b"desc");

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            TITLE => "Title",
            ARTIST => "Artist",
            ALBUM => "Album",
            ALBUM_ARTIST => "Album Artist",
            COMMENT => "Comment",
            YEAR => "Year",
            GENRE => "Genre",
            GENRE_ID => "Genre ID",
            COMPOSER => "Composer",
            ENCODER => "Encoder",
            GROUPING => "Grouping",
            LYRICS => "Lyrics",
            TRACK_NUMBER => "Track Number",
            DISK_NUMBER => "Disk Number",
            TEMPO => "Tempo",
            COMPILATION => "Compilation",
            COVER_ART => "Cover Art",
            COPYRIGHT => "Copyright",
            DESCRIPTION => "Description",
            _ => return None,
        })
    }
}

/// 3GPP asset boxes, keyed by box code, plus the movie-level tags of the `"3GP"` directory.
pub mod asset {
    const fn cc(b: &[u8; 4]) -> u32 {
        u32::from_be_bytes(*b)
    }

    pub const TITLE: u32 = cc(b"titl");
    pub const DESCRIPTION: u32 = cc(b"dscp");
    pub const COPYRIGHT: u32 = cc(b"cprt");
    pub const PERFORMER: u32 = cc(b"perf");
    pub const AUTHOR: u32 = cc(b"auth");
    pub const GENRE: u32 = cc(b"gnre");
    pub const RATING: u32 = cc(b"rtng");
    pub const CLASSIFICATION: u32 = cc(b"clsf");
    pub const KEYWORDS: u32 = cc(b"kywd");
    pub const LOCATION: u32 = cc(b"loci");
    pub const ALBUM: u32 = cc(b"albm");
    pub const RECORDING_YEAR: u32 = cc(b"yrrc");
    pub const ALBUM_TRACK_NUMBER: u32 = 0x0301;
    pub const LOCATION_COORDINATES: u32 = 0x0302;

    pub fn name(tag: u32) -> Option<&'static str> {
        Some(match tag {
            TITLE => "Title",
            DESCRIPTION => "Description",
            COPYRIGHT => "Copyright",
            PERFORMER => "Performer",
            AUTHOR => "Author",
            GENRE => "Genre",
            RATING => "Rating",
            CLASSIFICATION => "Classification",
            KEYWORDS => "Keywords",
            LOCATION => "Location",
            ALBUM => "Album",
            RECORDING_YEAR => "Recording Year",
            ALBUM_TRACK_NUMBER => "Album Track Number",
            LOCATION_COORDINATES => "Location Coordinates",
            _ => return super::movie::name(tag),
        })
    }
}
