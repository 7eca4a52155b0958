use boxmeta::{ContainerFormat, ExtractOptions, Metadata, extract_path};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Print the metadata of MP4, QuickTime and 3GP files")]
struct Args {
    /// Media file path
    path: PathBuf,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Skip detection and read the file as this format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Deepest box nesting to walk
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Mp4,
    Quicktime,
    #[value(name = "3gp")]
    ThreeGp,
}

impl From<FormatArg> for ContainerFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Mp4 => ContainerFormat::Mp4,
            FormatArg::Quicktime => ContainerFormat::QuickTime,
            FormatArg::ThreeGp => ContainerFormat::ThreeGp,
        }
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn options(args: &Args) -> ExtractOptions {
    let mut opts = ExtractOptions::default();
    if let Some(format) = args.format {
        opts = opts.with_format(format.into());
    }
    if let Some(depth) = args.max_depth {
        opts = opts.with_max_depth(depth);
    }
    opts
}

fn render_text(metadata: &Metadata) -> String {
    let mut out = String::new();
    for dir in metadata {
        for (tag, value) in dir.tags() {
            out.push_str(&format!("[{}] {} - {}\n", dir.name(), dir.tag_name(tag), value));
        }
        for error in dir.errors() {
            out.push_str(&format!("[{}] error: {}\n", dir.name(), error));
        }
    }
    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(level_for(args.verbose))
        .parse_default_env()
        .init();

    let metadata = extract_path(&args.path, &options(&args))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        print!("{}", render_text(&metadata));
    }

    Ok(())
}
