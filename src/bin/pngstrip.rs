//! CLI for pngstrip: list the metadata chunks of PNG files and write copies
//! without them.

use clap::Parser;
use log::{debug, info};
use pngstrip::png::*;
use std::{
  error::Error,
  fs::File,
  io::{self, BufReader, BufWriter, Read, Write},
  path::{Path, PathBuf},
  process::ExitCode,
};

#[derive(Parser)]
#[command(name = "pngstrip", version)]
#[command(
  about = "Print the metadata chunks of PNG files, or write copies without them",
  long_about = None
)]
struct Args {
  /// PNG files to read. With no files, reads one PNG from stdin.
  files: Vec<PathBuf>,

  /// Print the non-critical chunk types, and the contents of any text chunks
  #[arg(short, long)]
  tags: bool,

  /// Print the decoded IHDR fields
  #[arg(long)]
  header: bool,

  /// Write `<name>-cleaned.png` next to each input, keeping only the chunks
  /// needed for the pixels (stdin is written to `./stdin-0.png`)
  #[arg(short, long)]
  clean: bool,

  /// Also keep chunks with this type code when cleaning (for example `tRNS`).
  /// Can be given more than once.
  #[arg(short, long = "keep", value_name = "CODE", value_parser = parse_keep)]
  keep: Vec<ChunkKind>,

  /// Fail on a chunk that's cut off in its data or CRC, instead of quietly
  /// stopping at the last whole chunk
  #[arg(long)]
  strict: bool,
}

fn parse_keep(s: &str) -> Result<ChunkKind, String> {
  let code: [u8; 4] =
    s.as_bytes().try_into().map_err(|_| format!("`{s}` is not a 4 letter chunk type code"))?;
  match classify(ChunkTypeCode(code)) {
    ChunkKind::Unknown => Err(format!("`{s}` is not a chunk type pngstrip knows about")),
    kind => Ok(kind),
  }
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
  let args = Args::parse();

  let options = ParseOptions {
    truncation: if args.strict { TruncationPolicy::Strict } else { TruncationPolicy::Lenient },
    ..ParseOptions::default()
  };
  let stripper = args.keep.iter().fold(Stripper::new(), |s, kind| s.keep(*kind));

  let mut failed = 0_usize;
  if args.files.is_empty() {
    if let Err(e) = run_stdin(&args, options, &stripper) {
      eprintln!("{e}");
      failed += 1;
    }
  }
  for path in &args.files {
    if let Err(e) = run_file(path, &args, options, &stripper) {
      eprintln!("{e}");
      failed += 1;
    }
  }

  if failed == 0 {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}

fn run_stdin(
  args: &Args, options: ParseOptions, stripper: &Stripper,
) -> Result<(), Box<dyn Error>> {
  let dir =
    std::env::current_dir().map_err(|e| format!("unable to determine current directory: {e}"))?;
  process("stdin", io::stdin().lock(), &dir.join("stdin-0.png"), args, options, stripper)
}

fn run_file(
  path: &Path, args: &Args, options: ParseOptions, stripper: &Stripper,
) -> Result<(), Box<dyn Error>> {
  let name = path.display().to_string();
  let file = File::open(path).map_err(|e| format!("unable to open {name}: {e}"))?;
  process(&name, file, &cleaned_path(path), args, options, stripper)
}

/// `dir/name.png` becomes `dir/name-cleaned.png`.
fn cleaned_path(path: &Path) -> PathBuf {
  let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
  path.with_file_name(format!("{stem}-cleaned.png"))
}

fn process<R: Read>(
  name: &str, source: R, dest: &Path, args: &Args, options: ParseOptions, stripper: &Stripper,
) -> Result<(), Box<dyn Error>> {
  let mut reader = PngReader::with_options(BufReader::new(source), options);
  if !reader.check_signature().map_err(|e| format!("unable to read {name}: {e}"))? {
    return Err(format!("{name} is not a PNG").into());
  }
  let doc = reader.parse().map_err(|e| format!("problem parsing {name}: {e}"))?;
  info!("{name}: {} chunks", doc.len());

  let mut out = io::stdout().lock();
  if args.tags {
    print_tags(&mut out, name, &doc)?;
  }
  if args.header {
    print_header(&mut out, name, &doc)?;
  }
  if args.clean {
    write_cleaned(name, &doc, dest, stripper)?;
  }
  Ok(())
}

fn print_tags(out: &mut impl Write, name: &str, doc: &PngDocument) -> io::Result<()> {
  writeln!(out, "{name} tags:")?;
  for chunk in doc.ancillary() {
    match chunk.kind() {
      ChunkKind::Unknown if chunk.code().is_ancillary() => {
        writeln!(out, "  {} (Unknown, ancillary)", chunk.code())?
      }
      ChunkKind::Unknown => writeln!(out, "  {} (Unknown, critical!)", chunk.code())?,
      kind => writeln!(out, "  {kind}")?,
    }
    match TextEntry::decode(chunk) {
      Ok(Some(entry)) => writeln!(out, "   {entry}")?,
      Ok(None) => (),
      Err(e) => writeln!(out, "   ({e})")?,
    }
  }
  if let Some(tail) = doc.truncated_tail() {
    let (code, got, declared) = (tail.code(), tail.data().len(), tail.length());
    writeln!(out, "  {code} (cut off after {got} of {declared} bytes)")?;
  }
  Ok(())
}

fn print_header(out: &mut impl Write, name: &str, doc: &PngDocument) -> io::Result<()> {
  for chunk in doc.iter().filter(|c| c.kind() == ChunkKind::Header) {
    writeln!(out, "{name} Header")?;
    match chunk.to_ihdr() {
      Ok(ihdr) => {
        writeln!(out, "Width\t{}", ihdr.width)?;
        writeln!(out, "Height\t{}", ihdr.height)?;
        writeln!(out, "Bit Depth\t{}", ihdr.bit_depth)?;
        match ihdr.color_type() {
          Some(color_type) => writeln!(out, "Color Type\t{} ({color_type:?})", ihdr.color_type)?,
          None => writeln!(out, "Color Type\t{}", ihdr.color_type)?,
        }
        writeln!(out, "Compression Method\t{}", ihdr.compression_method)?;
        writeln!(out, "Filter Method\t{}", ihdr.filter_method)?;
        writeln!(out, "Interlace Method\t{}", ihdr.interlace_method)?;
      }
      Err(e) => writeln!(out, "({e})")?,
    }
    let palette = doc.iter().find(|c| c.kind() == ChunkKind::Palette);
    if let Some(entries) = palette.and_then(Chunk::palette_entries) {
      writeln!(out, "Palette Entries\t{}", entries.len())?;
    }
    writeln!(out)?;
  }
  Ok(())
}

fn write_cleaned(
  name: &str, doc: &PngDocument, dest: &Path, stripper: &Stripper,
) -> Result<(), Box<dyn Error>> {
  let file = File::create(dest)
    .map_err(|e| format!("unable to open cleaning destination for {name}: {e}"))?;
  match stripper.write_to(doc, BufWriter::new(file)) {
    Ok(written) => {
      debug!("wrote {written} bytes to {}", dest.display());
      Ok(())
    }
    Err(e) => {
      // don't leave a partial PNG behind
      if let Err(rm) = std::fs::remove_file(dest) {
        debug!("couldn't remove {}: {rm}", dest.display());
      }
      Err(format!("unable to strip tags for {name}: {e}").into())
    }
  }
}
