use pngstrip::png::{PngReader, TextEntry};

fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    let mut it = match PngReader::new(&bytes[..]).chunks() {
      Ok(it) => it,
      Err(e) => {
        println!("{e}");
        continue;
      }
    };
    for (n, chunk_res) in it.by_ref().enumerate() {
      match chunk_res {
        Ok(chunk) => {
          let (kind, length, crc) = (chunk.kind(), chunk.length(), chunk.declared_crc());
          println!("{n}: {kind} {length} bytes, crc {crc:08X}");
          if let Ok(Some(entry)) = TextEntry::decode(&chunk) {
            println!("    {entry}");
          }
        }
        Err(e) => println!("{n}: {e}"),
      }
    }
    if let Some(tail) = it.truncated_tail() {
      println!("cut off: {tail:?}");
    }
  }
}
