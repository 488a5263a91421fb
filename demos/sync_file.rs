//! File chunking example.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file [avg_size] [max|min]

use std::env;
use std::fs::File;

use aechunk::{ChunkConfig, Chunker, Extremum};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let avg_size = match args.next() {
        Some(avg) => avg.parse()?,
        None => 32 * 1024,
    };
    let mode = match args.next().as_deref() {
        Some("min") => Extremum::Min,
        _ => Extremum::Max,
    };

    println!("Chunking file: {}\n", path);

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    let config = ChunkConfig::new(avg_size, mode, Some(4 * avg_size))?;
    let chunker = Chunker::new(config)?;

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    for chunk in chunker.chunk(file) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "Chunk {}: offset={:>10}, len={:>8}",
            total_chunks,
            chunk.offset,
            chunk.len()
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
