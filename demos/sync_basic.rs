//! Basic synchronous chunking example with the push API.
//!
//! Run with:
//!     cargo run --example sync_basic

use aechunk::{ChunkConfig, ChunkEngine, Extremum};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Some sample data with structure: a repeating ramp disturbed by a cheap LCG
    let mut state = 1u32;
    let data: Vec<u8> = (0..1024 * 1024u32)
        .map(|i| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (i as u8).wrapping_add((state >> 28) as u8)
        })
        .collect();

    let config = ChunkConfig::new(16 * 1024, Extremum::Max, Some(64 * 1024))?;
    println!(
        "Chunking {} bytes (avg {}, window {}, width {}, max {:?})...\n",
        data.len(),
        config.avg_size(),
        config.window_size(),
        config.width(),
        config.max_size()
    );

    let mut engine = ChunkEngine::new(config)?;
    let mut total_chunks = 0;
    let mut total_bytes = 0;

    // Simulate streaming data in batches
    let batch_size = 8 * 1024; // 8 KB batches
    for batch in data.chunks(batch_size) {
        for chunk in engine.push(batch) {
            total_chunks += 1;
            total_bytes += chunk.len();
            println!("Chunk {}: offset={}, len={}", total_chunks, chunk.offset, chunk.len());
        }
    }

    // Finalize stream
    for chunk in engine.finish() {
        total_chunks += 1;
        total_bytes += chunk.len();
        println!("Chunk {}: offset={}, len={} (final)", total_chunks, chunk.offset, chunk.len());
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
