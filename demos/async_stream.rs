//! Async streaming chunking example.
//!
//! A tokio writer trickles data through an in-memory pipe while the chunk
//! stream consumes the other end.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use aechunk::{ChunkConfig, Extremum, chunk_async};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..400_000u32)
        .map(|i| (i.wrapping_mul(0x9E37_79B9) >> 24) as u8)
        .collect();

    println!("Async chunking {} bytes of data...\n", data.len());

    let (mut tx, rx) = tokio::io::duplex(8192);
    let writer = tokio::spawn(async move {
        for batch in data.chunks(8192) {
            // Simulate async delay (e.g., waiting for network data)
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
            tx.write_all(batch).await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let config = ChunkConfig::new(16 * 1024, Extremum::Min, Some(64 * 1024))?;
    let mut stream = chunk_async(rx.compat(), config)?;

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "  Chunk {}: offset={:>8}, len={:>8}",
            total_chunks,
            chunk.offset,
            chunk.len()
        );
    }

    writer.await??;

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
