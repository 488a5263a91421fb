#![no_main]

use aechunk::{ChunkConfig, Chunker, Extremum};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u16, bool, Option<u16>, Vec<u8>)| {
    let (avg, min_mode, extra, data) = input;
    let avg = usize::from(avg).max(3);
    let mode = if min_mode { Extremum::Min } else { Extremum::Max };
    let config = ChunkConfig::new(avg, mode, extra.map(|e| avg + usize::from(e))).unwrap();
    let chunker = Chunker::new(config).unwrap();

    let chunks = chunker.chunk_bytes(data.clone());

    // Verify: size bounds
    for (i, chunk) in chunks.iter().enumerate() {
        if let Some(max_size) = config.max_size() {
            assert!(chunk.len() <= max_size);
        }
        // Only enforce the minimum for chunks that are not the last one
        if i < chunks.len() - 1 {
            assert!(chunk.len() >= config.min_chunk_size());
        }
    }

    // Verify: chunks reproduce the input with contiguous offsets
    let mut expected_offset = 0u64;
    let mut joined = Vec::with_capacity(data.len());
    for chunk in &chunks {
        assert_eq!(chunk.offset, expected_offset);
        expected_offset += chunk.len() as u64;
        joined.extend_from_slice(&chunk.data);
    }
    assert_eq!(joined, data);

    // Verify: determinism
    assert_eq!(chunker.chunk_bytes(data), chunks);
});
