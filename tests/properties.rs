// Property tests: every session partitions its input losslessly, honors the
// size bounds, and is independent of how the input was delivered.

use std::io::Cursor;

use aechunk::{Chunk, ChunkConfig, Chunker, Extremum};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = ChunkConfig> {
    (
        3usize..2048,
        prop_oneof![Just(Extremum::Max), Just(Extremum::Min)],
        prop::option::of(0usize..2048),
    )
        .prop_map(|(avg, mode, extra)| {
            ChunkConfig::new(avg, mode, extra.map(|extra| avg + extra)).unwrap()
        })
}

/// Random bytes, and low-entropy bytes that produce many ties.
fn data_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..16_384),
        prop::collection::vec(0u8..4, 0..16_384),
    ]
}

fn push_in_pieces(chunker: &Chunker, data: &[u8], step: usize) -> Vec<Chunk> {
    let mut engine = chunker.engine();
    let mut chunks = Vec::new();
    for piece in data.chunks(step) {
        chunks.extend(engine.push(piece));
    }
    chunks.extend(engine.finish());
    chunks
}

proptest! {
    /// Property: chunks concatenate back to the input, in order, with
    /// contiguous offsets.
    #[test]
    fn chunks_partition_input(config in config_strategy(), data in data_strategy()) {
        let chunks = Chunker::new(config).unwrap().chunk_bytes(data.clone());

        let mut offset = 0u64;
        let mut joined = Vec::with_capacity(data.len());
        for chunk in &chunks {
            prop_assert!(!chunk.is_empty());
            prop_assert_eq!(chunk.offset, offset);
            offset = chunk.end();
            joined.extend_from_slice(&chunk.data);
        }
        prop_assert_eq!(joined, data);
    }

    /// Property: every chunk but the last reaches the theoretical minimum,
    /// and none exceeds the ceiling.
    #[test]
    fn chunk_sizes_are_bounded(config in config_strategy(), data in data_strategy()) {
        let chunks = Chunker::new(config).unwrap().chunk_bytes(data);

        if let Some((_, init)) = chunks.split_last() {
            for chunk in init {
                prop_assert!(chunk.len() >= config.min_chunk_size());
            }
        }
        if let Some(max_size) = config.max_size() {
            for chunk in &chunks {
                prop_assert!(chunk.len() <= max_size);
            }
        }
    }

    /// Property: reads and pushes of any size find the same boundaries as
    /// the whole buffer.
    #[test]
    fn delivery_granularity_does_not_matter(
        config in config_strategy(),
        data in data_strategy(),
        step in 1usize..3000,
    ) {
        let chunker = Chunker::new(config).unwrap();
        let expected = chunker.chunk_bytes(data.clone());

        let pushed = push_in_pieces(&chunker, &data, step);
        prop_assert_eq!(&pushed, &expected);

        let read: Vec<_> = chunker
            .chunk(Cursor::new(&data))
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(&read, &expected);
    }

    /// Property: inputs no longer than four bytes are a single chunk. Final
    /// windows up to `avg_size` bytes are never split, so this holds for
    /// every average size above the minimum of 3.
    #[test]
    fn tiny_inputs_are_one_chunk(
        config in config_strategy().prop_filter("avg_size >= 4", |c| c.avg_size() >= 4),
        data in prop::collection::vec(any::<u8>(), 1..5),
    ) {
        let chunks = Chunker::new(config).unwrap().chunk_bytes(data.clone());
        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(&chunks[0].data[..], &data[..]);
    }
}
