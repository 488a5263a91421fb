#![no_main]

use std::io::{self, Read};

use aechunk::{ChunkConfig, Chunker, Extremum};
use libfuzzer_sys::fuzz_target;

/// Serves the input in reads whose sizes cycle through `steps`.
struct Jagged<'a> {
    data: &'a [u8],
    steps: &'a [u8],
    turn: usize,
}

impl Read for Jagged<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let step = if self.steps.is_empty() {
            buf.len()
        } else {
            usize::from(self.steps[self.turn % self.steps.len()]).max(1)
        };
        self.turn += 1;

        let n = step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: (u16, bool, Option<u16>, Vec<u8>, Vec<u8>)| {
    let (avg, min_mode, extra, steps, data) = input;
    let avg = usize::from(avg).max(3);
    let mode = if min_mode { Extremum::Min } else { Extremum::Max };
    let config = ChunkConfig::new(avg, mode, extra.map(|e| avg + usize::from(e))).unwrap();
    let chunker = Chunker::new(config).unwrap();

    let expected = chunker.chunk_bytes(data.clone());

    // Verify: reads of any size find the buffer's boundaries
    let reader = Jagged {
        data: &data,
        steps: &steps,
        turn: 0,
    };
    let chunks: Vec<_> = chunker
        .chunk(reader)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(chunks, expected);

    // Verify: pushes of the same sizes do too
    let mut engine = chunker.engine();
    let mut pushed = Vec::new();
    let mut rest = &data[..];
    let mut turn = 0;
    while !rest.is_empty() {
        let step = steps
            .get(turn % steps.len().max(1))
            .map_or(rest.len(), |&s| usize::from(s).max(1))
            .min(rest.len());
        pushed.extend(engine.push(&rest[..step]));
        rest = &rest[step..];
        turn += 1;
    }
    pushed.extend(engine.finish());
    assert_eq!(pushed, expected);
});
