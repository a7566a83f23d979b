#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use syncrs::{BufferedReader, FillMode, ReaderConfig};

/// Replays `data` using `steps` as the sizes of successive source reads.
struct Replay {
    data: Vec<u8>,
    pos: usize,
    steps: Vec<u8>,
    step: usize,
}

impl Read for Replay {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() {
            return Ok(0);
        }
        let want = self.steps.get(self.step % self.steps.len().max(1)).copied().unwrap_or(1);
        self.step += 1;
        let n = (want as usize).max(1).min(out.len()).min(self.data.len() - self.pos);
        out[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fuzz_target!(|input: (Vec<u8>, Vec<u8>, u8, bool)| {
    let (data, steps, read_size, eager) = input;
    let mode = if eager { FillMode::Eager } else { FillMode::Background };
    let config = ReaderConfig::new(16).unwrap().with_fill_mode(mode);

    let source = Replay {
        data: data.clone(),
        pos: 0,
        steps,
        step: 0,
    };
    let mut reader = BufferedReader::new(source, config).unwrap();

    // Verify: every byte arrives exactly once, in order, for any read size
    let mut buf = vec![0u8; (read_size as usize).max(1)];
    let mut out = Vec::with_capacity(data.len());
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, data);

    // Verify: end of data is sticky
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
});
