//! Background fill example.
//!
//! A slow source is drained by the reader's worker thread while several
//! consumers pull from the shared buffer. Scratch buffers come from a
//! `BufferPool` and progress is tracked with atomic cells.
//!
//! Run with:
//!     RUST_LOG=syncrs=debug cargo run --example background_fill

use std::io::{self, Read};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use syncrs::task::run_with_timeout;
use syncrs::{AtomicDuration, AtomicInt64, BufferPool, BufferedReader, ReaderConfig};
use tracing_subscriber::EnvFilter;

/// Produces `remaining` bytes, sleeping before every read.
struct Trickle {
    remaining: usize,
    delay: Duration,
}

impl Read for Trickle {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        thread::sleep(self.delay);
        let n = self.remaining.min(out.len());
        out[..n].fill(b'.');
        self.remaining -= n;
        Ok(n)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = Trickle {
        remaining: 256 * 1024,
        delay: Duration::from_millis(1),
    };
    let config = ReaderConfig::new(4 * 1024)?;
    let reader = Arc::new(BufferedReader::new(source, config)?);

    let pool = BufferPool::new(4, 8 * 1024);
    let bytes = Arc::new(AtomicInt64::default());
    let waiting = Arc::new(AtomicDuration::default());

    println!("Draining 256 KiB with 4 consumers...\n");

    let consumers: Vec<_> = (0..4)
        .map(|id| {
            let reader = Arc::clone(&reader);
            let pool = pool.clone();
            let bytes = Arc::clone(&bytes);
            let waiting = Arc::clone(&waiting);
            thread::spawn(move || -> io::Result<()> {
                let mut scratch = pool.checkout();
                scratch.resize(1024, 0);
                loop {
                    let start = Instant::now();
                    let n = (&*reader).read(&mut scratch)?;
                    waiting.add(start.elapsed());
                    if n == 0 {
                        println!("consumer {id}: end of data");
                        return Ok(());
                    }
                    bytes.add(n as i64);
                }
            })
        })
        .collect();

    for consumer in consumers {
        consumer.join().map_err(|_| "consumer panicked")??;
    }

    println!();
    println!("Bytes read:       {}", bytes.get());
    println!("Time spent waiting: {:?}", waiting.get());
    println!("Buffer pool:      {:?}", pool.stats());

    // Deadline on a blocking job
    let checksum = run_with_timeout(
        || (0..1_000_000u64).fold(0u64, |acc, n| acc.wrapping_add(n * n)),
        Duration::from_secs(5),
    )?;
    println!("Checksum under deadline: {checksum}");

    Ok(())
}
