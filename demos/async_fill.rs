//! Async reading example.
//!
//! The reader's worker stays a plain thread; the async side just polls the
//! shared buffer through `futures_io::AsyncRead`.
//!
//! Run with:
//!     cargo run --example async_fill --features async-io

use std::io;
use std::thread;
use std::time::Duration;

use futures_util::AsyncReadExt;
use syncrs::{BufferedReader, ReaderConfig};

/// Emits one line every few milliseconds.
struct Ticker {
    left: u32,
}

impl io::Read for Ticker {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.left == 0 {
            return Ok(0);
        }
        thread::sleep(Duration::from_millis(5));
        self.left -= 1;
        let line = format!("tick {}\n", self.left);
        let n = line.len().min(out.len());
        out[..n].copy_from_slice(&line.as_bytes()[..n]);
        Ok(n)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufferedReader::new(Ticker { left: 20 }, ReaderConfig::default())?;

    let mut text = String::new();
    reader.read_to_string(&mut text).await?;

    print!("{text}");
    println!("\nReceived {} lines", text.lines().count());
    Ok(())
}
