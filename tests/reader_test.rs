// Integration tests for BufferedReader
// Tests cover: ordering, short reads, sticky terminal states, fill modes, close

use std::io::{self, Read};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use syncrs::{BufferedReader, FillMode, ReaderConfig, SourceError};

/// Yields `data` in pieces of at most `step` bytes, then fails with `fail`
/// if set, otherwise reports end of data.
struct ScriptedSource {
    data: Vec<u8>,
    pos: usize,
    step: usize,
    fail: Option<io::ErrorKind>,
    delay: Duration,
}

impl ScriptedSource {
    fn new(data: &[u8], step: usize) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            step,
            fail: None,
            delay: Duration::ZERO,
        }
    }

    fn failing(mut self, kind: io::ErrorKind) -> Self {
        self.fail = Some(kind);
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if self.pos == self.data.len() {
            return match self.fail {
                Some(kind) => Err(io::Error::new(kind, "scripted failure")),
                None => Ok(0),
            };
        }
        let n = self.step.min(out.len()).min(self.data.len() - self.pos);
        out[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn one_byte_config() -> ReaderConfig {
    ReaderConfig::new(1).unwrap()
}

// ============================================================================
// Ordering and Exhaustion
// ============================================================================

#[test]
fn test_five_byte_source_in_one_byte_chunks() {
    let source = ScriptedSource::new(b"hello", 1);
    let mut reader = BufferedReader::new(source, one_byte_config()).unwrap();

    let mut collected = Vec::new();
    let mut buf = [0u8; 3];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        collected.extend_from_slice(&buf[..n]);
    }

    assert_eq!(collected, b"hello", "All bytes must arrive in order");

    for _ in 0..3 {
        assert_eq!(
            reader.read(&mut buf).unwrap(),
            0,
            "End of data must be reported on every later read"
        );
    }
}

#[test]
fn test_short_reads_are_valid() {
    let source = ScriptedSource::new(b"abc", 3);
    let reader = BufferedReader::new(source, ReaderConfig::eager()).unwrap();

    let mut big = [0u8; 64];
    let n = (&reader).read(&mut big).unwrap();
    assert_eq!(n, 3, "Read returns what is queued without waiting for more");
    assert_eq!(&big[..n], b"abc");
}

#[test]
fn test_large_source_round_trips() {
    let data: Vec<u8> = (0..100_000).map(|i| (i % 251) as u8).collect();
    let source = ScriptedSource::new(&data, 777);
    let mut reader = BufferedReader::new(source, ReaderConfig::default()).unwrap();

    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
}

// ============================================================================
// Failure Handling
// ============================================================================

#[test]
fn test_error_after_three_bytes() {
    let source = ScriptedSource::new(b"xyz", 1).failing(io::ErrorKind::ConnectionAborted);
    let mut reader = BufferedReader::new(source, one_byte_config()).unwrap();

    let mut collected = Vec::new();
    let mut buf = [0u8; 2];
    let err = loop {
        match reader.read(&mut buf) {
            Ok(0) => panic!("a failed source must not look like end of data"),
            Ok(n) => collected.extend_from_slice(&buf[..n]),
            Err(e) => break e,
        }
    };

    assert_eq!(collected, b"xyz", "Bytes before the failure are delivered first");
    assert_eq!(err.kind(), io::ErrorKind::ConnectionAborted);

    let recorded = err
        .get_ref()
        .and_then(|e| e.downcast_ref::<SourceError>())
        .expect("payload is the recorded source error");
    assert_eq!(recorded.kind(), io::ErrorKind::ConnectionAborted);

    for _ in 0..3 {
        let again = reader.read(&mut buf).unwrap_err();
        assert_eq!(again.kind(), io::ErrorKind::ConnectionAborted, "Error is sticky");
    }
}

#[test]
fn test_interrupted_reads_are_retried() {
    struct Flaky {
        calls: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => Err(io::Error::from(io::ErrorKind::Interrupted)),
                2 => {
                    out[0] = b'!';
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    let mut reader = BufferedReader::new(Flaky { calls: 0 }, ReaderConfig::eager()).unwrap();
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, b"!");
}

#[test]
fn test_panicking_source_terminates_stream() {
    struct PanicsAfterOne {
        sent: bool,
    }

    impl Read for PanicsAfterOne {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                panic!("source gave up");
            }
            self.sent = true;
            out[0] = b'k';
            Ok(1)
        }
    }

    let reader =
        BufferedReader::new(PanicsAfterOne { sent: false }, one_byte_config()).unwrap();

    let mut buf = [0u8; 4];
    let n = reader.read_timeout(&mut buf, Duration::from_secs(5)).unwrap();
    assert_eq!(&buf[..n], b"k");

    let err = reader
        .read_timeout(&mut buf, Duration::from_secs(5))
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other, "Panic is a failure, not a timeout");
    assert!(reader.is_terminated());

    let again = (&reader).read(&mut buf).unwrap_err();
    assert_eq!(again.kind(), io::ErrorKind::Other, "Failure is sticky");
}

// ============================================================================
// Fill Modes
// ============================================================================

#[test]
fn test_eager_mode_blocks_until_drained() {
    let delay = Duration::from_millis(10);
    let source = ScriptedSource::new(b"slow", 1).slow(delay);

    let start = Instant::now();
    let reader = BufferedReader::new(source, ReaderConfig::eager()).unwrap();

    // 4 data reads plus the end-of-data read.
    assert!(start.elapsed() >= delay * 5);
    assert!(reader.is_terminated());
    assert_eq!(reader.buffered(), 4);
    assert_eq!(reader.fill_mode(), FillMode::Eager);
}

#[test]
fn test_background_mode_returns_immediately() {
    let source = ScriptedSource::new(b"slow", 1).slow(Duration::from_millis(200));

    let start = Instant::now();
    let mut reader = BufferedReader::new(source, ReaderConfig::default()).unwrap();
    assert!(start.elapsed() < Duration::from_millis(200));
    assert!(!reader.is_terminated());

    // The first read has to wait for the worker.
    let mut buf = [0u8; 4];
    let n = reader.read(&mut buf).unwrap();
    assert!(n >= 1);
    assert_eq!(buf[0], b's');
}

// ============================================================================
// Shared Consumers
// ============================================================================

#[test]
fn test_concurrent_consumers_see_every_byte_once() {
    let data: Vec<u8> = (0..20_000u32).map(|i| (i % 256) as u8).collect();
    let source = ScriptedSource::new(&data, 100).slow(Duration::from_micros(50));
    let reader = Arc::new(BufferedReader::new(source, ReaderConfig::default()).unwrap());

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let reader = Arc::clone(&reader);
            thread::spawn(move || {
                let mut total = 0usize;
                let mut buf = [0u8; 37];
                loop {
                    match (&*reader).read(&mut buf).unwrap() {
                        0 => break total,
                        n => total += n,
                    }
                }
            })
        })
        .collect();

    let total: usize = consumers.into_iter().map(|c| c.join().unwrap()).sum();
    assert_eq!(total, data.len(), "Every consumer must wake on termination");
}

// ============================================================================
// Close
// ============================================================================

#[test]
fn test_close_terminates_worker_on_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let client = TcpStream::connect(addr).unwrap();
    let (mut server, _) = listener.accept().unwrap();
    io::Write::write_all(&mut server, b"ping").unwrap();

    let control = client.try_clone().unwrap();
    let mut reader = BufferedReader::with_close(client, ReaderConfig::default(), move || {
        control.shutdown(Shutdown::Both)
    })
    .unwrap();

    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"ping");

    reader.close().unwrap();

    // The server side is still open, so only the close can end the stream.
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();
    assert!(rest.is_empty());
    assert!(reader.is_terminated());
    drop(server);
}

#[test]
fn test_read_timeout_sees_late_data() {
    let source = ScriptedSource::new(b"z", 1).slow(Duration::from_millis(30));
    let reader = BufferedReader::new(source, ReaderConfig::default()).unwrap();

    let mut buf = [0u8; 1];
    let err = reader
        .read_timeout(&mut buf, Duration::from_millis(1))
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::TimedOut);

    let n = reader
        .read_timeout(&mut buf, Duration::from_secs(5))
        .unwrap();
    assert_eq!(n, 1);
    assert_eq!(buf[0], b'z');
}
