//! # Stream Capture (`common::process::capture`)
//!
//! File: cli/src/common/process/capture.rs
//!
//! ## Overview
//!
//! Drains one output stream of a child process. Every chunk read is written
//! onward to an echo sink (the console, or `tokio::io::sink()` when the stream
//! should only be buffered) and appended to an accumulation buffer owned by the
//! caller. Each stream has its own buffer and its own draining task, so no
//! locking is needed.
//!
//! A chunk is always written (and flushed) before the next read is issued,
//! which keeps echoed bytes in the order they were produced.
//!
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Read size used when draining a pipe.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Drains `reader` to end-of-stream, echoing into `writer` and appending into `captured`.
///
/// End-of-stream is the normal way out and returns the number of bytes drained.
/// Any other read error, or any write/flush error on the sink, stops the drain
/// and is returned; bytes read before the failure stay in `captured`.
///
/// `chunk_size` of 0 is treated as 1.
pub async fn capture<R, W>(
    mut reader: R,
    writer: &mut W,
    captured: &mut Vec<u8>,
    chunk_size: usize,
) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut total = 0;
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(total);
        }
        let data = &chunk[..n];
        captured.extend_from_slice(data);
        total += n;
        writer.write_all(data).await?;
        writer.flush().await?;
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Records every write call separately so chunking can be observed.
    #[derive(Default)]
    struct RecordingWriter {
        writes: Vec<Vec<u8>>,
    }

    impl AsyncWrite for RecordingWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.writes.push(buf.to_vec());
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    struct BrokenWriter;

    impl AsyncWrite for BrokenWriter {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    /// Yields one chunk of data, then fails.
    struct FailingReader {
        sent: bool,
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.sent {
                Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "pipe exploded")))
            } else {
                self.sent = true;
                buf.put_slice(b"partial");
                Poll::Ready(Ok(()))
            }
        }
    }

    #[tokio::test]
    async fn test_capture_echoes_and_accumulates() {
        let input: &[u8] = b"hello\nworld\n";
        let mut echoed = Vec::new();
        let mut captured = Vec::new();

        let total = capture(input, &mut echoed, &mut captured, DEFAULT_CHUNK_SIZE)
            .await
            .unwrap();

        assert_eq!(total, input.len());
        assert_eq!(echoed, input);
        assert_eq!(captured, input);
    }

    #[tokio::test]
    async fn test_capture_writes_in_chunks_and_in_order() {
        let input: &[u8] = b"abcdefghij";
        let mut writer = RecordingWriter::default();
        let mut captured = Vec::new();

        capture(input, &mut writer, &mut captured, 4).await.unwrap();

        assert!(writer.writes.iter().all(|w| w.len() <= 4));
        assert_eq!(writer.writes.concat(), input);
        assert_eq!(captured, input);
    }

    #[tokio::test]
    async fn test_capture_empty_stream_is_not_an_error() {
        let input: &[u8] = b"";
        let mut echoed = Vec::new();
        let mut captured = Vec::new();

        let total = capture(input, &mut echoed, &mut captured, 0).await.unwrap();

        assert_eq!(total, 0);
        assert!(captured.is_empty());
    }

    #[tokio::test]
    async fn test_capture_reports_read_error_and_keeps_partial_data() {
        let mut echoed = Vec::new();
        let mut captured = Vec::new();

        let err = capture(
            FailingReader { sent: false },
            &mut echoed,
            &mut captured,
            DEFAULT_CHUNK_SIZE,
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(captured, b"partial");
        assert_eq!(echoed, b"partial");
    }

    #[tokio::test]
    async fn test_capture_reports_write_error() {
        let input: &[u8] = b"data";
        let mut captured = Vec::new();

        let err = capture(input, &mut BrokenWriter, &mut captured, DEFAULT_CHUNK_SIZE)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
