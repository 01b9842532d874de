//! Byte-at-a-time I/O collaborators for the engine.
//!
//! Every [`std::io::Write`] is an [`OutputSink`] and every [`std::io::Read`] is
//! an [`InputSource`], so stdout/stdin, files, `Vec<u8>` and `&[u8]` all work
//! directly. [`FnSink`] and [`FnSource`] adapt closures.

use std::io::{self, Read, Write};

/// Destination for bytes produced by `.`.
pub trait OutputSink {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Called once when the program terminates normally.
    fn flush_output(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Origin of bytes consumed by `,`.
///
/// `Ok(None)` signals exhaustion, which is not an error.
pub trait InputSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<W: Write> OutputSink for W {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }

    fn flush_output(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<R: Read> InputSource for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Sends each output byte to a closure.
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8)> OutputSink for FnSink<F> {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (self.0)(byte);
        Ok(())
    }
}

/// Pulls input bytes from a closure; returning `None` means exhausted.
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> Option<u8>> InputSource for FnSource<F> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok((self.0)())
    }
}
