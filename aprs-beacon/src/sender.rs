//! Frame sender that writes TNC2 lines, one frame per line.
//!
//! Pipe stdout into whatever holds the APRS-IS connection.

use std::io::Write;

use tracing::{trace, warn};

use aprs_core::{Frame, Sender};

pub struct Tnc2Writer<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> Tnc2Writer<W> {
    pub fn new(out: W) -> Self {
        Tnc2Writer { out, written: 0 }
    }

    /// Frames successfully written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl<W: Write> Sender for Tnc2Writer<W> {
    fn send(&mut self, frame: Frame) {
        let line = frame.to_tnc2();
        let result = writeln!(self.out, "{line}").and_then(|_| self.out.flush());
        match result {
            Ok(()) => {
                self.written += 1;
                trace!(%line, "frame written");
            }
            Err(e) => warn!(error = %e, %line, "failed to write frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aprs_core::make_frame;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_tnc2_lines() {
        let mut buf: Vec<u8> = Vec::new();
        let mut writer = Tnc2Writer::new(&mut buf);
        writer.send(make_frame("N0CALL", ">one".into()));
        writer.send(make_frame("N0CALL", ">two".into()));
        assert_eq!(writer.written(), 2);
        drop(writer);

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "N0CALL>APRS,TCPIP*:>one\nN0CALL>APRS,TCPIP*:>two\n");
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut writer = Tnc2Writer::new(BrokenPipe);
        writer.send(make_frame("N0CALL", ">lost".into()));
        assert_eq!(writer.written(), 0);
    }
}
