use crate::filter::marker::{marker_at, SC_OFF, SC_ON};
use crate::storage::{AsBuffer, Buffer};

/// Compaction mode of a response stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Whitespace runs collapse, newlines and tabs disappear.
    #[default]
    Compress,
    /// Bytes pass through untouched until the resume marker shows up.
    Verbatim,
}

/// Per-response state, carried across every buffer of one response.
///
/// One Session belongs to exactly one response and must see that response's
/// buffers in arrival order; the mode is sequential state with no merge
/// operation. Buffers of different responses are independent, give each
/// response its own Session.
#[derive(Debug, Default)]
pub struct Session {
    mode: Mode,
    removed: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bytes removed so far, over all buffers of the response.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Compacts the raw region of `buffer` in place, pulling `end` back by
    /// the amount removed. The result stays in the raw region; call
    /// [`Buffer::commit`] once every stage has run to make it forwardable.
    pub fn process<T: AsBuffer>(&mut self, buffer: &mut Buffer<T>) {
        let head = buffer.head;
        let end = buffer.end;
        let len = compact(self, &mut buffer.mut_buffer()[head..end]);
        buffer.end = head + len;
    }
}

fn is_blank(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | b'\t' | b' ')
}

/// A collapsible run starts on a newline, carriage return or tab, or on a
/// space whose successor in the buffer is blank too. A lone space never
/// starts a run, so adjacent inline elements keep their separator.
fn run_starts_at(bytes: &[u8], at: usize) -> bool {
    match bytes[at] {
        b'\n' | b'\r' | b'\t' => true,
        b' ' => at + 1 < bytes.len() && is_blank(bytes[at + 1]),
        _ => false,
    }
}

/// Compacts `bytes` in place and returns the new logical length.
///
/// One left-to-right pass over the buffer with a read and a write index.
/// The write index never overtakes the read index, so no byte is read after
/// being overwritten and nothing outside `bytes` is ever touched. The mode
/// carried by `session` survives the call: a verbatim fence opened in one
/// buffer keeps protecting the following buffers until its closing marker
/// arrives, as long as each marker sits whole inside one buffer.
pub fn compact(session: &mut Session, bytes: &mut [u8]) -> usize {
    let end = bytes.len();
    let mut read = 0;
    let mut write = 0;
    while read < end {
        match session.mode {
            Mode::Verbatim => {
                // both markers start with '<', anything else can't toggle
                if bytes[read] == b'<' && marker_at(bytes, read, SC_ON) {
                    session.mode = Mode::Compress;
                    read += SC_ON.len();
                    continue;
                }
                bytes[write] = bytes[read];
                write += 1;
                read += 1;
            }
            Mode::Compress => {
                if bytes[read] == b'<' && marker_at(bytes, read, SC_OFF) {
                    session.mode = Mode::Verbatim;
                    read += SC_OFF.len();
                    continue;
                }
                if run_starts_at(bytes, read) {
                    while read < end && is_blank(bytes[read]) {
                        read += 1;
                    }
                    if read >= end {
                        // the run may continue in the next buffer; matching
                        // restarts there with no memory of this one
                        break;
                    }
                    if bytes[read] != b'<' {
                        bytes[write] = b' ';
                        write += 1;
                    }
                    continue;
                }
                let byte = bytes[read];
                bytes[write] = byte;
                write += 1;
                read += 1;
                // whitespace right after a tag close is layout noise,
                // deleted without a replacement
                if byte == b'>' && read < end && run_starts_at(bytes, read) {
                    while read < end && is_blank(bytes[read]) {
                        read += 1;
                    }
                }
            }
        }
    }
    session.removed += end - write;
    write
}
