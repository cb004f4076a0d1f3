use std::{cmp::min, io};

/// AsBuffer is the trait used by Buffer to operate on an arbitrary backing
/// allocation. Proxies tend to pool their buffers; as long as the pooled type
/// exposes a contiguous slice of bytes it can be handed to Buffer without
/// copying. Buffer owns the underlying value for its lifetime and it can be
/// retrieved right before dropping Buffer.
pub trait AsBuffer {
    fn as_buffer(&self) -> &[u8];
    fn as_mut_buffer(&mut self) -> &mut [u8];
}

/// Buffer carries one chunk of a response body through its filter lifecycle
/// ```txt
/// buffer        start   half     head  end   len
/// v             v       v         v     v     v
/// [             ████████:██████████░░░░░░     ]
/// <-------------------------------------------> buffer()   | capacity()
///               <----------------->             ready()    |
///                                 <----->       raw()      |
///                                        <----> space()    | available_space()
/// ```
/// `start..head` is filtered data, ready to be forwarded downstream.
/// `head..end` is raw data as it arrived from upstream, not filtered yet.
/// The buffer is filled from `end` up to `buffer.len()`.
/// Filtering rewrites `head..end` in place; its output is never longer than
/// its input, so `end` only ever moves left while `head` catches up to it.
/// Forwarding advances `start`. When `start` overshoots half the capacity,
/// half the buffer is unused:
/// ```txt
/// buffer             half  start  head  end   len
/// v                     v  v      v     v     v
/// [                     :  ████████░░░░░░     ]
/// ```
/// At that point the remaining data of the buffer should be shifted.
/// Shifting memmoves the live bytes back to the beginning of the buffer.
/// ```txt
/// buffer
/// start   head  end     half                  len
/// v       v     v       v                     v
/// [████████░░░░░░       :                     ]
/// ```
/// It is also recommended to shift an empty buffer if `start` is not 0.
pub struct Buffer<T: AsBuffer> {
    pub start: usize,
    pub head: usize,
    pub end: usize,
    pub buffer: T,
}

impl<T: AsBuffer> Buffer<T> {
    pub fn new(buffer: T) -> Self {
        Self {
            start: 0,
            head: 0,
            end: 0,
            buffer,
        }
    }

    pub fn meter(&self, half: usize) -> String {
        let size = half * 2 + 1;
        let len = self.capacity();
        (0..size + 2)
            .map(|i| {
                if i == 0 {
                    '['
                } else if i - 1 == half {
                    ':'
                } else if i - 1 < (self.start * size / len) {
                    ' '
                } else if i - 1 < (self.head * size / len) {
                    '█'
                } else if i - 1 < (self.end * size / len) {
                    '░'
                } else if i - 1 < size {
                    ' '
                } else {
                    ']'
                }
            })
            .collect()
    }

    pub fn available_space(&self) -> usize {
        self.capacity() - self.end
    }

    pub fn capacity(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_full(&self) -> bool {
        self.end == self.capacity()
    }

    pub fn fill(&mut self, count: usize) -> usize {
        let count = min(count, self.available_space());
        self.end += count;
        count
    }

    pub fn consume(&mut self, count: usize) -> usize {
        let count = min(count, self.ready().len());
        self.start += count;
        count
    }

    pub fn clear(&mut self) {
        self.start = 0;
        self.head = 0;
        self.end = 0;
    }

    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_buffer()
    }

    pub fn mut_buffer(&mut self) -> &mut [u8] {
        self.buffer.as_mut_buffer()
    }

    /// Filtered bytes, ready to be forwarded downstream.
    pub fn ready(&self) -> &[u8] {
        let range = self.start..self.head;
        &self.buffer()[range]
    }

    /// Bytes as they arrived from upstream, not filtered yet.
    pub fn raw(&self) -> &[u8] {
        let range = self.head..self.end;
        &self.buffer()[range]
    }

    pub fn space(&mut self) -> &mut [u8] {
        let range = self.end..self.capacity();
        &mut self.mut_buffer()[range]
    }

    /// Marks every raw byte ready to forward. Stages rewrite the raw region
    /// in place without moving `head`, so that several of them can run over
    /// the same buffer; the caller commits once they all have.
    pub fn commit(&mut self) {
        self.head = self.end;
    }

    pub fn should_shift(&self) -> bool {
        self.start > self.capacity() / 2 || (self.start > 0 && self.is_empty())
    }

    pub fn shift(&mut self) -> usize {
        let start = self.start;
        let end = self.end;
        if start > 0 {
            self.mut_buffer().copy_within(start..end, 0);
            self.start = 0;
            self.head -= start;
            self.end = end - start;
        }
        start
    }
}

impl<T: AsBuffer> io::Write for Buffer<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.space().write(buf) {
            Ok(size) => {
                self.fill(size);
                Ok(size)
            }
            err => err,
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: AsBuffer> io::Read for Buffer<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = min(self.ready().len(), buf.len());
        buf[..len].copy_from_slice(&self.buffer()[self.start..self.start + len]);
        self.start += len;
        Ok(len)
    }
}
