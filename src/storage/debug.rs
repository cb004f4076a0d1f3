use std::fmt::Write;

use crate::storage::{AsBuffer, Buffer};

fn to_utf8(buf: &[u8]) -> &str {
    match std::str::from_utf8(buf) {
        Ok(str) => str,
        Err(_) => "[ERROR::UTF8]",
    }
}

impl<T: AsBuffer> Buffer<T> {
    pub fn debug(&self, pad: &str) -> Result<String, std::fmt::Error> {
        let mut result = String::new();
        result.write_fmt(format_args!("Buffer {{"))?;
        result.write_fmt(format_args!("\n{pad}  start: {}", self.start))?;
        result.write_fmt(format_args!(",\n{pad}  head: {}", self.head))?;
        result.write_fmt(format_args!(",\n{pad}  end: {}", self.end))?;
        result.write_fmt(format_args!(",\n{pad}  view: {}", self.meter(20)))?;
        result.write_fmt(format_args!(
            ",\n{pad}  ready: {:?}",
            to_utf8(self.ready())
        ))?;
        result.write_fmt(format_args!(",\n{pad}  raw: {:?}", to_utf8(self.raw())))?;
        result.write_fmt(format_args!(",\n{pad}}}"))?;
        Ok(result)
    }
}

pub fn debug_buffer<T: AsBuffer>(buffer: &Buffer<T>) {
    match buffer.debug("") {
        Ok(result) => println!("{result}"),
        Err(error) => println!("{error:?}"),
    }
}
