use std::io::{Read, Write};

use shibori::{debug_buffer, Buffer, Chain, CompactFilter, ResponseHead, SliceBuffer};

fn run(head: ResponseHead, fragments: Vec<&[u8]>) {
    let mut storage = vec![0; 512];
    let mut buffer = Buffer::new(SliceBuffer(&mut storage[..]));
    let mut chain: Chain<SliceBuffer> = Chain::new();
    chain.push(Box::new(CompactFilter::new(true)));
    let mut output = Vec::new();

    let edits = chain.begin(&head);
    println!("{edits:?}");

    for fragment in fragments {
        let _ = buffer.write(fragment).expect("WRITE");
        debug_buffer(&buffer);
        chain.process(&mut buffer);
        debug_buffer(&buffer);
        buffer.read_to_end(&mut output).expect("READ");
        if buffer.should_shift() {
            buffer.shift();
        }
    }
    chain.end();

    let result = String::from_utf8_lossy(&output);
    println!("===============================\n{result}\n===============================");
}

fn main() {
    run(
        ResponseHead {
            code: 200,
            header_only: false,
            content_type: Some(b"text/html; charset=utf-8"),
            content_encoding: None,
        },
        vec![
            b"<html>\n  <head>\n    <title>shibori</title>\n  </head>\n",
            b"  <body>\n    <p>one   two\tthree</p>\n",
            b"    <!--SC_OFF--><pre>  kept   as-is  </pre><!--SC_ON-->\n  </body>\n</html>\n",
        ],
    );

    run(
        ResponseHead {
            code: 200,
            header_only: false,
            content_type: Some(b"application/json"),
            content_encoding: None,
        },
        vec![b"{\n  \"spaced\":   \"stays   spaced\"\n}\n"],
    );
}
