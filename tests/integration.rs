use std::io::Write;

use shibori::{
    AsBuffer, BodyFilter, Buffer, Chain, CompactFilter, HeaderEdits, MediaType, ResponseHead,
    SliceBuffer,
};

fn html_head() -> ResponseHead<'static> {
    ResponseHead {
        code: 200,
        header_only: false,
        content_type: Some(b"text/html; charset=utf-8"),
        content_encoding: None,
    }
}

fn run_through(head: &ResponseHead, input: &[u8]) -> (Vec<u8>, HeaderEdits) {
    let mut storage = vec![0; 1024];
    let mut buffer = Buffer::new(SliceBuffer(&mut storage[..]));
    let mut chain: Chain<SliceBuffer> = Chain::new();
    chain.push(Box::new(CompactFilter::new(true)));

    let edits = chain.begin(head);
    buffer.write(input).expect("write");
    chain.process(&mut buffer);
    chain.end();
    (buffer.ready().to_vec(), edits)
}

#[test]
fn accepts_html_page() {
    let (out, edits) = run_through(&html_head(), b"a  b\n<p>   text");
    assert_eq!(out, b"a b<p>text");
    assert!(edits.drop_content_length);
    assert!(edits.drop_accept_ranges);
}

#[test]
fn accepts_not_found_and_forbidden_pages() {
    for code in [403, 404] {
        let head = ResponseHead {
            code,
            ..html_head()
        };
        let (out, _) = run_through(&head, b"gone  away");
        assert_eq!(out, b"gone away");
    }
}

#[test]
fn declines_other_statuses() {
    for code in [204, 301, 500, 502] {
        let head = ResponseHead {
            code,
            ..html_head()
        };
        let (out, edits) = run_through(&head, b"a  b");
        assert_eq!(out, b"a  b");
        assert_eq!(edits, HeaderEdits::default());
    }
}

#[test]
fn declines_header_only_responses() {
    let head = ResponseHead {
        header_only: true,
        ..html_head()
    };
    let (out, edits) = run_through(&head, b"");
    assert_eq!(out, b"");
    assert_eq!(edits, HeaderEdits::default());
}

#[test]
fn declines_without_content_type() {
    let head = ResponseHead {
        content_type: None,
        ..html_head()
    };
    let (out, _) = run_through(&head, b"a  b");
    assert_eq!(out, b"a  b");
}

#[test]
fn declines_non_html_content_types() {
    for content_type in [
        &b"application/json"[..],
        b"image/png",
        b"text/plain",
        b"text/htmlish",
        b"not a media type",
    ] {
        let head = ResponseHead {
            content_type: Some(content_type),
            ..html_head()
        };
        let (out, edits) = run_through(&head, b"a  b");
        assert_eq!(out, b"a  b");
        assert_eq!(edits, HeaderEdits::default());
    }
}

#[test]
fn declines_encoded_bodies() {
    let head = ResponseHead {
        content_encoding: Some(b"gzip"),
        ..html_head()
    };
    let (out, _) = run_through(&head, b"a  b");
    assert_eq!(out, b"a  b");
}

#[test]
fn empty_content_encoding_counts_as_absent() {
    let head = ResponseHead {
        content_encoding: Some(b""),
        ..html_head()
    };
    let (out, _) = run_through(&head, b"a  b");
    assert_eq!(out, b"a b");
}

#[test]
fn disabled_filter_passes_everything_through() {
    let mut storage = vec![0; 256];
    let mut buffer = Buffer::new(SliceBuffer(&mut storage[..]));
    let mut chain: Chain<SliceBuffer> = Chain::new();
    chain.push(Box::new(CompactFilter::new(false)));

    let edits = chain.begin(&html_head());
    buffer.write(b"a  b").expect("write");
    chain.process(&mut buffer);
    chain.end();
    assert_eq!(buffer.ready(), &b"a  b"[..]);
    assert_eq!(edits, HeaderEdits::default());
}

#[test]
fn fresh_session_per_response() {
    let mut storage = vec![0; 256];
    let mut buffer = Buffer::new(SliceBuffer(&mut storage[..]));
    let mut chain: Chain<SliceBuffer> = Chain::new();
    chain.push(Box::new(CompactFilter::new(true)));

    let head = html_head();
    chain.begin(&head);
    buffer.write(b"x<!--SC_OFF-->  raw").expect("write");
    chain.process(&mut buffer);
    chain.end();
    assert_eq!(buffer.ready(), &b"x  raw"[..]);

    // the next response on the connection starts compressing again, even
    // though the previous one ended inside a verbatim fence
    buffer.clear();
    chain.begin(&head);
    buffer.write(b"a  b").expect("write");
    chain.process(&mut buffer);
    chain.end();
    assert_eq!(buffer.ready(), &b"a b"[..]);
}

struct Parens;

impl<T: AsBuffer> BodyFilter<T> for Parens {
    fn begin(&mut self, _head: &ResponseHead, _edits: &mut HeaderEdits) -> bool {
        true
    }

    fn process(&mut self, buffer: &mut Buffer<T>) {
        let head = buffer.head;
        let end = buffer.end;
        for byte in &mut buffer.mut_buffer()[head..end] {
            if *byte == b'<' {
                *byte = b'(';
            }
        }
    }
}

#[test]
fn stages_run_in_push_order() {
    let parens_first = {
        let mut storage = vec![0; 256];
        let mut buffer = Buffer::new(SliceBuffer(&mut storage[..]));
        let mut chain: Chain<SliceBuffer> = Chain::new();
        chain.push(Box::new(Parens));
        chain.push(Box::new(CompactFilter::new(true)));
        chain.begin(&html_head());
        buffer.write(b"a  <p>").expect("write");
        chain.process(&mut buffer);
        chain.end();
        buffer.ready().to_vec()
    };
    // '<' was rewritten before the compactor saw it, so the run before it
    // leaves a separator behind
    assert_eq!(parens_first, b"a (p>");

    let compactor_first = {
        let mut storage = vec![0; 256];
        let mut buffer = Buffer::new(SliceBuffer(&mut storage[..]));
        let mut chain: Chain<SliceBuffer> = Chain::new();
        chain.push(Box::new(CompactFilter::new(true)));
        chain.push(Box::new(Parens));
        chain.begin(&html_head());
        buffer.write(b"a  <p>").expect("write");
        chain.process(&mut buffer);
        chain.end();
        buffer.ready().to_vec()
    };
    assert_eq!(compactor_first, b"a(p>");
}

#[test]
fn media_type_parses_and_folds_case() {
    let media = MediaType::parse(b"Text/HTML; charset=utf-8").expect("parse");
    assert!(media.is_html());
    assert_eq!(media.kind, &b"Text"[..]);
    assert_eq!(media.subtype, &b"HTML"[..]);
}

#[test]
fn media_type_rejects_garbage() {
    assert!(MediaType::parse(b"garbage").is_none());
    assert!(MediaType::parse(b"/html").is_none());
    assert!(MediaType::parse(b"text/").is_none());
    assert!(!MediaType::parse(b"text/plain").expect("parse").is_html());
}
