use log::{debug, trace};

use crate::filter::compact::Session;
use crate::pipeline::{BodyFilter, HeaderEdits, MediaType, ResponseHead};
use crate::storage::{AsBuffer, Buffer};

/// Body-filter stage wrapping the whitespace compactor.
///
/// A single value serves consecutive responses on a connection: `begin`
/// decides per response whether the body is worth rewriting and opens a
/// fresh [`Session`], `end` closes it. A declined response costs one branch
/// per buffer and flows through untouched.
pub struct CompactFilter {
    pub enable: bool,
    session: Option<Session>,
}

impl CompactFilter {
    pub fn new(enable: bool) -> Self {
        Self {
            enable,
            session: None,
        }
    }

    /// The checks a server runs before committing to rewrite a body: a
    /// plain-page status, an actual body, a declared HTML content type and
    /// no content encoding already applied. Anything unparseable declines,
    /// a response is never failed over compaction.
    fn eligible(&self, head: &ResponseHead) -> bool {
        if !self.enable || head.header_only {
            return false;
        }
        if !matches!(head.code, 200 | 403 | 404) {
            return false;
        }
        if head
            .content_encoding
            .map_or(false, |value| !value.is_empty())
        {
            return false;
        }
        match head.content_type {
            Some(value) => MediaType::parse(value).map_or(false, |media| media.is_html()),
            None => false,
        }
    }
}

impl<T: AsBuffer> BodyFilter<T> for CompactFilter {
    fn begin(&mut self, head: &ResponseHead, edits: &mut HeaderEdits) -> bool {
        if !self.eligible(head) {
            trace!("response not eligible for compaction (status {})", head.code);
            return false;
        }
        // output length is not known in advance
        edits.drop_content_length = true;
        edits.drop_accept_ranges = true;
        self.session = Some(Session::new());
        true
    }

    fn process(&mut self, buffer: &mut Buffer<T>) {
        if let Some(session) = &mut self.session {
            session.process(buffer);
        }
    }

    fn end(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("compaction removed {} bytes", session.removed());
        }
    }
}
