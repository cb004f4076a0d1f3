use nom::{
    bytes::complete::{tag, take_while1},
    character::is_alphanumeric,
    IResult,
};

fn is_token_char(i: u8) -> bool {
    is_alphanumeric(i) || b"!#$%&'*+-.^_`|~".contains(&i)
}

fn token(i: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_token_char)(i)
}

/// Type and subtype of a Content-Type value, parameters left aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaType<'a> {
    pub kind: &'a [u8],
    pub subtype: &'a [u8],
}

/// parse the type and subtype of a Content-Type value, leaving any
/// parameters behind
///
/// example: `text/html; charset=utf-8`
pub fn parse_media_type(i: &[u8]) -> IResult<&[u8], MediaType> {
    let (i, kind) = token(i)?;
    let (i, _) = tag("/")(i)?;
    let (i, subtype) = token(i)?;
    Ok((i, MediaType { kind, subtype }))
}

impl<'a> MediaType<'a> {
    pub fn parse(value: &'a [u8]) -> Option<MediaType<'a>> {
        match parse_media_type(value) {
            Ok((_, media)) => Some(media),
            Err(_) => None,
        }
    }

    pub fn is_html(&self) -> bool {
        self.kind.eq_ignore_ascii_case(b"text") && self.subtype.eq_ignore_ascii_case(b"html")
    }
}
