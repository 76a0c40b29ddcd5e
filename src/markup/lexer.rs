//! Lexer for template markup using logos
//!
//! Markup is context sensitive: outside a tag everything up to the next `<`
//! is text, while inside a start tag whitespace separates attribute names and
//! values. The lexer therefore runs in two modes and morphs between them
//! whenever a start tag opens or closes.

use logos::{Lexer, Logos};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Elements that never have content or an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is taken verbatim up to the matching end tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Raw text elements whose content still has character references decoded
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

/// Token stream consumed by the markup grammar
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Text(String),
    Comment(String),
    /// `<name`, lower-cased
    OpenTag(String),
    AttrName(String),
    AttrValue(String),
    /// `>` closing a start tag
    TagEnd,
    /// `/>` closing a start tag
    SelfClose,
    /// `</name>`, lower-cased
    CloseTag(String),
    /// Input the lexer could not make sense of
    Invalid(String),
}

/// Tokens recognised between tags
#[derive(Logos, Debug, Clone, PartialEq)]
enum ContentToken {
    #[token("<!--", lex_comment)]
    Comment(String),

    // Doctype and other declarations never reach a fragment
    #[regex(r"<![a-zA-Z][^>]*>", logos::skip)]
    Declaration,

    #[regex(r"</[a-zA-Z][^ \t\n\r\f/>]*[ \t\n\r\f]*>", |lex| {
        let s = lex.slice();
        s[2..s.len() - 1].trim_end().to_ascii_lowercase()
    })]
    CloseTag(String),

    #[regex(r"<[a-zA-Z][^ \t\n\r\f/>]*", |lex| lex.slice()[1..].to_ascii_lowercase())]
    OpenTag(String),

    #[regex(r"[^<]+", |lex| lex.slice().to_string())]
    Text(String),

    // A `<` that starts nothing is ordinary text
    #[token("<")]
    Lt,
}

/// Tokens recognised inside a start tag
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum TagToken {
    #[token(">")]
    End,

    #[token("/>")]
    SelfClose,

    #[token("/")]
    Slash,

    #[regex(r#"[^ \t\n\r\f"'>/=]+"#, |lex| lex.slice().to_ascii_lowercase())]
    Name(String),

    #[regex(r#"=[ \t\n\r\f]*"[^"]*""#, quoted_value)]
    #[regex(r#"=[ \t\n\r\f]*'[^']*'"#, quoted_value)]
    #[regex(r#"=[ \t\n\r\f]*[^ \t\n\r\f"'=<>`]+"#, |lex| lex.slice()[1..].trim_start().to_string())]
    Value(String),
}

fn lex_comment(lex: &mut Lexer<ContentToken>) -> Option<String> {
    let rest = lex.remainder();
    let end = rest.find("-->")?;
    let data = rest[..end].to_string();
    lex.bump(end + 3);
    Some(data)
}

fn quoted_value(lex: &mut Lexer<TagToken>) -> String {
    let s = lex.slice()[1..].trim_start();
    s[1..s.len() - 1].to_string()
}

/// Lex markup into tokens with spans
///
/// Lexing never fails; unrecognised input becomes [`Token::Invalid`] and is
/// reported by the grammar.
pub fn lex(input: &str) -> Vec<(Token, Span)> {
    let mut tokens = Vec::new();
    let mut content = ContentToken::lexer(input);

    while let Some(result) = content.next() {
        let span = content.span();
        match result {
            Ok(ContentToken::Text(text)) => push_text(&mut tokens, decode_entities(&text), span),
            Ok(ContentToken::Lt) => push_text(&mut tokens, "<".to_string(), span),
            Ok(ContentToken::Comment(data)) => tokens.push((Token::Comment(data), span)),
            Ok(ContentToken::CloseTag(name)) => tokens.push((Token::CloseTag(name), span)),
            Ok(ContentToken::Declaration) => {}
            Ok(ContentToken::OpenTag(name)) => {
                tokens.push((Token::OpenTag(name.clone()), span));
                let (rest, has_content) = lex_start_tag(content.morph(), &mut tokens);
                content = rest;
                if has_content && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    lex_raw_text(&mut content, &name, &mut tokens);
                }
            }
            Err(()) => tokens.push((Token::Invalid(content.slice().to_string()), span)),
        }
    }

    tokens
}

/// Lex the attribute part of a start tag, handing back a content lexer
///
/// The flag is true when the tag ended with `>` (as opposed to `/>` or end of
/// input), i.e. when element content follows.
fn lex_start_tag<'s>(
    mut tag: Lexer<'s, TagToken>,
    tokens: &mut Vec<(Token, Span)>,
) -> (Lexer<'s, ContentToken>, bool) {
    let mut has_content = false;
    while let Some(result) = tag.next() {
        let span = tag.span();
        match result {
            Ok(TagToken::End) => {
                tokens.push((Token::TagEnd, span));
                has_content = true;
                break;
            }
            Ok(TagToken::SelfClose) => {
                tokens.push((Token::SelfClose, span));
                break;
            }
            Ok(TagToken::Slash) => {}
            Ok(TagToken::Name(name)) => tokens.push((Token::AttrName(name), span)),
            Ok(TagToken::Value(value)) => {
                tokens.push((Token::AttrValue(decode_entities(&value)), span))
            }
            Err(()) => tokens.push((Token::Invalid(tag.slice().to_string()), span)),
        }
    }
    (tag.morph(), has_content)
}

fn lex_raw_text(
    content: &mut Lexer<'_, ContentToken>,
    tag_name: &str,
    tokens: &mut Vec<(Token, Span)>,
) {
    let rest = content.remainder();
    let end = find_end_tag(rest, tag_name).unwrap_or(rest.len());
    if end == 0 {
        return;
    }

    let start = content.source().len() - rest.len();
    let text = &rest[..end];
    let value = if ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag_name) {
        decode_entities(text)
    } else {
        text.to_string()
    };
    tokens.push((Token::Text(value), start..start + end));
    content.bump(end);
}

fn find_end_tag(haystack: &str, tag_name: &str) -> Option<usize> {
    // ASCII lower-casing keeps byte offsets intact
    haystack
        .to_ascii_lowercase()
        .find(&format!("</{}", tag_name))
}

/// Append text, merging with a directly preceding text token
fn push_text(tokens: &mut Vec<(Token, Span)>, text: String, span: Span) {
    if let Some((Token::Text(prev), prev_span)) = tokens.last_mut() {
        if prev_span.end == span.start {
            prev.push_str(&text);
            prev_span.end = span.end;
            return;
        }
    }
    tokens.push((Token::Text(text), span));
}

/// Decode character references in text or attribute values
///
/// Covers the whole HTML5 named reference table as well as numeric references.
/// Unknown references are kept literally.
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}
