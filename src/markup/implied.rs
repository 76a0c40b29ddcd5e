//! Implied end tags
//!
//! HTML lets some elements omit their end tag: a `<li>` ends at the next
//! `<li>`, a `<p>` at the next block, a `<td>` at the next cell or row. This
//! pass tracks open elements over the token stream and inserts the end tags
//! the markup leaves out, so the grammar only ever sees balanced elements.

use crate::markup::lexer::{Span, Token, VOID_ELEMENTS};

/// Start tags that close an open `<p>`
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hgroup", "hr", "li", "main", "menu", "nav", "ol", "p", "pre", "section",
    "table", "ul",
];

/// Start tags that end the open element `open`
fn closed_by(open: &str) -> Option<&'static [&'static str]> {
    let closers: &[&str] = match open {
        "p" => CLOSES_P,
        "li" => &["li"],
        "dt" | "dd" => &["dt", "dd"],
        "option" => &["option", "optgroup"],
        "optgroup" => &["optgroup"],
        "tr" => &["tr", "tbody", "tfoot", "thead"],
        "td" | "th" => &["td", "th", "tr", "tbody", "tfoot", "thead"],
        "thead" | "tbody" => &["tbody", "tfoot"],
        "colgroup" => &["colgroup", "thead", "tbody", "tfoot", "tr"],
        "rt" | "rp" => &["rt", "rp"],
        _ => return None,
    };
    Some(closers)
}

/// Elements whose end tag may be left out
fn has_optional_end(tag: &str) -> bool {
    closed_by(tag).is_some() || tag == "tfoot"
}

/// Insert end tags left out by the markup
///
/// Inserted end tags have an empty span at the point the element ends.
/// Mismatches that no omission rule explains are passed through untouched
/// for the grammar to report.
pub fn close_implied(tokens: Vec<(Token, Span)>) -> Vec<(Token, Span)> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut open: Vec<String> = Vec::new();
    // Start tag whose attributes are still being read
    let mut starting: Option<String> = None;

    for (token, span) in tokens {
        match &token {
            Token::OpenTag(name) => {
                while let Some(top) = open.last() {
                    match closed_by(top) {
                        Some(closers) if closers.contains(&name.as_str()) => {
                            close(&mut open, &mut out, span.start);
                        }
                        _ => break,
                    }
                }
                starting = Some(name.clone());
            }
            Token::TagEnd => {
                if let Some(name) = starting.take() {
                    if !VOID_ELEMENTS.contains(&name.as_str()) {
                        open.push(name);
                    }
                }
            }
            Token::SelfClose => starting = None,
            Token::CloseTag(name) if name == "p" && !open.iter().any(|tag| tag == "p") => {
                // A stray `</p>` stands for an empty paragraph
                let at = span.start..span.start;
                out.push((Token::OpenTag(name.clone()), at.clone()));
                out.push((Token::TagEnd, at));
            }
            Token::CloseTag(name) => {
                if let Some(depth) = open.iter().rposition(|tag| tag == name) {
                    if open[depth + 1..].iter().all(|tag| has_optional_end(tag)) {
                        while open.len() > depth + 1 {
                            close(&mut open, &mut out, span.start);
                        }
                        open.pop();
                    }
                }
            }
            _ => {}
        }
        out.push((token, span));
    }

    let end = out.last().map_or(0, |(_, span): &(Token, Span)| span.end);
    while open.last().is_some_and(|tag| has_optional_end(tag)) {
        close(&mut open, &mut out, end);
    }

    out
}

fn close(open: &mut Vec<String>, out: &mut Vec<(Token, Span)>, at: usize) {
    if let Some(tag) = open.pop() {
        out.push((Token::CloseTag(tag), at..at));
    }
}
