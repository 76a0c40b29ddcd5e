//! Markup grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::SyntaxError;
use crate::markup::implied::close_implied;
use crate::markup::lexer::{self, Token, VOID_ELEMENTS};
use crate::markup::raw::*;

/// Parse a markup fragment into a raw tree
pub fn parse(input: &str) -> Result<Fragment, Vec<SyntaxError>> {
    let len = input.len();

    let token_iter = close_implied(lexer::lex(input))
        .into_iter()
        .map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream =
        Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    let children = fragment_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(SyntaxError::from).collect::<Vec<_>>())?;

    Ok(Fragment {
        children,
        source_map: SourceMap::new(input),
    })
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn fragment_parser<'a, I>() -> impl Parser<'a, I, Vec<RawNode>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let attribute = select! {
        Token::AttrName(name) => name,
    }
    .then(select! { Token::AttrValue(value) => value }.or_not())
    .map_with(|(name, value), e| RawAttribute {
        name,
        value: value.unwrap_or_default(),
        span: span_range(&e.span()),
    });

    let start_tag = select! {
        Token::OpenTag(name) => name,
    }
    .labelled("start tag")
    .then(attribute.repeated().collect::<Vec<_>>());

    let node = recursive(|node| {
        let text = select! {
            Token::Text(value) => value,
        }
        .map_with(|value, e| {
            RawNode::Text(RawText {
                value,
                span: span_range(&e.span()),
            })
        });

        let comment = select! {
            Token::Comment(data) => data,
        }
        .map_with(|data, e| {
            RawNode::Comment(RawComment {
                data,
                span: span_range(&e.span()),
            })
        });

        // `<tag ... />`
        let self_closed = start_tag
            .clone()
            .then_ignore(just(Token::SelfClose))
            .map_with(|(tag_name, attrs), e| {
                RawNode::Element(RawElement {
                    tag_name,
                    attrs,
                    children: Vec::new(),
                    span: span_range(&e.span()),
                })
            });

        // `<br ...>`
        let void = start_tag
            .clone()
            .then_ignore(just(Token::TagEnd))
            .try_map(|(tag_name, attrs), span: SimpleSpan| {
                if VOID_ELEMENTS.contains(&tag_name.as_str()) {
                    Ok(RawNode::Element(RawElement {
                        tag_name,
                        attrs,
                        children: Vec::new(),
                        span: span_range(&span),
                    }))
                } else {
                    Err(Rich::custom(span, "not a void element"))
                }
            });

        // `<tag ...> children </tag>`
        let element = start_tag
            .clone()
            .then_ignore(just(Token::TagEnd))
            .then(node.repeated().collect::<Vec<_>>())
            .then(
                select! {
                    Token::CloseTag(name) => name,
                }
                .labelled("end tag"),
            )
            .try_map(|(((tag_name, attrs), children), close), span: SimpleSpan| {
                if tag_name == close {
                    Ok(RawNode::Element(RawElement {
                        tag_name,
                        attrs,
                        children,
                        span: span_range(&span),
                    }))
                } else {
                    Err(Rich::custom(
                        span,
                        format!(
                            "mismatched end tag: <{}> is closed by </{}>",
                            tag_name, close
                        ),
                    ))
                }
            });

        // Order matters: a void element must be tried before the general form,
        // which would otherwise look for an end tag that never comes
        choice((text, comment, self_closed, void, element)).boxed()
    });

    node.repeated().collect::<Vec<_>>().then_ignore(end())
}
