//! Reading documentation blocks and descriptions into [`DocComment`]s.
//!
//! A documentation block looks like
//!
//! ```text
//! /**
//!  * Free text, possibly
//!  * spanning lines.
//!  * @param name what it is
//!  * @assoc 1 - * Target
//!  */
//! ```
//!
//! Every line after the opening `/**` must start with optional whitespace
//! followed by `*`. Lines before the first tag form the free text; a line
//! starting with `@` opens a tag and following plain lines extend its
//! value.

use log::{trace, warn};
use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{opt, preceded, terminated},
    error::ModalResult,
    token::{rest, take_till, take_while},
};

use classmap_core::{
    doc::{DocComment, DocTag},
    error::{Diagnostic, ErrorCode},
};

use crate::error::{DiagnosticCollector, DocError};

type Input<'a> = &'a str;

/// How malformed documentation blocks are handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DocPolicy {
    /// Malformed blocks are logged and treated as absent.
    #[default]
    Lenient,
    /// Malformed blocks are reported as a [`DocError`].
    Strict,
}

/// Number of positional parameters a tag takes before its value.
fn tag_arity(name: &str) -> usize {
    match name {
        "param" | "throws" | "exception" => 1,
        _ => 0,
    }
}

/// Parse `@name`, returning the name without the `@`.
fn tag_name<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    preceded(
        '@',
        take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '-'),
    )
    .parse_next(input)
}

/// Parse one whitespace-terminated positional parameter.
fn tag_param<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    terminated(take_till(1.., |c: char| c.is_whitespace()), space0).parse_next(input)
}

/// Parse a complete tag line such as `@param name the description`.
fn tag_line(input: &mut Input<'_>) -> ModalResult<DocTag> {
    let name = tag_name.parse_next(input)?;
    space0.parse_next(input)?;

    let mut params = Vec::new();
    for _ in 0..tag_arity(name) {
        if let Some(param) = opt(tag_param).parse_next(input)? {
            params.push(param.to_string());
        }
    }

    let value = rest.parse_next(input)?;
    Ok(DocTag::new(name, params, value.trim()))
}

/// Parse the `*` prefix of a block continuation line, returning the content.
fn continuation_line<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    preceded((space0, '*', opt(' ')), rest).parse_next(input)
}

/// Build a comment from content lines that no longer carry comment markup.
fn read_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> DocComment {
    let mut text_lines: Vec<&str> = Vec::new();
    let mut tags: Vec<DocTag> = Vec::new();

    for line in lines {
        let line = line.trim();
        let mut input = line;
        if line.starts_with('@') {
            if let Ok(tag) = tag_line.parse_next(&mut input) {
                tags.push(tag);
                continue;
            }
        }
        match tags.last_mut() {
            Some(tag) => tag.extend_value(line),
            None => text_lines.push(line),
        }
    }

    let text = text_lines.join("\n");
    DocComment::new(text.trim(), tags)
}

/// Read a plain description, such as a GraphQL `"""` string body.
///
/// Descriptions carry no comment markup, so reading cannot fail.
///
/// # Examples
///
/// ```
/// use classmap_doc::parse_description;
///
/// let doc = parse_description("A customer order.\n@assoc 1 - * LineItem");
/// assert_eq!(doc.text(), "A customer order.");
/// assert_eq!(doc.tag("assoc").map(|tag| tag.value()), Some("1 - * LineItem"));
/// ```
pub fn parse_description(text: &str) -> DocComment {
    read_lines(text.lines())
}

/// Read a `/** ... */` documentation block.
///
/// Returns `Ok(None)` for comments that are not documentation blocks,
/// e.g. `/* ... */` or `// ...`.
///
/// # Errors
///
/// With [`DocPolicy::Strict`], a block that is not terminated (`E301`) or
/// has a line not starting with `*` (`E300`) is reported as a
/// [`DocError`] listing every problem. With [`DocPolicy::Lenient`] the
/// same block is logged and `Ok(None)` is returned.
///
/// # Examples
///
/// ```
/// use classmap_doc::{DocPolicy, parse_doc_block};
///
/// let raw = "/**\n * An order.\n * @noassoc\n */";
/// let doc = parse_doc_block(raw, DocPolicy::Strict).unwrap().unwrap();
/// assert_eq!(doc.text(), "An order.");
/// assert!(doc.has_tag("noassoc"));
///
/// let broken = "/**\n An order.\n */";
/// assert!(parse_doc_block(broken, DocPolicy::Strict).is_err());
/// assert_eq!(parse_doc_block(broken, DocPolicy::Lenient).unwrap(), None);
/// ```
pub fn parse_doc_block(raw: &str, policy: DocPolicy) -> Result<Option<DocComment>, DocError> {
    let raw = raw.trim();
    let Some(body) = raw.strip_prefix("/**") else {
        return Ok(None);
    };
    // `/**/` is an empty ordinary comment.
    if body.starts_with('/') {
        return Ok(None);
    }

    let Some(inner) = body.strip_suffix("*/") else {
        let unterminated = Diagnostic::error("documentation block is not terminated")
            .with_code(ErrorCode::E301)
            .with_help("close the block with `*/`");
        return reject(unterminated.into(), policy);
    };

    let mut collector = DiagnosticCollector::new();
    let mut content: Vec<&str> = Vec::new();
    for (index, line) in inner.lines().enumerate() {
        if index == 0 {
            content.push(line);
            continue;
        }
        if line.trim().is_empty() {
            content.push("");
            continue;
        }
        let mut input = line;
        match continuation_line.parse_next(&mut input) {
            Ok(stripped) => content.push(stripped),
            Err(_) => collector.emit(
                Diagnostic::error(format!(
                    "documentation line {} does not start with `*`",
                    index + 1
                ))
                .with_code(ErrorCode::E300)
                .with_help("prefix every line of a `/** */` block with `*`"),
            ),
        }
    }

    if let Err(err) = collector.finish() {
        return reject(err, policy);
    }

    let doc = read_lines(content);
    trace!(tags = doc.tags().len(); "Read documentation block");
    Ok(Some(doc))
}

/// Apply `policy` to a malformed block.
fn reject(err: DocError, policy: DocPolicy) -> Result<Option<DocComment>, DocError> {
    match policy {
        DocPolicy::Strict => Err(err),
        DocPolicy::Lenient => {
            for diagnostic in err.diagnostics() {
                warn!(diagnostic:%; "Ignoring malformed documentation block");
            }
            Ok(None)
        }
    }
}
