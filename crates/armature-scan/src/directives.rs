//! Directive comment parsing for command handler files.
//!
//! Handlers can carry line comments that decorate the derived command:
//!
//! ```text
//! // @command Insert Big Image
//! // @menu Shapes
//! // @parameter size "Size" "Icon size in pixels" optional freeform
//! // @parameterOnly
//! export default function insertBigImage() { ... }
//! ```
//!
//! `@parameter` takes a key, then up to two quoted strings (display name,
//! description), then the flags `optional` and `freeform` in any order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ScanError;
use crate::types::{CommandAnnotations, ParameterDirective};

static DIRECTIVE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*//\s*@(command|menu|parameter|parameterOnly)\b[ \t]*(.*)$")
        .expect("directive pattern")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("identifier pattern"));

/// Parse every directive comment in `source`. `file` is used for error
/// messages only.
pub fn parse_directives(file: &str, source: &str) -> Result<CommandAnnotations, ScanError> {
    let mut annotations = CommandAnnotations::default();

    for line in source.lines() {
        let Some(captures) = DIRECTIVE_LINE.captures(line) else {
            continue;
        };
        let rest = captures.get(2).map_or("", |m| m.as_str()).trim();
        match &captures[1] {
            "command" => {
                if rest.is_empty() {
                    return Err(directive_error(file, "command", "missing display name"));
                }
                annotations.display_name = Some(rest.to_string());
            }
            "menu" => {
                if rest.is_empty() {
                    return Err(directive_error(file, "menu", "missing group name"));
                }
                annotations.menu = Some(
                    rest.split('/')
                        .map(|part| part.trim().to_string())
                        .filter(|part| !part.is_empty())
                        .collect(),
                );
            }
            "parameter" => {
                annotations.parameters.push(parse_parameter(file, rest)?);
            }
            "parameterOnly" => {
                annotations.parameter_only = true;
            }
            _ => unreachable!("pattern restricts directive names"),
        }
    }

    Ok(annotations)
}

fn parse_parameter(file: &str, rest: &str) -> Result<ParameterDirective, ScanError> {
    let tokens = tokenize(rest)
        .map_err(|reason| directive_error(file, "parameter", &reason))?;
    let mut tokens = tokens.into_iter();

    let key = match tokens.next() {
        Some(Token::Word(word)) if IDENTIFIER.is_match(&word) => word,
        Some(Token::Word(word)) => {
            return Err(directive_error(
                file,
                "parameter",
                &format!("'{word}' is not a valid parameter key"),
            ))
        }
        _ => return Err(directive_error(file, "parameter", "missing parameter key")),
    };

    let mut parameter = ParameterDirective {
        key,
        name: None,
        description: None,
        optional: false,
        allow_freeform: false,
    };

    for token in tokens {
        match token {
            Token::Quoted(text) => {
                if parameter.name.is_none() {
                    parameter.name = Some(text);
                } else if parameter.description.is_none() {
                    parameter.description = Some(text);
                } else {
                    return Err(directive_error(
                        file,
                        "parameter",
                        "more than two quoted strings",
                    ));
                }
            }
            Token::Word(word) => match word.as_str() {
                "optional" => parameter.optional = true,
                "freeform" => parameter.allow_freeform = true,
                other => {
                    return Err(directive_error(
                        file,
                        "parameter",
                        &format!("unknown flag '{other}'"),
                    ))
                }
            },
        }
    }

    Ok(parameter)
}

#[derive(Debug)]
enum Token {
    Word(String),
    Quoted(String),
}

/// Split a directive tail into bare words and double-quoted strings.
fn tokenize(rest: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = rest.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => text.push(ch),
                    None => return Err("unterminated quoted string".to_string()),
                }
            }
            tokens.push(Token::Quoted(text));
        } else {
            let mut word = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                word.push(ch);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }

    Ok(tokens)
}

fn directive_error(file: &str, directive: &'static str, reason: &str) -> ScanError {
    ScanError::Directive {
        file: file.to_string(),
        directive,
        reason: reason.to_string(),
    }
}
