//! Tokens read directly off a [`SourceCursor`].

use std::fmt;

use charj_core::{Location, ParseFailure, SourceCursor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    /// One of `{ } ( ) [ ] ; , .`
    Punct(char),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "'{}'", name),
            TokenKind::Punct(c) => write!(f, "'{}'", c),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

const PUNCT: &[char] = &['{', '}', '(', ')', '[', ']', ';', ',', '.'];

/// Read the next token, skipping whitespace and comments.
pub fn next_token(cursor: &mut SourceCursor<'_>) -> Result<Token, ParseFailure> {
    skip_trivia(cursor)?;
    let location = cursor.location();

    let kind = match cursor.peek() {
        None => TokenKind::Eof,
        Some(c) if is_ident_start(c) => {
            let start = cursor.offset();
            cursor.bump_while(is_ident_continue);
            TokenKind::Ident(cursor.slice(start, cursor.offset()).to_string())
        }
        Some(c) if PUNCT.contains(&c) => {
            cursor.bump();
            TokenKind::Punct(c)
        }
        Some(c) => {
            return Err(ParseFailure::new(format!("unexpected character '{}'", c)).at(location));
        }
    };

    Ok(Token { kind, location })
}

/// Consume a brace-delimited body whose opening `{` was just read, and
/// return the text between the braces.
///
/// Nested braces are balanced; braces inside comments and string or
/// character literals are ignored.
pub fn raw_block<'a>(
    cursor: &mut SourceCursor<'a>,
    open: Location,
) -> Result<&'a str, ParseFailure> {
    let start = cursor.offset();
    let mut depth = 1usize;

    loop {
        let end = cursor.offset();
        match cursor.peek() {
            None => return Err(ParseFailure::new("unterminated block").at(open)),
            Some('/') if matches!(cursor.peek_nth(1), Some('/' | '*')) => skip_comment(cursor)?,
            Some(quote @ ('"' | '\'')) => skip_literal(cursor, quote)?,
            Some(c) => {
                cursor.bump();
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(cursor.slice(start, end));
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

fn skip_trivia(cursor: &mut SourceCursor<'_>) -> Result<(), ParseFailure> {
    loop {
        cursor.bump_while(char::is_whitespace);
        if cursor.peek() == Some('/') && matches!(cursor.peek_nth(1), Some('/' | '*')) {
            skip_comment(cursor)?;
        } else {
            return Ok(());
        }
    }
}

/// Skip a `//` or `/* */` comment starting at the cursor.
fn skip_comment(cursor: &mut SourceCursor<'_>) -> Result<(), ParseFailure> {
    let location = cursor.location();
    cursor.bump();
    match cursor.bump() {
        Some('/') => {
            cursor.bump_while(|c| c != '\n');
            Ok(())
        }
        _ => loop {
            match cursor.bump() {
                None => return Err(ParseFailure::new("unterminated comment").at(location)),
                Some('*') if cursor.peek() == Some('/') => {
                    cursor.bump();
                    return Ok(());
                }
                Some(_) => {}
            }
        },
    }
}

fn skip_literal(cursor: &mut SourceCursor<'_>, quote: char) -> Result<(), ParseFailure> {
    let location = cursor.location();
    cursor.bump();
    loop {
        match cursor.bump() {
            None | Some('\n') => {
                return Err(ParseFailure::new("unterminated literal").at(location));
            }
            Some('\\') => {
                cursor.bump();
            }
            Some(c) if c == quote => return Ok(()),
            Some(_) => {}
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
