use charj_core::{Location, ParseFailure, SourceCursor, SourceParser};

use crate::{
    ast::{ClassDecl, CompilationUnit, Field, Member, Method, Param},
    lexer::{Token, TokenKind, next_token, raw_block},
};

/// Recursive-descent parser for the declaration subset of Charj.
///
/// ```text
/// unit    := ("package" name ";")? class*
/// class   := "class" ident ("extends" name)? "{" member* "}"
/// member  := type ident ";"
///          | type ident "(" params ")" body
///          | ident "(" params ")" body         constructor
/// type    := name ("[" "]")*
/// name    := ident ("." ident)*
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl SourceParser for Parser {
    type Tree = CompilationUnit;

    fn parse(&self, cursor: &mut SourceCursor<'_>) -> Result<CompilationUnit, ParseFailure> {
        let mut state = ParseState::new(cursor)?;
        state.unit()
    }
}

struct ParseState<'c, 'a> {
    cursor: &'c mut SourceCursor<'a>,
    /// Lookahead; the cursor sits just past it.
    token: Token,
}

impl<'c, 'a> ParseState<'c, 'a> {
    fn new(cursor: &'c mut SourceCursor<'a>) -> Result<Self, ParseFailure> {
        let token = next_token(cursor)?;
        Ok(Self { cursor, token })
    }

    fn advance(&mut self) -> Result<Token, ParseFailure> {
        let next = next_token(self.cursor)?;
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn unexpected(&self, expected: &str) -> ParseFailure {
        ParseFailure::new(format!("expected {}, found {}", expected, self.token.kind))
            .at(self.token.location)
    }

    fn is_punct(&self, c: char) -> bool {
        self.token.kind == TokenKind::Punct(c)
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.token.kind, TokenKind::Ident(name) if name == keyword)
    }

    fn expect_punct(&mut self, c: char) -> Result<Location, ParseFailure> {
        if self.is_punct(c) {
            Ok(self.advance()?.location)
        } else {
            Err(self.unexpected(&format!("'{}'", c)))
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, ParseFailure> {
        let TokenKind::Ident(name) = self.token.kind.clone() else {
            return Err(self.unexpected(what));
        };
        self.advance()?;
        Ok(name)
    }

    fn unit(&mut self) -> Result<CompilationUnit, ParseFailure> {
        let package = if self.is_keyword("package") {
            self.advance()?;
            let name = self.name("package name")?;
            self.expect_punct(';')?;
            Some(name)
        } else {
            None
        };

        let mut classes = Vec::new();
        while self.token.kind != TokenKind::Eof {
            classes.push(self.class()?);
        }

        Ok(CompilationUnit { package, classes })
    }

    fn class(&mut self) -> Result<ClassDecl, ParseFailure> {
        if !self.is_keyword("class") {
            return Err(self.unexpected("'class'"));
        }
        let location = self.advance()?.location;
        let name = self.ident("class name")?;

        let base = if self.is_keyword("extends") {
            self.advance()?;
            Some(self.name("base class name")?)
        } else {
            None
        };

        self.expect_punct('{')?;
        let mut members = Vec::new();
        while !self.is_punct('}') {
            if self.token.kind == TokenKind::Eof {
                return Err(self.unexpected("'}'"));
            }
            members.push(self.member(&name)?);
        }
        self.advance()?;

        Ok(ClassDecl {
            name,
            base,
            members,
            location,
        })
    }

    fn member(&mut self, class: &str) -> Result<Member, ParseFailure> {
        let first = self.ident("member declaration")?;

        if first == class && self.is_punct('(') {
            return self.method(None, first).map(Member::Method);
        }

        let ty = self.type_rest(first)?;
        let name = self.ident("member name")?;
        if self.is_punct('(') {
            self.method(Some(ty), name).map(Member::Method)
        } else {
            self.expect_punct(';')?;
            Ok(Member::Field(Field { ty, name }))
        }
    }

    fn method(&mut self, return_type: Option<String>, name: String) -> Result<Method, ParseFailure> {
        self.expect_punct('(')?;
        let mut params = Vec::new();
        if !self.is_punct(')') {
            loop {
                let ty = self.ty()?;
                let name = self.ident("parameter name")?;
                params.push(Param { ty, name });
                if !self.is_punct(',') {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect_punct(')')?;

        if !self.is_punct('{') {
            return Err(self.unexpected("method body"));
        }
        // The cursor is already past the `{`; the body is read raw and the
        // lookahead refilled after the closing brace.
        let body = raw_block(self.cursor, self.token.location)?.to_string();
        self.token = next_token(self.cursor)?;

        Ok(Method {
            return_type,
            name,
            params,
            body,
        })
    }

    fn ty(&mut self) -> Result<String, ParseFailure> {
        let first = self.ident("type")?;
        self.type_rest(first)
    }

    /// Finish a type whose first identifier was already read.
    fn type_rest(&mut self, first: String) -> Result<String, ParseFailure> {
        let mut ty = self.name_rest(first)?;
        while self.is_punct('[') {
            self.advance()?;
            self.expect_punct(']')?;
            ty.push_str("[]");
        }
        Ok(ty)
    }

    fn name(&mut self, what: &str) -> Result<String, ParseFailure> {
        let first = self.ident(what)?;
        self.name_rest(first)
    }

    fn name_rest(&mut self, mut name: String) -> Result<String, ParseFailure> {
        while self.is_punct('.') {
            self.advance()?;
            name.push('.');
            name.push_str(&self.ident("identifier")?);
        }
        Ok(name)
    }
}
