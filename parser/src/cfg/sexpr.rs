use std::ops::Index;
use std::rc::Rc;
use std::str::Bytes;
use std::{cmp, iter};

type ParseError = Spanned<String>;

type ParseResult<T> = std::result::Result<T, ParseError>;

use super::error::{span_start_len, CfgError};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub file_name: Rc<str>,
    pub file_content: Rc<str>,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            file_name: Rc::from(""),
            file_content: Rc::from(""),
        }
    }
}

impl Span {
    fn new(start: usize, end: usize, file_name: Rc<str>, file_content: Rc<str>) -> Span {
        assert!(start <= end);
        Span {
            start,
            end,
            file_name,
            file_content,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// # Panics
    ///
    /// Panics if `other` has a different `file_name`
    pub fn cover(self, other: Span) -> Span {
        let start = cmp::min(self.start(), other.start());
        let end = cmp::max(self.end(), other.end());
        if self.file_name != other.file_name {
            panic!("Can't create span across different files.");
        }
        Span::new(start, end, self.file_name, self.file_content)
    }

    pub fn file_name(&self) -> String {
        self.file_name.to_string()
    }

    pub fn file_content(&self) -> String {
        self.file_content.to_string()
    }
}

impl Index<Span> for str {
    type Output = str;
    fn index(&self, span: Span) -> &Self::Output {
        &self[span.start()..span.end()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Spanned<T> {
    pub t: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(t: T, span: Span) -> Spanned<T> {
        Spanned { t, span }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Either a bare atom or a parenthesized list. Strings in double quotes are atoms that keep their
/// quotes; callers trim them where quoting is allowed.
pub enum SExpr {
    Atom(Spanned<String>),
    List(Spanned<Vec<SExpr>>),
}

impl SExpr {
    pub fn atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(a) => Some(a.t.as_str()),
            SExpr::List(_) => None,
        }
    }

    pub fn list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(l) => Some(&l.t),
            SExpr::Atom(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SExpr::Atom(a) => a.span.clone(),
            SExpr::List(l) => l.span.clone(),
        }
    }
}

impl std::fmt::Debug for SExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SExpr::Atom(a) => write!(f, "{}", &a.t),
            SExpr::List(l) => {
                write!(f, "(")?;
                for (i, e) in l.t.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{e:?}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug)]
enum Token {
    Open,
    Close,
    StringTok,
}

struct Lexer<'a> {
    s: &'a str,
    bytes: Bytes<'a>,
}

fn is_start(b: u8) -> bool {
    matches!(b, b'(' | b')' | b'"') || b.is_ascii_whitespace()
}

type TokenRes = std::result::Result<Token, String>;

impl<'a> Lexer<'a> {
    #[allow(clippy::new_ret_no_self)]
    /// `file_name` is only used to point at the file a failing fragment of `source` came from.
    fn new(source: &'a str, file_name: &'a str) -> impl Iterator<Item = Spanned<TokenRes>> + 'a {
        let mut lexer = Lexer {
            s: source,
            bytes: source.bytes(),
        };
        let file_name: Rc<str> = Rc::from(file_name);
        let file_content: Rc<str> = Rc::from(source);
        iter::from_fn(move || {
            lexer.next_token().map(|(start, t)| {
                Spanned::new(
                    t,
                    Span::new(start, lexer.pos(), file_name.clone(), file_content.clone()),
                )
            })
        })
    }

    fn next_while(&mut self, f: impl Fn(u8) -> bool) {
        for b in self.bytes.clone() {
            if f(b) {
                // Iterating over a clone of this iterator - this is guaranteed to be Some
                self.bytes.next().expect("iter lag");
            } else {
                break;
            }
        }
    }

    /// Consumes bytes until "|#". Returns an error if the comment never ends.
    fn read_until_multiline_comment_end(&mut self) -> Option<TokenRes> {
        let mut found_comment_end = false;
        for b2 in self.bytes.clone().skip(1) {
            // The clone is one item ahead, so this is guaranteed to be Some.
            let b1 = self.bytes.next().expect("iter lag");
            if b1 == b'|' && b2 == b'#' {
                found_comment_end = true;
                break;
            }
        }
        if !found_comment_end {
            return Some(Err(
                "Unterminated multiline comment. Add |# after the end of your comment.".to_string(),
            ));
        }
        self.bytes.next();
        None
    }

    fn pos(&self) -> usize {
        self.s.len() - self.bytes.len()
    }

    fn next_token(&mut self) -> Option<(usize, TokenRes)> {
        use Token::*;
        loop {
            let start = self.pos();
            break match self.bytes.next() {
                Some(b) => Some((
                    start,
                    Ok(match b {
                        b'(' => Open,
                        b')' => Close,
                        b'"' => {
                            self.next_while(|b| b != b'"' && b != b'\n');
                            match self.bytes.next() {
                                Some(b'"') => StringTok,
                                _ => return Some((start, Err("Unterminated string".to_string()))),
                            }
                        }
                        b';' => match self.bytes.clone().next() {
                            Some(b';') => {
                                self.next_while(|b| b != b'\n');
                                let _ = self.bytes.next();
                                continue;
                            }
                            _ => self.next_string(),
                        },
                        b'#' => match self.bytes.clone().next() {
                            Some(b'|') => {
                                self.bytes.next();
                                if let Some(e) = self.read_until_multiline_comment_end() {
                                    return Some((start, e));
                                }
                                continue;
                            }
                            _ => self.next_string(),
                        },
                        b if b.is_ascii_whitespace() => {
                            self.next_while(|b| b.is_ascii_whitespace());
                            continue;
                        }
                        _ => self.next_string(),
                    }),
                )),
                None => None,
            };
        }
    }

    fn next_string(&mut self) -> Token {
        self.next_while(|b| !is_start(b));
        Token::StringTok
    }
}

pub type TopLevel = Spanned<Vec<SExpr>>;

pub fn parse(cfg: &str, file_name: &str) -> std::result::Result<Vec<TopLevel>, CfgError> {
    parse_with(cfg, Lexer::new(cfg, file_name)).map_err(transform_error)
}

fn parse_with(
    s: &str,
    mut tokens: impl Iterator<Item = Spanned<TokenRes>>,
) -> ParseResult<Vec<TopLevel>> {
    use SExpr::*;
    use Token::*;
    let mut stack = vec![Spanned::new(vec![], Span::default())];
    loop {
        match tokens.next() {
            None => break,
            Some(Spanned { t, span }) => match t.map_err(|s| Spanned::new(s, span.clone()))? {
                Open => stack.push(Spanned::new(vec![], span.clone())),
                Close => {
                    // There is a placeholder at the bottom of the stack to allow this expect.
                    let Spanned {
                        t: exprs,
                        span: stack_span,
                    } = stack.pop().expect("placeholder unpopped");
                    if stack.is_empty() {
                        return Err(Spanned::new(
                            "Unexpected closing parenthesis".to_string(),
                            span,
                        ));
                    }
                    let expr = List(Spanned::new(exprs, stack_span.cover(span.clone())));
                    stack.last_mut().expect("not empty").t.push(expr);
                }
                StringTok => stack
                    .last_mut()
                    .expect("not empty")
                    .t
                    .push(Atom(Spanned::new(s[span.clone()].to_string(), span))),
            },
        }
    }
    let Spanned { t: exprs, span: sp } = stack.pop().expect("placeholder unpopped");
    if !stack.is_empty() {
        return Err(Spanned::new("Unclosed opening parenthesis".to_string(), sp));
    }
    exprs
        .into_iter()
        .map(|expr| match expr {
            SExpr::List(es) => Ok(es),
            SExpr::Atom(s) => Err(Spanned::new(
                "Everything must be in a list".to_string(),
                s.span,
            )),
        })
        .collect()
}

fn transform_error(e: ParseError) -> CfgError {
    let start = e.span.start();
    let mut len = e.span.end() - start;
    if e.t.contains("Unterminated multiline comment") {
        len = 2;
    };
    CfgError {
        err_span: Some(span_start_len(start, len)),
        help_msg: e.t,
        file_name: Some(e.span.file_name()),
        file_content: Some(e.span.file_content()),
    }
}

#[test]
fn span_covers_whole_list() {
    let s = "(hello world my oyster)\n(row two)";
    let tlevel = parse(s, "test").unwrap();
    assert_eq!(&s[tlevel[0].span.clone()], "(hello world my oyster)");
    assert_eq!(&s[tlevel[1].span.clone()], "(row two)");
}

#[test]
fn comments_are_skipped() {
    let s = ";; line comment\n(a #| block\ncomment |# b)";
    let tlevel = parse(s, "test").unwrap();
    assert_eq!(tlevel.len(), 1);
    assert_eq!(format!("{:?}", tlevel[0].t), "[a, b]");
}

#[test]
fn unbalanced_parens_are_errors() {
    assert!(parse("(a (b)", "test").is_err());
    assert!(parse("(a))", "test").is_err());
    assert!(parse("bare", "test").is_err());
    assert!(parse("(a \"open)", "test").is_err());
}
