//! Grammar-driven lexers backed by syntect's bundled syntaxes

use std::collections::VecDeque;
use std::sync::OnceLock;

use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::highlight::lexer::Lexer;
use crate::highlight::token::{Token, TokenStream};

/// Bundled grammars, loaded on first use
pub fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Tokenizes with the grammar registered for a file extension or name
pub struct ScopeLexer {
    name: &'static str,
    syntax: Option<&'static SyntaxReference>,
}

impl ScopeLexer {
    /// `token` is looked up like a code-fence hint (`json`, `xml`, `html`).
    /// Without a matching grammar the lexer emits the text unclassified.
    pub fn new(name: &'static str, token: &str) -> Self {
        let syntax = syntax_set().find_syntax_by_token(token);
        if syntax.is_none() {
            tracing::warn!(lexer = name, token, "No bundled grammar, text will be uncolored");
        }
        ScopeLexer { name, syntax }
    }
}

impl Lexer for ScopeLexer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn tokenise<'a>(&self, text: &'a str) -> TokenStream<'a> {
        match self.syntax {
            Some(syntax) => TokenStream::new(ScopedTokens::new(syntax, text)),
            None if text.is_empty() => TokenStream::empty(),
            None => TokenStream::new(std::iter::once(Token::plain(text))),
        }
    }
}

/// Line-at-a-time scope parser; a parse failure leaves the remainder unclassified
struct ScopedTokens<'a> {
    lines: LinesWithEndings<'a>,
    state: ParseState,
    stack: ScopeStack,
    pending: VecDeque<Token<'a>>,
    broken: bool,
}

impl<'a> ScopedTokens<'a> {
    fn new(syntax: &SyntaxReference, text: &'a str) -> Self {
        ScopedTokens {
            lines: LinesWithEndings::from(text),
            state: ParseState::new(syntax),
            stack: ScopeStack::new(),
            pending: VecDeque::new(),
            broken: false,
        }
    }

    fn scan_line(&mut self, line: &'a str) {
        if self.broken {
            self.pending.push_back(Token::plain(line));
            return;
        }

        let ops = match self.state.parse_line(line, syntax_set()) {
            Ok(ops) => ops,
            Err(e) => {
                tracing::warn!(error = %e, "Grammar failed, rest of body uncolored");
                self.broken = true;
                self.pending.push_back(Token::plain(line));
                return;
            }
        };

        for (range, op) in ScopeRangeIterator::new(&ops, line) {
            if let Err(e) = self.stack.apply(op) {
                tracing::warn!(error = ?e, "Scope stack mismatch, rest of body uncolored");
                self.broken = true;
                self.pending.push_back(Token::plain(&line[range.start..]));
                return;
            }
            if !range.is_empty() {
                self.pending.push_back(Token::new(self.stack.clone(), &line[range]));
            }
        }
    }
}

impl<'a> Iterator for ScopedTokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let line = self.lines.next()?;
            self.scan_line(line);
        }
    }
}
