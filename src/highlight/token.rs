//! Tokens produced by the response lexers

use std::fmt;
use std::iter::FusedIterator;

use syntect::parsing::ScopeStack;

/// A slice of the text being highlighted, tagged with its grammar scopes.
///
/// The scope stack is the token's type: a theme picks a color by matching
/// its selectors against it. An empty stack means unclassified text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub scopes: ScopeStack,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(scopes: ScopeStack, text: &'a str) -> Self {
        Token { scopes, text }
    }

    /// Unclassified text
    pub fn plain(text: &'a str) -> Self {
        Token::new(ScopeStack::new(), text)
    }

    /// Whether any scope on the stack starts with `prefix`, e.g. `constant.numeric`
    pub fn has_scope(&self, prefix: &str) -> bool {
        self.scopes
            .as_slice()
            .iter()
            .any(|scope| scope.build_string().starts_with(prefix))
    }
}

/// Single-pass token sequence.
///
/// `None` from `next` is the end-of-stream marker; the stream is fused, so it
/// never yields again afterwards, and it cannot be rewound.
pub struct TokenStream<'a> {
    inner: Box<dyn Iterator<Item = Token<'a>> + 'a>,
    finished: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(inner: impl Iterator<Item = Token<'a>> + 'a) -> Self {
        TokenStream {
            inner: Box::new(inner),
            finished: false,
        }
    }

    pub fn empty() -> Self {
        TokenStream::new(std::iter::empty())
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        let token = self.inner.next();
        if token.is_none() {
            self.finished = true;
        }
        token
    }
}

impl FusedIterator for TokenStream<'_> {}

impl fmt::Debug for TokenStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStream")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
