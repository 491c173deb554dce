//! Fallback lexer - the whole body as one uncolored token

use crate::highlight::lexer::Lexer;
use crate::highlight::token::{Token, TokenStream};

pub struct PlainLexer;

impl Lexer for PlainLexer {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn tokenise<'a>(&self, text: &'a str) -> TokenStream<'a> {
        if text.is_empty() {
            return TokenStream::empty();
        }
        TokenStream::new(std::iter::once(Token::plain(text)))
    }
}
