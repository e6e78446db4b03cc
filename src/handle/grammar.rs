//! Handle identifier parser using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::HandleIdError;

use super::id::{HandleId, Kind, Side};
use super::lexer::{lex, Token};

/// Lexed item: `None` marks text no token matches
pub type Lexeme = Option<Token>;

/// Strictly parse handle identifier text
pub fn parse(input: &str) -> Result<HandleId, HandleIdError> {
    let len = input.len();

    let token_iter = lex(input).map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    handle_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| match errs.into_iter().next() {
            Some(err) => err.into(),
            None => HandleIdError::syntax(0..len, "invalid handle id", &[]),
        })
}

fn handle_parser<'a, I>() -> impl Parser<'a, I, HandleId, extra::Err<Rich<'a, Lexeme>>> + Clone
where
    I: ValueInput<'a, Token = Lexeme, Span = SimpleSpan>,
{
    let kind = choice((
        just(Some(Token::In)).to(Kind::In),
        just(Some(Token::Out)).to(Kind::Out),
    ));

    let side = choice((
        just(Some(Token::Left)).to(Side::Left),
        just(Some(Token::Right)).to(Side::Right),
        just(Some(Token::Top)).to(Side::Top),
        just(Some(Token::Bottom)).to(Side::Bottom),
    ));

    let index = select! {
        Some(Token::Index(n)) => n,
    }
    .labelled("positive integer without leading zero");

    let dash = just(Some(Token::Dash));

    kind.then_ignore(dash.clone())
        .then(side)
        .then_ignore(dash)
        .then(index)
        .then_ignore(end())
        .map(|((kind, side), index)| HandleId { kind, side, index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(text: &str) -> Vec<String> {
        match parse(text) {
            Err(HandleIdError::Syntax { expected, .. }) => expected,
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_canonical() {
        let id = parse("in-bottom-12").unwrap();
        assert_eq!(id.kind, Kind::In);
        assert_eq!(id.side, Side::Bottom);
        assert_eq!(id.index, 12);
    }

    #[test]
    fn test_kind_alternatives_are_reported() {
        let expected = expected("left-1");
        assert!(expected.contains(&"'in'".to_string()));
        assert!(expected.contains(&"'out'".to_string()));
    }

    #[test]
    fn test_index_label_is_reported() {
        assert!(expected("out-top-x").contains(&"positive integer without leading zero".to_string()));
    }

    #[test]
    fn test_trailing_token_expects_end() {
        let err = parse("out-top-1-").unwrap_err();
        assert_eq!(err.span(), Some(&(9..10)));
        assert!(expected("out-top-1-").contains(&"end of input".to_string()));
    }

    #[test]
    fn test_keyword_in_wrong_place() {
        let err = parse("in-in-1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid handle id at 3..5: unexpected 'in'"
        );
    }
}
