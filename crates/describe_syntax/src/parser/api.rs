/// Parse a token stream into a [`Script`].
///
/// ## Errors
/// Returns `Err(Vec<SyntaxError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Script, Vec<SyntaxError>> {
    Parser::new(tokens).parse()
}
