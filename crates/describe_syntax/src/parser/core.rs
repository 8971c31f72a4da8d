/// Parser state.
///
/// ## Notes
/// - Single pass. After an error the parser synchronizes at the next keyword or closing brace and keeps going,
///   so one run reports every independent problem.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `describe_syntax::lexer`; must end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Script`].
    ///
    /// ## Errors
    /// Returns every [`SyntaxError`] found.
    pub fn parse(mut self) -> Result<Script, Vec<SyntaxError>> {
        let items = self.items(None);

        if self.errors.is_empty() {
            Ok(Script { items })
        } else {
            Err(self.errors)
        }
    }
}
