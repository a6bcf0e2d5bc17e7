/// SQL keywords, operators and punctuation.
///
/// Tokens render as fixed text; spacing between them is decided by
/// [`chunk_needs_space`](super::chunk_needs_space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // keywords
    SELECT,
    DISTINCT,
    ON,
    FROM,
    WHERE,
    AND,
    OR,
    NOT,
    IN,
    EXISTS,
    LIKE,
    ILIKE,
    IS,
    NULL,
    AS,
    INNER,
    JOIN,
    ORDER,
    BY,
    ASC,
    DESC,
    LIMIT,
    OFFSET,
    OVER,
    PARTITION,
    // punctuation
    LPAREN,
    RPAREN,
    COMMA,
    DOT,
    STAR,
    // operators
    EQ,
    NE,
    LT,
    GT,
    LE,
    GE,
}

impl Token {
    /// Returns the SQL text for this token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Token::SELECT => "SELECT",
            Token::DISTINCT => "DISTINCT",
            Token::ON => "ON",
            Token::FROM => "FROM",
            Token::WHERE => "WHERE",
            Token::AND => "AND",
            Token::OR => "OR",
            Token::NOT => "NOT",
            Token::IN => "IN",
            Token::EXISTS => "EXISTS",
            Token::LIKE => "LIKE",
            Token::ILIKE => "ILIKE",
            Token::IS => "IS",
            Token::NULL => "NULL",
            Token::AS => "AS",
            Token::INNER => "INNER",
            Token::JOIN => "JOIN",
            Token::ORDER => "ORDER",
            Token::BY => "BY",
            Token::ASC => "ASC",
            Token::DESC => "DESC",
            Token::LIMIT => "LIMIT",
            Token::OFFSET => "OFFSET",
            Token::OVER => "OVER",
            Token::PARTITION => "PARTITION",
            Token::LPAREN => "(",
            Token::RPAREN => ")",
            Token::COMMA => ",",
            Token::DOT => ".",
            Token::STAR => "*",
            Token::EQ => "=",
            Token::NE => "<>",
            Token::LT => "<",
            Token::GT => ">",
            Token::LE => "<=",
            Token::GE => ">=",
        }
    }

    /// Comparison operators get a space on both sides.
    #[inline]
    pub const fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EQ | Token::NE | Token::LT | Token::GT | Token::LE | Token::GE
        )
    }

    /// Punctuation never takes part in word spacing.
    #[inline]
    pub const fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Token::LPAREN | Token::RPAREN | Token::COMMA | Token::DOT
        )
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
