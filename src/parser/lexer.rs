use crate::grammar::Symbol;

#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    Arrow,
    Or,
    Symbol(Symbol)
}

pub const ARROW: &str = "->";
pub const OR: &str = "|";

pub fn lex_word(word: &str) -> Token {
    match word {
        ARROW => Token::Arrow,
        OR => Token::Or,
        _ => Token::Symbol(Symbol::new(word))
    }
}

// Grammar lines are whitespace delimited with no quoting or escaping, so
// every word is exactly one token
pub fn lex_line(line: &str) -> Vec<Token> {
    line.split_whitespace().map(lex_word).collect()
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn nonterminal(text: &str) -> Token {
        Token::Symbol(Symbol::Nonterminal(text.to_string()))
    }

    fn terminal(text: &str) -> Token {
        Token::Symbol(Symbol::Terminal(text.to_string()))
    }

    #[test]
    fn lex_words() {
        assert_eq!(lex_word("->"), Token::Arrow);
        assert_eq!(lex_word("|"), Token::Or);
        assert_eq!(lex_word("<expr>"), nonterminal("<expr>"));
        assert_eq!(lex_word("+"), terminal("+"));
        assert_eq!(lex_word("-->"), terminal("-->"));
        assert_eq!(lex_word("||"), terminal("||"));
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "<S> -> a <S> | a",
            "   |   <A>\tb  ",
            ""
        ];
        let answers = vec![
            vec![
                nonterminal("<S>"),
                Token::Arrow,
                terminal("a"),
                nonterminal("<S>"),
                Token::Or,
                terminal("a")
            ],
            vec![
                Token::Or,
                nonterminal("<A>"),
                terminal("b")
            ],
            vec![]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line), answer)
        }
    }
}
