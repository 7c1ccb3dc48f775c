/*
    This module parses BNF grammar text
*/

pub mod lexer;
pub mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, warn};

use crate::grammar::*;
use crate::error_handling::*;
use lexer::Token;
use verifier::verify_rules;

#[derive(Debug)]
pub enum SyntaxErrorType {
    // A non-blank line holds a single token
    SingleToken,
    // A nonterminal starts the line but no `->` follows it
    MissingArrow,
    // The line starts with something other than a nonterminal or `|`
    MissingNonterminal,
    // A terminal was given a definition
    TerminalLeftHandSide(String),
    // Nothing between two `|`, or after the arrow
    EmptyAlternative,
    // A `|` line came before any rule to continue
    OrphanContinuation,
    // The grammar text holds no rules at all
    NoRules,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for SyntaxErrorType {}

impl PartialEq for SyntaxErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let SyntaxErrorType::FileError(a) = self {
            if let SyntaxErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        if let SyntaxErrorType::TerminalLeftHandSide(a) = self {
            if let SyntaxErrorType::TerminalLeftHandSide(b) = other {
                return a == b;
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for SyntaxErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxErrorType::SingleToken => write!(f, "Illegal rule: a line cannot hold a single token"),
            SyntaxErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            SyntaxErrorType::MissingNonterminal => write!(f, "Illegal rule: expected `<nonterminal> ->` or `|`"),
            SyntaxErrorType::TerminalLeftHandSide(lhs) => write!(f, "Left hand side `{}` is a terminal", lhs),
            SyntaxErrorType::EmptyAlternative => write!(f, "Empty right hand side"),
            SyntaxErrorType::OrphanContinuation => write!(f, "`|` continues no rule"),
            SyntaxErrorType::NoRules => write!(f, "Grammar has no rules"),
            SyntaxErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type GrammarSyntaxError = Error<SyntaxErrorType>;
pub type GrammarSyntaxErrors = Errors<SyntaxErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> GrammarSyntaxError {
    GrammarSyntaxError {
        location: Location::in_file(file, 0),
        error: SyntaxErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, SyntaxErrorType>;
pub type LineResult<T> = std::result::Result<T, GrammarSyntaxError>;
pub type FileResult<T> = std::result::Result<T, GrammarSyntaxErrors>;

// What a single grammar line contributes
#[derive(PartialEq, Debug)]
enum Line {
    Blank,
    Group { lhs: Symbol, alternatives: Vec<Alternative> },
    Continuation { alternatives: Vec<Alternative> },
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    if tokens.is_empty() {
        return Err(SyntaxErrorType::EmptyAlternative);
    }

    // An arrow past the head of a line is an ordinary terminal
    Ok(tokens.iter().map(|t| match t {
        Token::Arrow => Symbol::Terminal(lexer::ARROW.to_string()),
        Token::Or => Symbol::Terminal(lexer::OR.to_string()),
        Token::Symbol(s) => s.clone()
    }).collect())
}

fn parse_rewrite(tokens: &[Token]) -> Result<Vec<Alternative>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token]) -> Result<Line> {
    match tokens {
        [] => Ok(Line::Blank),
        [_] => Err(SyntaxErrorType::SingleToken),
        [Token::Or, rest @ ..] => Ok(Line::Continuation { alternatives: parse_rewrite(rest)? }),
        [Token::Symbol(Symbol::Nonterminal(s)), Token::Arrow, rest @ ..] => Ok(Line::Group {
            lhs: Symbol::Nonterminal(s.clone()),
            alternatives: parse_rewrite(rest)?
        }),
        [Token::Symbol(Symbol::Terminal(s)), Token::Arrow, ..] => {
            Err(SyntaxErrorType::TerminalLeftHandSide(s.clone()))
        }
        [Token::Symbol(Symbol::Nonterminal(_)), ..] => Err(SyntaxErrorType::MissingArrow),
        _ => Err(SyntaxErrorType::MissingNonterminal)
    }
}

// Builds rules line by line. Continuation lines attach to the most recently
// declared left hand side.
fn collect_rules(lines: impl Iterator<Item = (usize, LineResult<String>)>, file: &Path) -> FileResult<Vec<(Rule, Location)>> {
    let mut rules = Vec::new();
    let mut errors = Vec::new();
    let mut current_lhs: Option<Symbol> = None;

    for (num, line) in lines {
        let location = Location::in_file(file.to_path_buf(), num);
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        let parsed = parse_line(&lexer::lex_line(&line)).and_then(|parsed| match parsed {
            Line::Blank => Ok(Vec::new()),
            Line::Group { lhs, alternatives } => {
                current_lhs = Some(lhs.clone());
                Ok(alternatives.into_iter().map(|rhs| (lhs.clone(), rhs)).collect_vec())
            }
            Line::Continuation { alternatives } => match &current_lhs {
                Some(lhs) => Ok(alternatives.into_iter().map(|rhs| (lhs.clone(), rhs)).collect_vec()),
                None => Err(SyntaxErrorType::OrphanContinuation)
            }
        });

        match parsed {
            Ok(new_rules) => rules.extend(new_rules.into_iter()
                .map(|(lhs, rhs)| (Rule { lhs, rhs }, location.clone()))),
            Err(error) => errors.push(GrammarSyntaxError { location, error })
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(rules)
}

fn grammar_from_rules(rules: Vec<(Rule, Location)>, file: &Path) -> FileResult<Grammar> {
    for warning in verify_rules(&rules) {
        warn!(location = %warning.location, "{}", warning.error);
    }

    let rules = rules.into_iter().map(|(rule, _)| rule).collect_vec();
    debug!(rules = rules.len(), "parsed grammar");

    Grammar::from_rules(rules).ok_or_else(|| vec![GrammarSyntaxError {
        location: Location::in_file(file.to_path_buf(), 0),
        error: SyntaxErrorType::NoRules
    }])
}

/// Parses grammar text. Every malformed line is reported, and no grammar
/// is produced unless the whole text is well formed.
pub fn parse(text: &str) -> FileResult<Grammar> {
    let lines = text.lines().enumerate().map(|(num, line)| (num + 1, Ok(line.to_string())));
    let rules = collect_rules(lines, Path::new(""))?;
    grammar_from_rules(rules, Path::new(""))
}

// Returns an iterator over the lines of a file, with the io errors wrapped
// in GrammarSyntaxError and enumerated
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .map(|(num, line)| (num + 1, line))
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    let rules = collect_rules(file_line_nums(file, path), path)?;
    grammar_from_rules(rules, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(lhs: &str, rhs: &str) -> Rule {
        Rule { lhs: Symbol::new(lhs), rhs: symbols(rhs) }
    }

    fn syntax_error(line: usize, error: SyntaxErrorType) -> GrammarSyntaxError {
        GrammarSyntaxError { location: Location::line(line), error }
    }

    #[test]
    fn parse_normal_line() {
        let lexed = lexer::lex_line("<S> -> a <S> | a");
        assert_eq!(parse_line(&lexed), Ok(Line::Group {
            lhs: Symbol::new("<S>"),
            alternatives: vec![symbols("a <S>"), symbols("a")]
        }));

        let lexed = lexer::lex_line("| b -> c");
        assert_eq!(parse_line(&lexed), Ok(Line::Continuation {
            alternatives: vec![symbols("b -> c")]
        }));
    }

    #[test]
    fn parse_malformed_line() {
        let cases = vec![
            ("<S>", SyntaxErrorType::SingleToken),
            ("|", SyntaxErrorType::SingleToken),
            ("<S> a b", SyntaxErrorType::MissingArrow),
            ("a -> b", SyntaxErrorType::TerminalLeftHandSide("a".to_string())),
            ("a b", SyntaxErrorType::MissingNonterminal),
            ("-> a b", SyntaxErrorType::MissingNonterminal),
            ("<S> ->", SyntaxErrorType::EmptyAlternative),
            ("<S> -> a | | b", SyntaxErrorType::EmptyAlternative),
            ("<S> -> a |", SyntaxErrorType::EmptyAlternative),
            ("| a |", SyntaxErrorType::EmptyAlternative),
        ];

        for (line, error) in cases {
            assert_eq!(parse_line(&lexer::lex_line(line)), Err(error), "line `{}`", line);
        }
    }

    #[test]
    fn parse_normal_text() {
        let text = "<S> -> <A> b | c\n\n<A> -> a\n   | a <A>\n| <S>\n";
        let grammar = parse(text).unwrap();

        assert_eq!(grammar.start_symbol(), &Symbol::new("<S>"));
        assert_eq!(grammar.rules(), &[
            rule("<S>", "<A> b"),
            rule("<S>", "c"),
            rule("<A>", "a"),
            rule("<A>", "a <A>"),
            rule("<A>", "<S>"),
        ]);
    }

    #[test]
    fn parse_is_repeatable() {
        let text = "<E> -> <E> + <T> | <T>\n<T> -> x\n";
        assert_eq!(parse(text).unwrap().rules(), parse(text).unwrap().rules());
    }

    #[test]
    fn parse_undefined_nonterminal_is_not_an_error() {
        let grammar = parse("<S> -> <A> | a").unwrap();
        assert!(grammar.rules_for(&Symbol::new("<A>")).is_empty());
    }

    #[test]
    fn parse_single_token_line() {
        assert_eq!(parse("<S> -> a\n<S>\n").unwrap_err(), vec![
            syntax_error(2, SyntaxErrorType::SingleToken)
        ]);
    }

    #[test]
    fn parse_reports_every_bad_line() {
        let text = "| a\n<S> -> a\nb -> c\n<S> -> \n<S> -> x";
        assert_eq!(parse(text).unwrap_err(), vec![
            syntax_error(1, SyntaxErrorType::OrphanContinuation),
            syntax_error(3, SyntaxErrorType::TerminalLeftHandSide("b".to_string())),
            syntax_error(4, SyntaxErrorType::EmptyAlternative),
        ]);
    }

    #[test]
    fn parse_empty_text() {
        assert_eq!(parse("\n  \n").unwrap_err(), vec![
            syntax_error(0, SyntaxErrorType::NoRules)
        ]);
    }

    #[test]
    fn parse_normal_file() {
        let path = PathBuf::from("example_data/expressions.bnf");
        let grammar = parse_file(&path).unwrap();

        assert_eq!(grammar.start_symbol(), &Symbol::new("<expr>"));
        assert_eq!(grammar.rules(), &[
            rule("<expr>", "<term> + <expr>"),
            rule("<expr>", "<term>"),
            rule("<term>", "<factor> * <term>"),
            rule("<term>", "<factor>"),
            rule("<factor>", "( <expr> )"),
            rule("<factor>", "x"),
            rule("<factor>", "y"),
        ]);
    }

    #[test]
    fn parse_malformed_file() {
        let path = PathBuf::from("example_data/malformed.bnf");
        let errors = parse_file(&path).unwrap_err();

        assert_eq!(errors, vec![
            GrammarSyntaxError {
                location: Location::in_file(path.clone(), 3),
                error: SyntaxErrorType::SingleToken
            },
            GrammarSyntaxError {
                location: Location::in_file(path, 5),
                error: SyntaxErrorType::MissingArrow
            }
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let path = PathBuf::from("example_data/does_not_exist.bnf");
        assert_eq!(parse_file(&path).unwrap_err(), vec![
            GrammarSyntaxError {
                location: Location::in_file(path.clone(), 0),
                error: SyntaxErrorType::FileError(std::io::Error::from(std::io::ErrorKind::NotFound))
            }
        ]);
    }
}
