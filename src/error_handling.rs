use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

/// Where in a grammar source something went wrong. A line of 0 means the
/// whole source, and an empty path means the text did not come from a file.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn line(line: usize) -> Self {
        Location { file: PathBuf::new(), line }
    }

    pub fn in_file(file: PathBuf, line: usize) -> Self {
        Location { file, line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let from_text = self.file.as_os_str().is_empty();
        match (from_text, self.line) {
            (true, 0) => write!(f, "input"),
            (true, line) => write!(f, "line {}", line),
            (false, 0) => write!(f, "{}", self.file.display()),
            (false, line) => write!(f, "{}:{}", self.file.display(), line),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(Location::line(0).to_string(), "input");
        assert_eq!(Location::line(4).to_string(), "line 4");
        assert_eq!(Location::in_file(PathBuf::from("g.bnf"), 0).to_string(), "g.bnf");
        assert_eq!(Location::in_file(PathBuf::from("g.bnf"), 7).to_string(), "g.bnf:7");
    }
}
