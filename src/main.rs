use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use deriver::cli::Cli;
use deriver::derivation::derive_with_limits;
use deriver::grammar::Grammar;
use deriver::{generator, logging, parser, session};

fn derive_all<W: Write>(cli: &Cli, grammar: &Grammar, output: &mut W) -> io::Result<()> {
    let limits = cli.limits();

    for text in &cli.sentence {
        match session::parse_sentence(text) {
            Ok(sentence) => {
                let result = derive_with_limits(grammar, &sentence, &limits);
                session::report(output, &sentence, &result)?;
            }
            Err(e) => writeln!(output, "Invalid sentence `{}`: {}", text, e)?,
        }
    }

    for _ in 0..cli.generate.unwrap_or(0) {
        match generator::generate(grammar, cli.generate_steps, cli.file.clone()) {
            Ok(sentence) => {
                let result = derive_with_limits(grammar, &sentence, &limits);
                session::report(output, &sentence, &result)?;
            }
            Err(e) => warn!("{}", e.error),
        }
    }

    Ok(())
}

fn run(cli: &Cli, grammar: &Grammar) -> io::Result<()> {
    let mut output = io::stdout().lock();

    if !cli.quiet {
        writeln!(output, "Reading grammar from {}", cli.file.display())?;
        write!(output, "{}", grammar)?;
    }

    if cli.sentence.is_empty() && cli.generate.is_none() {
        return session::run(grammar, &cli.limits(), io::stdin().lock(), &mut output);
    }

    derive_all(cli, grammar, &mut output)
}

fn main() -> ExitCode {
    logging::init_tracing("warn");
    let cli = Cli::parse();

    let grammar = match parser::parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&cli, &grammar) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
