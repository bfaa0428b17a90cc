use std::{env, process::ExitCode, time::Instant};

use filterscan::{
    display_error,
    errors::errors::{Error, ErrorImpl},
    init_tracing,
    lexer::lexer::tokenize,
    Position,
};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let Some(query) = args.get(1) else {
        display_error(&Error::new(ErrorImpl::MissingQuery, Position::null()), "");
        return ExitCode::FAILURE;
    };

    let start = Instant::now();

    match tokenize(query) {
        Ok(tokens) => {
            for token in &tokens {
                token.debug();
            }
            tracing::info!(elapsed = ?start.elapsed(), "tokenized");
            ExitCode::SUCCESS
        }
        Err(error) => {
            display_error(&error, query);
            ExitCode::FAILURE
        }
    }
}
