//! Terminal move input

use std::io::{self, BufRead, Write};

use crate::{Result, error::Error, ports::MoveInput};

/// Reads moves from standard input and writes prompts to standard output
#[derive(Debug, Default)]
pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Self {
        Self
    }
}

impl MoveInput for StdinInput {
    fn show(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }

    fn read_move(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt} ");
        io::stdout().flush().map_err(|source| Error::Io {
            operation: "flush stdout".to_string(),
            source,
        })?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|source| Error::Io {
                operation: "read move from stdin".to_string(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
