use crossterm::style::Stylize;
use envdoctor_core::{Error, Issue, Result};
use envdoctor_fixer::Prompter;
use std::io::{self, BufRead, Write};

/// Asks on the terminal before each fix
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, issue: &Issue) -> Result<bool> {
        let mut stdout = io::stdout().lock();
        write!(
            stdout,
            "{} {} [y/N] ",
            "?".yellow(),
            format!("Fix \"{}\"?", issue.message).bold()
        )?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(|e| Error::file_system("<stdin>", "read", e))?;
        Ok(is_yes(&answer))
    }
}

/// Anything other than an explicit yes declines
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
