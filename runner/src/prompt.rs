use std::io::{self, BufRead, Write};

const YES: [&str; 3] = ["y", "yes", "Y"];
const NO: [&str; 3] = ["n", "no", "N"];

/// source of yes/no answers for the interactive parts of the generator
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// confirmation before deleting results that can't be regenerated
    fn confirm_removal(&mut self, question: &str) -> io::Result<bool> {
        self.confirm(question)
    }
}

/// answers yes to proceeding but never agrees to delete results, used for `--yes`
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }

    fn confirm_removal(&mut self, _question: &str) -> io::Result<bool> {
        Ok(false)
    }
}

/// asks on `output` and keeps asking until `input` gives a valid answer
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;

        let mut line = String::new();

        loop {
            line.clear();

            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before an answer was given",
                ));
            }

            let answer = line.trim();

            if YES.contains(&answer) {
                return Ok(true);
            } else if NO.contains(&answer) {
                return Ok(false);
            }

            write!(self.output, "You can only respond by 'yes' or 'no'. ")?;
            self.output.flush()?;
        }
    }
}
