use anyhow::Context;
use chrono::NaiveDate;
use permits_core::record::parse_date;
use std::io::{BufRead, Write};

/// Line-oriented question/answer session over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Print `question` and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read answer")?;
        if n == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes only for a `y` answer, case-insensitive. Anything else, including EOF, is no.
    pub fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.ask(&format!("{question} (y/n): "))?;
        Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y")))
    }

    /// Ask until the answer parses as `dd/mm/yyyy`.
    pub fn ask_date(&mut self, question: &str) -> anyhow::Result<NaiveDate> {
        loop {
            let Some(answer) = self.ask(question)? else {
                anyhow::bail!("input ended before a date was given");
            };
            match parse_date(&answer) {
                Some(date) => return Ok(date),
                None => writeln!(self.out, "[!] '{answer}' is not a dd/mm/yyyy date, try again.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_trims_answer() {
        let mut p = prompter("  report.csv \n");
        assert_eq!(p.ask("File: ").unwrap().as_deref(), Some("report.csv"));
        assert_eq!(String::from_utf8(p.out().clone()).unwrap(), "File: ");
    }

    #[test]
    fn ask_returns_none_at_eof() {
        let mut p = prompter("");
        assert_eq!(p.ask("File: ").unwrap(), None);
    }

    #[test]
    fn confirm_only_accepts_y() {
        let mut p = prompter("Y\ny\nyes\nn\n\n");
        assert!(p.confirm("Q?").unwrap());
        assert!(p.confirm("Q?").unwrap());
        assert!(!p.confirm("Q?").unwrap());
        assert!(!p.confirm("Q?").unwrap());
        assert!(!p.confirm("Q?").unwrap());
        assert!(!p.confirm("Q?").unwrap());
    }

    #[test]
    fn ask_date_reprompts_on_bad_input() {
        let mut p = prompter("2025-05-01\n01/05/2025\n");
        let date = p.ask_date("Start: ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        let out = String::from_utf8(p.out().clone()).unwrap();
        assert_eq!(out.matches("Start: ").count(), 2);
        assert!(out.contains("not a dd/mm/yyyy date"));
    }

    #[test]
    fn ask_date_fails_at_eof() {
        let mut p = prompter("garbage\n");
        assert!(p.ask_date("Start: ").is_err());
    }
}
