use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// The seam between the interactive loop and the terminal
pub trait Prompt {
    /// Show a label and read one trimmed line
    fn line(&mut self, label: &str) -> Result<String>;

    fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.line(&format!("{label} [y/N]"))?;
        Ok(matches!(answer.as_str(), "y" | "Y" | "yes" | "Yes"))
    }
}

pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn line(&mut self, label: &str) -> Result<String> {
        print!("{label}: ");
        std::io::stdout().flush()?;

        let mut buf = String::new();
        // a closed input stream is the one way the prompts can end the session
        if std::io::stdin().lock().read_line(&mut buf)? == 0 {
            bail!("input stream closed");
        }

        Ok(buf.trim().to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct OneAnswer(String);

    impl Prompt for OneAnswer {
        fn line(&mut self, _label: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn confirm_is_conservative() {
        for (answer, expected) in [
            ("y", true),
            ("Y", true),
            ("yes", true),
            ("Yes", true),
            ("n", false),
            ("", false),
            ("whatever", false),
        ] {
            assert_eq!(
                OneAnswer(answer.to_string()).confirm("go?").unwrap(),
                expected,
                "answer {answer:?}"
            );
        }
    }
}
