//! Line prompts on stdin. Secrets never come from argv.

use learnup::error::AppResult;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Environment variable checked before prompting for a password.
pub static PASSWORD_ENV: &str = "LEARNUP_PASSWORD";

pub type StdinLines = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> StdinLines {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Prints `label` on stderr and reads one trimmed line; EOF reads as empty.
pub async fn ask(lines: &mut StdinLines, label: &str) -> AppResult<String> {
    eprint!("{label}");
    let line = lines.next_line().await?.unwrap_or_default();
    Ok(line.trim().to_string())
}

pub async fn password(lines: &mut StdinLines) -> AppResult<String> {
    match std::env::var(PASSWORD_ENV) {
        Ok(password) if !password.is_empty() => Ok(password),
        _ => ask(lines, "Password: ").await,
    }
}
