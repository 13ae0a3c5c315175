use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::domain::Decision;
use crate::error::AppError;

/// Source of the human player's input.
#[async_trait]
pub trait HumanInput: Send {
    /// Next decision, or `None` when the player walked away.
    async fn next_decision(&mut self) -> Result<Option<Decision>, AppError>;

    /// Raw answer to "how many turns"; interpretation is up to the caller.
    async fn turns_total(&mut self) -> Result<String, AppError>;
}

/// One parsed menu line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Decision(Decision),
    Quit,
    Invalid,
}

pub const MENU: &str = "Select your next decision:\n1 - Rock\n2 - Scissors\n3 - Paper\n(q or Esc to quit)";

/// Interpret one line of menu input.
pub fn parse_decision(line: &str) -> MenuChoice {
    match line.trim() {
        "1" => MenuChoice::Decision(Decision::Rock),
        "2" => MenuChoice::Decision(Decision::Scissors),
        "3" => MenuChoice::Decision(Decision::Paper),
        "q" | "Q" | "\u{1b}" => MenuChoice::Quit,
        _ => MenuChoice::Invalid,
    }
}

/// Line-based input over any async reader, prompting on `out`.
pub struct StdinInput<R, W> {
    lines: Lines<BufReader<R>>,
    out: W,
}

impl StdinInput<tokio::io::Stdin, tokio::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdinInput<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            out,
        }
    }

    async fn say(&mut self, text: &str) -> Result<(), AppError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> HumanInput for StdinInput<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_decision(&mut self) -> Result<Option<Decision>, AppError> {
        self.say(&format!("\n{MENU}")).await?;
        loop {
            // EOF behaves like quitting
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            match parse_decision(&line) {
                MenuChoice::Decision(decision) => return Ok(Some(decision)),
                MenuChoice::Quit => return Ok(None),
                MenuChoice::Invalid => self.say("Please enter 1, 2, 3 or q.").await?,
            }
        }
    }

    async fn turns_total(&mut self) -> Result<String, AppError> {
        self.say("Enter desired number of turns in game:").await?;
        Ok(self.lines.next_line().await?.unwrap_or_default())
    }
}
