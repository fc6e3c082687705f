use super::ui::{self, StyleType};
use crate::bot::CurrencyBot;
use crate::core::RateSource;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Reads commands line by line and writes each reply, sharing one bot (and
/// so one rate cache) for the whole session. Ends on `quit`, `exit` or EOF.
pub async fn run<S, R, W>(bot: &CurrencyBot<S>, input: R, mut output: W) -> Result<()>
where
    S: RateSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            debug!("Shell session ended by user");
            break;
        }

        let text = match bot.dispatch(line).await {
            Some(reply) => ui::render_reply(&reply),
            None => ui::style_text(
                &format!("Unknown command: {line} (try `help`)"),
                StyleType::Subtle,
            ),
        };
        output
            .write_all(format!("{text}\n").as_bytes())
            .await
            .context("Failed to write reply")?;
        output.flush().await?;
    }
    Ok(())
}
