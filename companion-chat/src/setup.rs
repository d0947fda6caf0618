//! Setup menu: asks for the user's age and preferred communication style.
//!
//! Invalid answers are re-prompted; end of input aborts setup.

use std::io::Write;

use anyhow::{Context, Result, bail};
use companion_core::{CommunicationStyle, UserAge};
use crossterm::style::Stylize;
use tokio::io::{AsyncBufRead, Lines};

/// Print the banner and the remote-mode notice.
///
/// # Errors
/// Fails only if `out` cannot be written.
pub fn print_banner(out: &mut impl Write, remote_enabled: bool) -> Result<()> {
    writeln!(out, "{}", "=== VIRTUAL COMPANION CHAT ===".cyan())?;
    writeln!(out, "{}", "Welcome! Let's get to know each other.".cyan())?;
    if remote_enabled {
        writeln!(
            out,
            "{}",
            "API key detected. AI mode will be used for more interesting conversations.".green()
        )?;
    } else {
        writeln!(
            out,
            "{}",
            "Note: API key not found. Only basic responses will be used.".yellow()
        )?;
        writeln!(
            out,
            "{}",
            "For AI responses, create a .env file with OPENAI_API_KEY=your_api_key".yellow()
        )?;
    }
    Ok(())
}

/// Ask for the user's age until a valid one is given.
///
/// # Errors
/// Fails if input ends or I/O fails.
pub async fn ask_age<I>(lines: &mut Lines<I>, out: &mut impl Write) -> Result<UserAge>
where
    I: AsyncBufRead + Unpin,
{
    loop {
        write!(out, "{}", "How old are you? ".yellow())?;
        out.flush()?;
        let line = next_answer(lines).await?;
        match line.trim().parse::<i64>() {
            Ok(value) => match UserAge::new(value) {
                Ok(age) => return Ok(age),
                Err(_) => writeln!(
                    out,
                    "{}",
                    format!(
                        "Please enter a valid age (between {} and {}).",
                        UserAge::MIN,
                        UserAge::MAX
                    )
                    .red()
                )?,
            },
            Err(_) => writeln!(out, "{}", "Please enter a number.".red())?,
        }
    }
}

/// Show the style menu and ask for a choice until a valid one is given.
///
/// # Errors
/// Fails if input ends or I/O fails.
pub async fn ask_style<I>(lines: &mut Lines<I>, out: &mut impl Write) -> Result<CommunicationStyle>
where
    I: AsyncBufRead + Unpin,
{
    writeln!(out, "\n{}", "Choose your communication style:".cyan())?;
    for (i, style) in CommunicationStyle::ALL.iter().enumerate() {
        let label = format!("{}. {} ", i + 1, capitalize(&style.to_string()));
        writeln!(out, "{}- {}", label.yellow(), style.blurb())?;
    }

    loop {
        write!(out, "\n{}", "Your choice (1-4): ".yellow())?;
        out.flush()?;
        let line = next_answer(lines).await?;
        match line.trim().parse::<i64>() {
            Ok(choice) => match CommunicationStyle::from_menu_choice(choice) {
                Ok(style) => return Ok(style),
                Err(_) => writeln!(out, "{}", "Please choose a number from 1 to 4.".red())?,
            },
            Err(_) => writeln!(out, "{}", "Please enter a number.".red())?,
        }
    }
}

async fn next_answer<I>(lines: &mut Lines<I>) -> Result<String>
where
    I: AsyncBufRead + Unpin,
{
    match lines.next_line().await.context("failed to read setup answer")? {
        Some(line) => Ok(line),
        None => bail!("input closed during setup"),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
