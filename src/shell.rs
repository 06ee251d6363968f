// SPDX: CC0-1.0

use crate::Number;
use anyhow::Context;
use core::fmt;
use crossterm::style::{style, Color, Stylize};
use std::io::{self, stdin, BufRead, Write};

pub const MAX_BLANK_ATTEMPTS: u32 = 10;

pub const SUBSCRIPT: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Prompt colors, passed in rather than read from globals so callers can
/// restyle (or de-style) the whole session in one place.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub hint: Color,
    pub fail: Color,
    pub warn: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hint: Color::Cyan,
            fail: Color::Red,
            warn: Color::Yellow,
        }
    }
}

/// All blank-input attempts were used up; the session is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exhausted;

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("every input attempt was left blank")
    }
}

impl std::error::Error for Exhausted {}

/// Show a prompt and read one trimmed line. Blank input takes the default
/// when one is given; otherwise it burns one of the retry attempts.
pub fn input<W: Write>(
    mut out: W,
    palette: &Palette,
    message: &str,
    assign: Option<&str>,
    default: Option<&str>,
) -> anyhow::Result<String> {
    let mut attempts = 0;
    loop {
        writeln!(out)?;
        writeln!(out, "{message}")?;
        write!(out, ">>> ")?;
        if let Some(assign) = assign {
            write!(out, "{assign} = ")?;
        }
        if let Some(default) = default {
            write!(
                out,
                "{} ",
                style(format!("[Default: {default}]")).with(palette.hint)
            )?;
        }
        out.flush()?;

        let line = read_line().context("read from standard input failed")?;
        let line = line.trim();
        if !line.is_empty() {
            return Ok(line.to_string());
        }
        if let Some(default) = default {
            return Ok(default.trim().to_string());
        }

        attempts += 1;
        writeln!(
            out,
            "{} {}",
            style("You cannot leave this field blank.").with(palette.fail),
            style(format!(
                "({attempts} out of {MAX_BLANK_ATTEMPTS} failed attempt)"
            ))
            .with(palette.fail)
            .bold(),
        )?;

        if attempts >= MAX_BLANK_ATTEMPTS {
            writeln!(
                out,
                "{}",
                style("Session has ended. Exiting application...").with(palette.warn)
            )?;
            out.flush()?;
            return Err(Exhausted.into());
        }
    }
}

/// Prompt for a number. Only blank input is retried; anything non-blank
/// that fails to parse aborts the run.
pub fn read_number<W: Write>(
    out: W,
    palette: &Palette,
    message: &str,
    assign: Option<&str>,
    default: Option<&str>,
) -> anyhow::Result<Number> {
    let raw = input(out, palette, message, assign, default)?;
    raw.parse()
        .with_context(|| format!("Invalid input: '{raw}' is not a real number"))
}

fn read_line() -> io::Result<String> {
    let mut s = String::new();
    stdin().lock().read_line(&mut s)?;
    Ok(s)
}
