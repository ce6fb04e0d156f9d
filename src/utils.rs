//! Rendering helpers used by the `jt` binary.

use anyhow::Context as _;
use colored::Colorize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::tokenizer::{Token, TokenKind};
use crate::value::Value;

// ==============================================================================
// Colorized JSON Output
// ==============================================================================

/// Write a value as syntax-highlighted JSON followed by a newline.
/// Silently returns `Ok(())` on broken pipe so that piping to tools like
/// `less` or `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_value<W: Write>(
    writer: &mut W,
    value: &Value,
    pretty: bool,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        write_colored_json(writer, value, 0, pretty)?;
        writeln!(writer)?;
        Ok(())
    })();
    ignore_broken_pipe(result).context("write colorized JSON to stdout")
}

/// Recursively write a JSON value with syntax highlighting.
fn write_colored_json<W: Write>(
    writer: &mut W,
    value: &Value,
    indent: usize,
    pretty: bool,
) -> io::Result<()> {
    let next_indent = indent + 2;

    match value {
        Value::Null => write!(writer, "{}", "null".red().dimmed()),
        Value::Boolean(b) => {
            write!(writer, "{}", b.to_string().yellow().bold())
        }
        // NOTE: numbers are echoed exactly as written in the source
        Value::Number(n) => write!(writer, "{}", n.literal().yellow()),
        Value::String(s) => write!(writer, "{}", quote(s)?.green()),
        Value::Array(arr) => {
            write!(writer, "[")?;
            for (i, item) in arr.iter().enumerate() {
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write_colored_json(writer, item, next_indent, pretty)?;
                if i < arr.len() - 1 {
                    write!(writer, ",")?;
                }
            }
            if pretty && !arr.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "]")
        }
        Value::Object(entries) => {
            write!(writer, "{{")?;
            for (i, (key, val)) in entries.iter().enumerate() {
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write!(writer, "{}", quote(key)?.cyan())?;
                if pretty {
                    write!(writer, ": ")?;
                } else {
                    write!(writer, ":")?;
                }
                write_colored_json(writer, val, next_indent, pretty)?;
                if i < entries.len() - 1 {
                    write!(writer, ",")?;
                }
            }
            if pretty && !entries.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "}}")
        }
    }
}

/// Re-serialize a string to get proper JSON escaping and quoting.
fn quote(s: &str) -> io::Result<String> {
    serde_json::to_string(s).map_err(io::Error::other)
}

// ==============================================================================
// Token Stream Output
// ==============================================================================

/// Write one line per token: position, kind and literal.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_tokens<W: Write>(
    writer: &mut W,
    tokens: impl IntoIterator<Item = Token>,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        for token in tokens {
            let position = format!(
                "{}:{}..{}",
                token.line, token.start, token.end
            );
            let kind = format!("{:?}", token.kind);
            let kind = if token.kind == TokenKind::Illegal {
                kind.red().bold()
            } else {
                kind.magenta()
            };
            writeln!(
                writer,
                "{:<14} {:<14} {}",
                position.dimmed(),
                kind,
                token.literal
            )?;
        }
        Ok(())
    })();
    ignore_broken_pipe(result).context("write token stream to stdout")
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
