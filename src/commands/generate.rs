//! `generate` subcommand: shell completions and man pages.
use anyhow::{Context, Result};
use clap_complete::Shell;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write completions for `shell` to `writer`.
pub fn write_completions<W: Write>(
    shell: Shell,
    cmd: &mut clap::Command,
    writer: &mut W,
) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, writer);
}

/// Generate the man page for `cmd` and one page per subcommand, named
/// `<parent>-<sub>.1`, into `output_dir` (default: the current directory).
/// Returns the paths written.
///
/// # Errors
///
/// Returns an error if the output directory or a page cannot be written.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .context("create output Man directories")?;

    let mut written = vec![];
    render_page(cmd.clone(), &output_dir, &mut written)?;
    Ok(written)
}

fn render_page(
    cmd: clap::Command,
    output_dir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = output_dir.join(format!("{}.1", cmd.get_name()));
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    clap_mangen::Man::new(cmd.clone()).render(&mut file)?;
    written.push(path);

    for sub in cmd.get_subcommands() {
        // The leaked name lives for the rest of this one-shot process.
        let prefixed: &'static str = Box::leak(
            format!("{}-{}", cmd.get_name(), sub.get_name()).into_boxed_str(),
        );
        let renamed = sub.clone().name(prefixed).disable_help_subcommand(true);
        render_page(renamed, output_dir, written)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> clap::Command {
        clap::Command::new("tool").subcommand(
            clap::Command::new("sub").subcommand(clap::Command::new("leaf")),
        )
    }

    #[test]
    fn man_pages_for_every_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let written =
            generate_man_pages(&command(), Some(dir.path().to_path_buf()))
                .unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["tool.1", "tool-sub.1", "tool-sub-leaf.1"]);
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn completions_mention_binary() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut command(), &mut out);
        assert!(String::from_utf8(out).unwrap().contains("tool"));
    }
}
