// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! charhop CLI entrypoint.
//!
//! Opens the file in the interactive pager. Press `f`, then a character,
//! then the label shown at the occurrence you want to jump to.

use std::path::PathBuf;
use std::process::ExitCode;

use charhop::config::{Config, CONFIG_FILE_NAME};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <file> [--config <path>] [--case-sensitive]\n\nKeys:\n  f            start a jump; type the target character, then a label\n  h j k l      move the cursor (arrows work too)\n  g / G        top / bottom\n  q            quit\n\n--config defaults to `{CONFIG_FILE_NAME}` in the working directory.\n--case-sensitive overrides the config file."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
    case_sensitive: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config_path.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--case-sensitive" => {
                if options.case_sensitive {
                    return Err(());
                }
                options.case_sensitive = true;
            }
            "--help" | "-h" => return Err(()),
            other => {
                if other.starts_with('-') || options.file.is_some() {
                    return Err(());
                }
                options.file = Some(PathBuf::from(other));
            }
        }
    }

    if options.file.is_none() {
        return Err(());
    }
    Ok(options)
}

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "charhop".to_owned());

    let Ok(options) = parse_options(args) else {
        print_usage(&program);
        return ExitCode::FAILURE;
    };

    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{program}: {err}");
            return ExitCode::FAILURE;
        }
    };
    if options.case_sensitive {
        config.case_sensitive = true;
    }

    let Some(file) = options.file.as_deref() else {
        // parse_options rejects a missing file.
        print_usage(&program);
        return ExitCode::FAILURE;
    };
    match charhop::tui::run(file, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{program}: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn parses_file_and_flags() {
        let options = parse(&["notes.txt", "--case-sensitive"]).unwrap();
        assert_eq!(options.file, Some(PathBuf::from("notes.txt")));
        assert!(options.case_sensitive);
        assert_eq!(options.config_path, None);
    }

    #[test]
    fn parses_config_path() {
        let options = parse(&["--config", "conf.json", "notes.txt"]).unwrap();
        assert_eq!(options.config_path, Some(PathBuf::from("conf.json")));
    }

    #[test]
    fn rejects_missing_file_duplicates_and_unknown_flags() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
        assert!(parse(&["--case-sensitive", "--case-sensitive", "a.txt"]).is_err());
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose", "a.txt"]).is_err());
        assert!(parse(&["--help"]).is_err());
    }
}
