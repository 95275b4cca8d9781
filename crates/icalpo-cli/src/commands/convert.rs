//! Convert command: calendar in, catalog out.
//!
//! Output files are written through a temporary file in the destination
//! directory and only moved into place when at least one entry was produced,
//! so a failed or empty conversion never clobbers an existing catalog.

use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::Path;

use icalpo_convert::{ConvertOptions, Converter};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::config::ConverterConfig;
use crate::error::{CliError, CliResult};

/// Merges command-line flags over the configured defaults.
pub fn options(cli: &Cli, config: &ConverterConfig) -> ConvertOptions {
    let mut options = config.convert.to_options();

    if let Some(style) = cli.duplicate_style {
        options = options.with_duplicate_style(style);
    }
    if cli.pot {
        options = options.with_blank_msgstr(true);
    }
    if !cli.fields.is_empty() {
        options = options.with_fields(cli.fields.clone());
    }
    if let Some(format) = cli.template_format {
        options = options.with_template_format(format);
    }

    options = options.with_input_name(display_name(cli.input.as_deref(), "<stdin>"));
    if let Some(ref template) = cli.template {
        options = options.with_template_name(template.display().to_string());
    }
    options
}

/// Runs the conversion described by the command line.
pub fn run(cli: &Cli, config: &ConverterConfig) -> CliResult<usize> {
    let options = options(cli, config);
    let written = convert_paths(
        options,
        cli.input.as_deref(),
        cli.output.as_deref(),
        cli.template.as_deref(),
    )?;

    if written == 0 {
        warn!(
            input = %display_name(cli.input.as_deref(), "<stdin>"),
            "No translatable text found, nothing written"
        );
    }
    Ok(written)
}

/// Converts between paths; `None` or `-` selects stdin/stdout.
pub fn convert_paths(
    options: ConvertOptions,
    input: Option<&Path>,
    output: Option<&Path>,
    template: Option<&Path>,
) -> CliResult<usize> {
    let converter = Converter::new(options);

    let input: Box<dyn Read> = match input.filter(|path| !is_stdio(path)) {
        Some(path) => Box::new(File::open(path).map_err(|e| open_error(path, e))?),
        None => Box::new(io::stdin().lock()),
    };
    let template = template
        .map(|path| File::open(path).map_err(|e| open_error(path, e)))
        .transpose()?;

    let Some(output) = output.filter(|path| !is_stdio(path)) else {
        return Ok(converter.run(input, io::stdout().lock(), template)?);
    };

    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(directory)?;
    let written = converter.run(input, BufWriter::new(staged.as_file_mut()), template)?;

    if written > 0 {
        staged.persist(output).map_err(|e| CliError::Io(e.error))?;
        debug!(output = %output.display(), entries = written, "Catalog saved");
    }
    Ok(written)
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn display_name(path: Option<&Path>, fallback: &str) -> String {
    match path.filter(|path| !is_stdio(path)) {
        Some(path) => path.display().to_string(),
        None => fallback.to_string(),
    }
}

fn open_error(path: &Path, err: io::Error) -> CliError {
    CliError::Io(io::Error::new(
        err.kind(),
        format!("{}: {}", path.display(), err),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use icalpo_convert::ConvertError;
    use icalpo_core::{DuplicateStyle, TranslatableField};
    use std::fs;
    use tempfile::tempdir;

    const PARTY: &str = "BEGIN:VCALENDAR\r\n\
                         VERSION:2.0\r\n\
                         PRODID:-//hacksw/handcal//NONSGML v1.0//EN\r\n\
                         BEGIN:VEVENT\r\n\
                         UID:uid1@example.com\r\n\
                         DTSTART:19970714T170000Z\r\n\
                         SUMMARY:Bastille Day Party\r\n\
                         END:VEVENT\r\n\
                         END:VCALENDAR\r\n";

    const NO_TEXT: &str = "BEGIN:VCALENDAR\r\n\
                           VERSION:2.0\r\n\
                           BEGIN:VEVENT\r\n\
                           UID:uid1@example.com\r\n\
                           END:VEVENT\r\n\
                           END:VCALENDAR\r\n";

    #[test]
    fn writes_output_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("party.ics");
        let output = dir.path().join("party.po");
        fs::write(&input, PARTY).unwrap();

        let options = ConvertOptions::default().with_input_name("party.ics");
        let written = convert_paths(options, Some(&input), Some(&output), None).unwrap();

        assert_eq!(written, 1);
        let catalog = fs::read_to_string(&output).unwrap();
        assert!(catalog.starts_with("#. extracted from party.ics\n"));
        assert!(catalog.contains("#: [uid1@example.com]SUMMARY\nmsgid \"Bastille Day Party\"\n"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn nothing_to_translate_creates_no_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.ics");
        let output = dir.path().join("empty.po");
        fs::write(&input, NO_TEXT).unwrap();

        let written =
            convert_paths(ConvertOptions::default(), Some(&input), Some(&output), None).unwrap();

        assert_eq!(written, 0);
        assert!(!output.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_conversion_keeps_existing_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("party.ics");
        let template = dir.path().join("broken.po");
        let output = dir.path().join("party.po");
        fs::write(&input, PARTY).unwrap();
        fs::write(&template, "not a catalog\n").unwrap();
        fs::write(&output, "previous\n").unwrap();

        let err = convert_paths(
            ConvertOptions::default(),
            Some(&input),
            Some(&output),
            Some(&template),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CliError::Convert(ConvertError::TemplateMismatch { .. })
        ));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[test]
    fn missing_input_names_the_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.ics");

        let err = convert_paths(ConvertOptions::default(), Some(&input), None, None).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert!(err.to_string().contains("absent.ics"));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "ical2po",
            "-i",
            "party.ics",
            "--duplicates",
            "merge",
            "--fields",
            "LOCATION",
            "-P",
        ])
        .unwrap();
        let mut config = ConverterConfig::default();
        config.convert.duplicate_style = DuplicateStyle::MsgidComment;

        let options = options(&cli, &config);

        assert_eq!(options.duplicate_style, DuplicateStyle::Merge);
        assert_eq!(options.fields, [TranslatableField::Location]);
        assert!(options.blank_msgstr);
        assert_eq!(options.input_name, "party.ics");
    }

    #[test]
    fn config_applies_without_flags() {
        let cli = Cli::try_parse_from(["ical2po", "-i", "-"]).unwrap();
        let mut config = ConverterConfig::default();
        config.convert.duplicate_style = DuplicateStyle::MsgidComment;
        config.convert.blank_msgstr = true;

        let options = options(&cli, &config);

        assert_eq!(options.duplicate_style, DuplicateStyle::MsgidComment);
        assert!(options.blank_msgstr);
        assert_eq!(options.input_name, "<stdin>");
        assert_eq!(options.fields, TranslatableField::ALL);
    }
}
