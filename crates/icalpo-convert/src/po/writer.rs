//! PO serialization.

use std::fmt::Write as _;
use std::io::{self, Write};

use icalpo_core::{Catalog, CatalogEntry};

use super::escape;

/// Header fields written after the provenance notes.
const HEADER_FIELDS: &[(&str, &str)] = &[
    ("Project-Id-Version", "PACKAGE VERSION"),
    ("Report-Msgid-Bugs-To", ""),
    ("PO-Revision-Date", "YEAR-MO-DA HO:MI+ZONE"),
    ("Last-Translator", "FULL NAME <EMAIL@ADDRESS>"),
    ("Language-Team", "LANGUAGE <LL@li.org>"),
    ("MIME-Version", "1.0"),
    ("Content-Type", "text/plain; charset=UTF-8"),
    ("Content-Transfer-Encoding", "8bit"),
];

/// Renders a catalog as PO text.
///
/// An empty catalog renders as the empty string, header included. The output
/// carries no timestamps, so rendering the same catalog twice gives identical
/// text.
pub fn render_catalog(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    render_header(&mut out, &catalog.notes);
    for entry in &catalog.entries {
        out.push('\n');
        render_entry(&mut out, entry);
    }
    out
}

/// Writes a catalog as PO text.
pub fn write_catalog<W: Write>(catalog: &Catalog, mut out: W) -> io::Result<()> {
    out.write_all(render_catalog(catalog).as_bytes())?;
    out.flush()
}

fn render_header(out: &mut String, notes: &[String]) {
    for note in notes {
        push_comment(out, "#.", note);
    }
    out.push_str("msgid \"\"\nmsgstr \"\"\n");
    for (name, value) in HEADER_FIELDS {
        let _ = writeln!(out, "\"{}: {}\\n\"", name, escape(value));
    }
    let _ = writeln!(
        out,
        "\"X-Generator: icalpo {}\\n\"",
        env!("CARGO_PKG_VERSION")
    );
}

fn render_entry(out: &mut String, entry: &CatalogEntry) {
    for comment in &entry.comments {
        push_comment(out, "#.", comment);
    }
    for location in &entry.locations {
        let _ = writeln!(out, "#: {}", location);
    }
    if entry.is_fuzzy {
        out.push_str("#, fuzzy\n");
    }
    if let Some(ref context) = entry.context_key {
        push_string(out, "msgctxt", context);
    }
    match entry.msgid_comment {
        Some(ref comment) => {
            push_string(out, "msgid", &format!("_: {}\n{}", comment, entry.source_text))
        }
        None => push_string(out, "msgid", &entry.source_text),
    }
    push_string(out, "msgstr", &entry.target_text);
}

/// Writes one comment line per line of `text`.
fn push_comment(out: &mut String, marker: &str, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "{} {}", marker, line);
    }
}

/// Writes a keyword and its string, splitting after embedded newlines.
fn push_string(out: &mut String, keyword: &str, text: &str) {
    let segments: Vec<&str> = text.split_inclusive('\n').collect();
    if segments.len() <= 1 {
        let _ = writeln!(out, "{} \"{}\"", keyword, escape(text));
        return;
    }

    let _ = writeln!(out, "{} \"\"", keyword);
    for segment in segments {
        let _ = writeln!(out, "\"{}\"", escape(segment));
    }
}
