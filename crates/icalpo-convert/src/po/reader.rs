//! PO parsing for merge templates.
//!
//! Catalogs are parsed with `polib`; this module keeps the parts that matter
//! for carrying translations forward: references, the fuzzy flag, context,
//! msgid and msgstr. Obsolete (`#~`) entries are dropped before parsing and
//! plural entries keep their first form.

use icalpo_core::{TemplateCatalog, TemplateEntry};
use polib::message::MessageView;
use polib::po_file;
use tracing::debug;

use crate::error::{ConvertError, ConvertResult};

/// Splits a KDE-style `_: comment\n` prefix off a msgid.
fn split_msgid_comment(msgid: &str) -> (Option<String>, String) {
    if let Some(rest) = msgid.strip_prefix("_: ")
        && let Some((comment, source)) = rest.split_once('\n')
    {
        return (Some(comment.to_string()), source.to_string());
    }
    (None, msgid.to_string())
}

/// Returns the live lines of a catalog, without obsolete entries.
///
/// Fails on the first line that cannot belong to a PO file at all, so that a
/// calendar or free text given as a template is rejected.
fn live_lines(content: &str) -> ConvertResult<String> {
    let mut live = String::with_capacity(content.len());
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("#~") {
            // an obsolete block ends wherever live content starts
            if !live.is_empty() && !live.ends_with("\n\n") {
                live.push('\n');
            }
            continue;
        }
        if !(trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with('"')
            || trimmed.starts_with("msg"))
        {
            return Err(ConvertError::template(format!(
                "line {}: unexpected content '{}'",
                index + 1,
                trimmed
            )));
        }
        live.push_str(line);
        live.push('\n');
    }
    Ok(live)
}

fn template_entry(message: &dyn MessageView) -> ConvertResult<TemplateEntry> {
    let target_text = if message.is_plural() {
        message
            .msgstr_plural()
            .map_err(|e| ConvertError::template(e.to_string()))?
            .first()
            .cloned()
            .unwrap_or_default()
    } else {
        message
            .msgstr()
            .map_err(|e| ConvertError::template(e.to_string()))?
            .to_string()
    };

    let (msgid_comment, source_text) = split_msgid_comment(message.msgid());
    let context = message.msgctxt();
    Ok(TemplateEntry {
        source_text,
        target_text,
        locations: message
            .source()
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        context_key: context.filter(|c| !c.is_empty()).map(str::to_string),
        msgid_comment,
        is_fuzzy: message.flags().is_fuzzy(),
    })
}

/// Parses PO text into a merge template.
///
/// # Errors
///
/// [`ConvertError::TemplateMismatch`] for text that is not a PO catalog.
pub fn parse_template(content: &str) -> ConvertResult<TemplateCatalog> {
    let live = live_lines(content)?;
    if live.trim().is_empty() {
        return Ok(TemplateCatalog::default());
    }

    let catalog = po_file::parse_from_reader(live.as_bytes())
        .map_err(|e| ConvertError::template(e.to_string()))?;

    let entries = catalog
        .messages()
        .filter(|message| !message.msgid().is_empty())
        .map(|message| template_entry(message))
        .collect::<ConvertResult<Vec<_>>>()?;

    debug!(entries = entries.len(), "Parsed PO template");
    Ok(TemplateCatalog::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<TemplateEntry> {
        parse_template(content).unwrap().entries().to_vec()
    }

    #[test]
    fn parse_simple_po() {
        let entries = parse(
            r#"
msgid "Hello"
msgstr "Bonjour"

msgid "Goodbye"
msgstr "Au revoir"
"#,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source_text, "Hello");
        assert_eq!(entries[0].target_text, "Bonjour");
        assert_eq!(entries[1].source_text, "Goodbye");
        assert_eq!(entries[1].target_text, "Au revoir");
    }

    #[test]
    fn header_is_skipped() {
        let entries = parse(
            r#"#. extracted from party.ics
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

msgid "Value"
msgstr "Valor"
"#,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_text, "Value");
    }

    #[test]
    fn references_flags_and_context() {
        let entries = parse(
            r#"
#. Start date: 1997-07-14 17:00:00+00:00
#: [uid1@example.com]SUMMARY
#: [uid2@example.com]SUMMARY
#, fuzzy
msgctxt "[uid1@example.com]SUMMARY"
msgid "Value"
msgstr "Valor"
"#,
        );
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(
            entry.locations,
            ["[uid1@example.com]SUMMARY", "[uid2@example.com]SUMMARY"]
        );
        assert!(entry.is_fuzzy);
        assert_eq!(entry.context_key.as_deref(), Some("[uid1@example.com]SUMMARY"));
    }

    #[test]
    fn untranslated_entries_are_kept() {
        let entries = parse("msgid \"Untranslated\"\nmsgstr \"\"\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target_text, "");
        assert!(!entries[0].is_fuzzy);
        assert_eq!(entries[0].context_key, None);
    }

    #[test]
    fn parse_multiline() {
        let entries = parse(
            r#"
msgid ""
"Hello "
"World"
msgstr ""
"Bonjour "
"Monde"
"#,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_text, "Hello World");
        assert_eq!(entries[0].target_text, "Bonjour Monde");
    }

    #[test]
    fn msgid_comment_is_split() {
        let entries = parse("msgid \"\"\n\"_: [uid2]SUMMARY\\n\"\n\"Value\"\nmsgstr \"Valioso\"\n");
        assert_eq!(entries[0].msgid_comment.as_deref(), Some("[uid2]SUMMARY"));
        assert_eq!(entries[0].source_text, "Value");
        assert_eq!(entries[0].disambiguator(), Some("[uid2]SUMMARY"));
    }

    #[test]
    fn plural_keeps_first_form() {
        let entries = parse(
            r#"
msgid "One day"
msgid_plural "%d days"
msgstr[0] "Un jour"
msgstr[1] "%d jours"
"#,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target_text, "Un jour");
    }

    #[test]
    fn obsolete_entries_are_skipped() {
        let entries = parse(
            r#"
#~ msgid "Old"
#~ msgstr "Viejo"

msgid "New"
msgstr "Nuevo"
"#,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_text, "New");
    }

    #[test]
    fn live_entry_right_after_obsolete_block() {
        let entries = parse(
            "#~ msgid \"Old\"\n#~ msgstr \"Viejo\"\n#: [uid1]SUMMARY\nmsgid \"New\"\nmsgstr \"Nuevo\"\n",
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_text, "New");
        assert_eq!(entries[0].target_text, "Nuevo");
        assert_eq!(entries[0].locations, ["[uid1]SUMMARY"]);
    }

    #[test]
    fn empty_template_has_no_entries() {
        assert!(parse_template("").unwrap().is_empty());
        assert!(parse_template("#~ msgid \"Old\"\n#~ msgstr \"Viejo\"\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_calendar_text() {
        let err = parse_template("BEGIN:VCALENDAR\nEND:VCALENDAR\n").unwrap_err();
        assert!(matches!(err, ConvertError::TemplateMismatch { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn rejects_free_text() {
        let err = parse_template("msgid \"A\"\nmsgstr \"a\"\n\nthis is not a catalog\n").unwrap_err();
        assert!(err.to_string().contains("line 4"));
    }
}
