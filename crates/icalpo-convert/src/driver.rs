//! Conversion driver.
//!
//! Runs the whole pipeline for one calendar:
//!
//! ```text
//! input.ics ──► parse ──► extract ──► reconcile ──► merge ──► PO text
//!                                                    ▲
//!                       template (.ics or .po) ──────┘
//! ```
//!
//! With a calendar template, the template is the source-language calendar and
//! the input is its translation: entries come from the template, translations
//! from the input at the same `[UID]FIELD` location. With a PO template,
//! entries come from the input and translations from the catalog.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use icalpo_core::{
    Catalog, CalendarDocument, DuplicateStyle, FieldExtractor, LocationIndex, MergeOptions,
    TranslatableField, TranslationSource, merge_translations, reconcile,
};
use tracing::{debug, info};

use crate::error::{ConvertError, ConvertResult};
use crate::ics::{looks_like_calendar, parse_calendar};
use crate::po::{parse_template, write_catalog};

/// The kind of document used as a merge template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    /// A source-language calendar; the input is its translation.
    Calendar,
    /// A previously translated PO catalog.
    Catalog,
}

impl TemplateFormat {
    /// Guesses the format from the template text.
    pub fn detect(text: &str) -> Self {
        if looks_like_calendar(text) {
            Self::Calendar
        } else {
            Self::Catalog
        }
    }

    /// Guesses the format from a file extension, if it is a known one.
    pub fn from_extension(extension: &str) -> Option<Self> {
        extension.parse().ok()
    }
}

impl FromStr for TemplateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ics" | "ical" | "ifb" | "icalendar" => Ok(Self::Calendar),
            "po" | "pot" => Ok(Self::Catalog),
            other => Err(format!("unknown template format '{}'", other)),
        }
    }
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar => f.write_str("ics"),
            Self::Catalog => f.write_str("po"),
        }
    }
}

/// Options of one conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Produce a template: never carry translations forward.
    pub blank_msgstr: bool,
    pub duplicate_style: DuplicateStyle,
    /// Fields extracted from each event, in order.
    pub fields: Vec<TranslatableField>,
    /// Name of the input used in the provenance note.
    pub input_name: String,
    /// Name of the template used in the provenance note.
    pub template_name: String,
    /// Template format; detected from the content when `None`.
    pub template_format: Option<TemplateFormat>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            blank_msgstr: false,
            duplicate_style: DuplicateStyle::default(),
            fields: TranslatableField::ALL.to_vec(),
            input_name: "input".to_string(),
            template_name: "template".to_string(),
            template_format: None,
        }
    }
}

impl ConvertOptions {
    /// Sets the blank translations flag.
    pub fn with_blank_msgstr(mut self, blank: bool) -> Self {
        self.blank_msgstr = blank;
        self
    }

    /// Sets the duplicate style.
    pub fn with_duplicate_style(mut self, style: DuplicateStyle) -> Self {
        self.duplicate_style = style;
        self
    }

    /// Sets the extracted fields.
    pub fn with_fields(mut self, fields: Vec<TranslatableField>) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the input name.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    /// Sets the template name.
    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    /// Forces the template format.
    pub fn with_template_format(mut self, format: TemplateFormat) -> Self {
        self.template_format = Some(format);
        self
    }
}

/// Converts calendars to PO catalogs.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
    extractor: FieldExtractor,
}

impl Converter {
    /// Creates a converter.
    pub fn new(options: ConvertOptions) -> Self {
        let extractor = FieldExtractor::new(options.fields.clone());
        Self { options, extractor }
    }

    /// Returns the conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Builds the catalog for `input`, merged against `template` if given.
    ///
    /// Both documents are fully parsed before anything is merged.
    pub fn build_catalog(&self, input: &str, template: Option<&str>) -> ConvertResult<Catalog> {
        let document = parse_calendar(input)?;

        let Some(template) = template else {
            let entries = reconcile(
                self.extractor.extract_document(&document),
                self.options.duplicate_style,
            );
            return Ok(Catalog::new(entries)
                .with_note(format!("extracted from {}", self.options.input_name)));
        };

        let format = self
            .options
            .template_format
            .unwrap_or_else(|| TemplateFormat::detect(template));
        debug!(%format, "Merging against template");

        match format {
            TemplateFormat::Calendar => {
                let source = parse_calendar(template).map_err(|e| {
                    ConvertError::template(format!("{}: {}", self.options.template_name, e))
                })?;
                let translations = LocationIndex::from_units(
                    self.extractor.extract_document(&document),
                );
                let note = format!(
                    "extracted from {}, {}",
                    self.options.template_name, self.options.input_name
                );
                Ok(self.merged_catalog(&source, &translations, note))
            }
            TemplateFormat::Catalog => {
                let translations = parse_template(template)?;
                let note = format!("extracted from {}", self.options.input_name);
                Ok(self.merged_catalog(&document, &translations, note))
            }
        }
    }

    fn merged_catalog(
        &self,
        source: &CalendarDocument,
        translations: &dyn TranslationSource,
        note: String,
    ) -> Catalog {
        let mut entries = reconcile(
            self.extractor.extract_document(source),
            self.options.duplicate_style,
        );
        merge_translations(
            &mut entries,
            Some(translations),
            MergeOptions {
                blank_msgstr: self.options.blank_msgstr,
            },
        );
        Catalog::new(entries).with_note(note)
    }

    /// Converts `input` to PO text written to `output`.
    ///
    /// Returns the number of entries written. Zero means there was nothing
    /// to translate, in which case nothing at all is written.
    pub fn run<R, W, T>(&self, input: R, output: W, template: Option<T>) -> ConvertResult<usize>
    where
        R: Read,
        W: Write,
        T: Read,
    {
        let input = read_text(input, "input")?;
        let template = template
            .map(|reader| {
                read_text(reader, "template").map_err(|e| match e {
                    ConvertError::Encoding { .. } => ConvertError::template(e.to_string()),
                    other => other,
                })
            })
            .transpose()?;

        let catalog = self.build_catalog(&input, template.as_deref())?;
        if catalog.is_empty() {
            info!(input = %self.options.input_name, "Nothing to translate");
            return Ok(0);
        }

        write_catalog(&catalog, output)?;
        info!(
            input = %self.options.input_name,
            entries = catalog.len(),
            translated = catalog.translated_count(),
            "Wrote catalog"
        );
        Ok(catalog.len())
    }
}

/// Converts an iCalendar stream to a PO catalog.
///
/// `duplicate_style` is one of `msgctxt`, `merge` or `msgid_comment`.
/// Returns the number of entries written; zero means nothing to translate.
pub fn convert_ical<R, W, T>(
    input: R,
    output: W,
    template: Option<T>,
    blank_msgstr: bool,
    duplicate_style: &str,
) -> ConvertResult<usize>
where
    R: Read,
    W: Write,
    T: Read,
{
    let options = ConvertOptions::default()
        .with_blank_msgstr(blank_msgstr)
        .with_duplicate_style(duplicate_style.parse()?);
    Converter::new(options).run(input, output, template)
}

fn read_text<R: Read>(mut reader: R, what: &'static str) -> ConvertResult<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes).map_err(|source| ConvertError::Encoding { what, source })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
