//! XML export for exercise records.
//!
//! The document has a single `exercises` root with one `exercice` element per
//! record. Free text (the description) and image payloads are embedded as
//! Base64 so the document never carries raw control characters or binary.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;
use wger_common::ExerciseRecord;

use crate::{ExportError, ImageStorage, Result};

/// Line break plus indent for children of an `exercice` element.
const CHILD_INDENT: &[u8] = b"\n\t\t";

/// XML exporter for exercise records.
///
/// Output is tab-indented and never uses self-closing tags. Record order is
/// kept exactly as given.
pub struct XmlExporter<S> {
    storage: S,
}

impl<S: ImageStorage> XmlExporter<S> {
    /// Create a new exporter reading image payloads from `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Export records to an XML string.
    ///
    /// Any image read failure aborts the whole export; no partial document is
    /// returned.
    pub fn export<'r, I>(&self, records: I) -> Result<String>
    where
        I: IntoIterator<Item = &'r ExerciseRecord>,
    {
        let mut output = Vec::new();
        self.write(records, &mut output)?;
        Ok(String::from_utf8(output)?)
    }

    /// Write records as XML to a writer, returning the number of records
    /// written.
    ///
    /// Output is streamed, so on error the writer may hold a truncated
    /// document. Use [`export`](Self::export) when that matters.
    pub fn write<'r, I, W>(&self, records: I, writer: W) -> Result<usize>
    where
        I: IntoIterator<Item = &'r ExerciseRecord>,
        W: Write,
    {
        let mut context = ExportContext {
            storage: &self.storage,
            writer: Writer::new_with_indent(writer, b'\t', 1),
        };

        context
            .writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| ExportError::Xml(e.to_string()))?;

        context.start(BytesStart::new("exercises"))?;

        let mut count = 0;
        for record in records {
            context.write_exercise(record)?;
            count += 1;
        }

        if count == 0 {
            context.text("")?;
        }
        context.end("exercises")?;

        context
            .writer
            .get_mut()
            .write_all(b"\n")
            .map_err(|e| ExportError::Xml(e.to_string()))?;

        debug!(records = count, "wrote exercise document");
        Ok(count)
    }
}

/// Export context holding state during XML generation.
struct ExportContext<'a, S, W: Write> {
    storage: &'a S,
    writer: Writer<W>,
}

impl<'a, S: ImageStorage, W: Write> ExportContext<'a, S, W> {
    fn write_exercise(&mut self, record: &ExerciseRecord) -> Result<()> {
        let status = record.status.code();
        let creation_date = record.creation_date_string();
        let uuid = record.uuid_hex();

        let mut elem = BytesStart::new("exercice");
        elem.push_attribute(("name", record.name.as_str()));
        elem.push_attribute(("author", record.author()));
        elem.push_attribute(("status", status));
        elem.push_attribute(("creation_date", creation_date.as_str()));
        elem.push_attribute(("category", record.category.name.as_str()));
        elem.push_attribute(("license", record.license.short_name.as_str()));
        elem.push_attribute(("language", record.language.short_name.as_str()));
        elem.push_attribute(("uuid", uuid.as_str()));

        self.start(elem)?;
        self.description(&STANDARD.encode(record.description.as_bytes()))?;

        self.write_muscles(record)?;
        self.write_equipment(record)?;
        if record.has_images() {
            self.write_images(record)?;
        }

        self.end("exercice")
    }

    fn write_muscles(&mut self, record: &ExerciseRecord) -> Result<()> {
        let main_count = record.muscles.len().to_string();
        let secondary_count = record.muscles_secondary.len().to_string();

        let mut elem = BytesStart::new("muscles");
        elem.push_attribute(("main_muscles_count", main_count.as_str()));
        elem.push_attribute(("secondary_muscles_count", secondary_count.as_str()));
        self.start(elem)?;

        let main = record.muscles.iter().map(|m| ("main", m));
        let secondary = record.muscles_secondary.iter().map(|m| ("secondary", m));
        let mut any = false;
        for (kind, muscle) in main.chain(secondary) {
            self.write_element("muscle", &[("type", kind)], &muscle.name)?;
            any = true;
        }

        if !any {
            self.text("")?;
        }
        self.end("muscles")
    }

    fn write_equipment(&mut self, record: &ExerciseRecord) -> Result<()> {
        self.start(BytesStart::new("equipments"))?;

        if record.equipment.is_empty() {
            self.text("")?;
        }
        for equipment in &record.equipment {
            self.write_element("equipment", &[], &equipment.name)?;
        }

        self.end("equipments")
    }

    fn write_images(&mut self, record: &ExerciseRecord) -> Result<()> {
        self.start(BytesStart::new("images"))?;

        for image in &record.images {
            let data = self
                .storage
                .read(&image.path)
                .map_err(|source| ExportError::Image {
                    path: image.path.clone(),
                    source,
                })?;
            let name = self.storage.file_name(&image.path);
            debug!(image = name, bytes = data.len(), "embedding image");

            let attributes = [("name", name), ("is_main", bool_str(image.is_main))];
            self.write_element("image", &attributes, &STANDARD.encode(&data))?;
        }

        self.end("images")
    }

    // Helper methods for XML writing

    fn start(&mut self, elem: BytesStart<'_>) -> Result<()> {
        self.writer
            .write_event(Event::Start(elem))
            .map_err(|e| ExportError::Xml(e.to_string()))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| ExportError::Xml(e.to_string()))
    }

    /// Text right after a start tag also keeps the matching end tag on the
    /// same line, so an empty text keeps childless elements as `<a></a>`.
    fn text(&mut self, value: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(|e| ExportError::Xml(e.to_string()))
    }

    /// The description goes on its own line at child depth. Writing it as raw
    /// bytes leaves the writer's pending line break alone, so the following
    /// `muscles` start tag is indented like any other child. Base64 never
    /// needs escaping.
    fn description(&mut self, encoded: &str) -> Result<()> {
        let out = self.writer.get_mut();
        out.write_all(CHILD_INDENT)
            .and_then(|()| out.write_all(encoded.as_bytes()))
            .map_err(|e| ExportError::Xml(e.to_string()))
    }

    fn write_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        value: &str,
    ) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.start(elem)?;
        self.text(value)?;
        self.end(name)
    }
}

/// Booleans are spelled `True` / `False` in exports.
fn bool_str(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
