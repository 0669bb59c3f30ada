//! Minimal PDF writer for the improved resume: Type1 Helvetica, one line per text object.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::font_metrics::{wrap_text, HELVETICA};
use super::{ExportError, ResumeExporter};

const MM_TO_PT: f32 = 72.0 / 25.4;

/// Page geometry in points. Defaults to A4 portrait, 15 mm margins, 11 pt Helvetica.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
    pub font_size_pt: f32,
    pub line_height_factor: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width_pt: 595.28,
            height_pt: 841.89,
            margin_pt: 15.0 * MM_TO_PT,
            font_size_pt: 11.0,
            line_height_factor: 1.15,
        }
    }
}

impl PageLayout {
    /// Usable line width in em units at the configured font size.
    pub fn text_width_em(&self) -> f32 {
        (self.width_pt - 2.0 * self.margin_pt) / self.font_size_pt
    }

    pub fn leading_pt(&self) -> f32 {
        self.font_size_pt * self.line_height_factor
    }

    /// Baselines that fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.height_pt - 2.0 * self.margin_pt;
        ((usable / self.leading_pt()).floor() as usize + 1).max(1)
    }
}

/// Exports text as a word-wrapped, paginated PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfResumeExporter {
    layout: PageLayout,
}

impl PdfResumeExporter {
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let lines = wrap_text(text, &HELVETICA, self.layout.text_width_em());
        let pages: Vec<Vec<String>> = lines
            .chunks(self.layout.lines_per_page())
            .map(|chunk| chunk.to_vec())
            .collect();
        if pages.is_empty() {
            vec![Vec::new()]
        } else {
            pages
        }
    }
}

impl ResumeExporter for PdfResumeExporter {
    fn export(&self, text: &str) -> Result<Vec<u8>, ExportError> {
        write_pages(&self.paginate(text), &self.layout)
    }
}

/// Writes pre-wrapped lines, one inner `Vec` per page. An empty slice yields a
/// valid document with no pages.
pub fn write_pages(pages: &[Vec<String>], layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let page_id = write_page(&mut doc, pages_id, resources_id, lines, layout)?;
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        layout.width_pt.into(),
        layout.height_pt.into(),
    ];
    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Failed(format!("Failed to write PDF: {e}")))?;
    Ok(buffer)
}

fn write_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    lines: &[String],
    layout: &PageLayout,
) -> Result<ObjectId, ExportError> {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    let mut baseline = layout.height_pt - layout.margin_pt;
    for line in lines {
        if !line.is_empty() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec!["F1".into(), layout.font_size_pt.into()],
            ));
            operations.push(Operation::new(
                "Td",
                vec![layout.margin_pt.into(), baseline.into()],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(line))],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        baseline -= layout.leading_pt();
    }

    let encoded = Content { operations }
        .encode()
        .map_err(|e| ExportError::Failed(format!("Failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    }))
}

/// Maps text onto WinAnsiEncoding. Characters outside it become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (' '..='~').contains(&c) => c as u8,
            c if ('\u{A0}'..='\u{FF}').contains(&c) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
