//! Single-page PDF surface built on `lopdf`.
//!
//! PDF user space already has its origin bottom-left with y up, so page
//! coordinates pass through unchanged. Labels use the base-14 Helvetica font
//! and are centred with the static widths in [`super::metrics`].

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::config::StrokeConfig;
use crate::error::{RenderError, RenderResult};
use crate::glyph::{Caption, Segment};
use crate::render::{Surface, metrics};

const FONT_RESOURCE: &str = "F1";

/// Accumulates content-stream operations for one page.
#[derive(Debug)]
pub struct PdfSurface {
    width: f64,
    height: f64,
    operations: Vec<Operation>,
    /// Stroke currently set in the graphics state, to avoid re-emitting it per segment.
    current_stroke: Option<StrokeConfig>,
}

impl PdfSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            operations: Vec::new(),
            current_stroke: None,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn set_stroke(&mut self, stroke: &StrokeConfig) {
        if self.current_stroke.as_ref() == Some(stroke) {
            return;
        }
        let (r, g, b) = stroke.rgb();
        self.op("w", vec![real(stroke.width)]);
        self.op("J", vec![1.into()]);
        self.op("RG", vec![real(r), real(g), real(b)]);
        let dash: Vec<Object> = stroke.dash.iter().map(|d| real(*d)).collect();
        self.op("d", vec![Object::Array(dash), 0.into()]);
        self.current_stroke = Some(stroke.clone());
    }

    fn build_document(&self) -> RenderResult<Document> {
        let content = Content {
            operations: self.operations.clone(),
        };
        let encoded = content.encode().map_err(|e| RenderError::Encode {
            format: "pdf",
            message: e.to_string(),
        })?;

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
                FONT_RESOURCE => font_id,
            },
        });
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), real(self.width), real(self.height)],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();
        Ok(doc)
    }
}

impl Surface for PdfSurface {
    fn draw_segment(&mut self, segment: &Segment, stroke: &StrokeConfig) {
        self.set_stroke(stroke);
        self.op("m", vec![real(segment.x1), real(segment.y1)]);
        self.op("l", vec![real(segment.x2), real(segment.y2)]);
        self.op("S", vec![]);
    }

    fn draw_label(&mut self, caption: &Caption) {
        let half = metrics::text_width(&caption.text, caption.font_size) / 2.0;
        self.op("BT", vec![]);
        self.op("Tf", vec![FONT_RESOURCE.into(), real(caption.font_size)]);
        self.op(
            "Td",
            vec![real(caption.anchor.x - half), real(caption.anchor.baseline)],
        );
        self.op("Tj", vec![Object::string_literal(win_ansi(&caption.text))]);
        self.op("ET", vec![]);
    }

    fn encode(&mut self) -> RenderResult<Vec<u8>> {
        let mut doc = self.build_document()?;
        let mut buf = Vec::new();
        doc.save_to(&mut buf).map_err(|e| RenderError::Encode {
            format: "pdf",
            message: e.to_string(),
        })?;
        Ok(buf)
    }
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

/// Latin-1 subset of WinAnsi; anything else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Position;

    fn operators(s: &PdfSurface) -> Vec<&str> {
        s.operations().iter().map(|o| o.operator.as_str()).collect()
    }

    #[test]
    fn segment_emits_path_ops() {
        let mut s = PdfSurface::new(612.0, 792.0);
        s.draw_segment(&Segment::new(10.0, 20.0, 30.0, 40.0), &StrokeConfig::default());
        assert_eq!(operators(&s), vec!["w", "J", "RG", "d", "m", "l", "S"]);
    }

    #[test]
    fn stroke_state_emitted_once() {
        let mut s = PdfSurface::new(612.0, 792.0);
        let stroke = StrokeConfig::default();
        s.draw_segment(&Segment::new(0.0, 0.0, 1.0, 1.0), &stroke);
        s.draw_segment(&Segment::new(1.0, 1.0, 2.0, 2.0), &stroke);
        let widths = operators(&s).iter().filter(|op| **op == "w").count();
        assert_eq!(widths, 1);
    }

    #[test]
    fn label_is_centred_on_anchor() {
        let mut s = PdfSurface::new(612.0, 792.0);
        s.draw_label(&Caption {
            text: "M".into(),
            anchor: Position::new(100.0, 50.0),
            font_size: 10.0,
        });
        assert_eq!(operators(&s), vec!["BT", "Tf", "Td", "Tj", "ET"]);
        let td = &s.operations()[2];
        // "M" is 833/1000 em wide: 8.33 at size 10, so the text starts 4.165 left.
        match td.operands[0] {
            Object::Real(x) => assert!((f64::from(x) - 95.835).abs() < 1e-3),
            ref other => panic!("unexpected operand {other:?}"),
        }
    }

    #[test]
    fn encodes_a_pdf_document() {
        let mut s = PdfSurface::new(612.0, 792.0);
        s.draw_segment(&Segment::new(10.0, 20.0, 30.0, 40.0), &StrokeConfig::default());
        s.draw_label(&Caption {
            text: "A".into(),
            anchor: Position::new(30.0, 10.0),
            font_size: 10.0,
        });
        let bytes = s.encode().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(win_ansi("AÑ"), vec![b'A', 0xD1]);
        assert_eq!(win_ansi("Ω"), vec![b'?']);
    }
}
