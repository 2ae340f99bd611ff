// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label writer: draw a computed `LabelLayout` into a single-page PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: the page is a `Vec<Op>` operation
// list, and the document is serialised via `PdfDocument::save()`.

use ::image::DynamicImage;
use labelwerk_core::error::Result;
use labelwerk_core::types::LabelSize;
use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg,
    Point, Pt, RawImage, RawImageData, RawImageFormat, Rgb, TextItem, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::image::{Logo, QrImage};
use crate::layout::{BORDER_STROKE_PT, LabelLayout, Rect, TextRun};

/// Resolution images are declared at; placement scales from there.
const IMAGE_DPI: f32 = 300.0;
/// Grey level of the decorative border.
const BORDER_GREY: f32 = 0.83;

/// Draws labels into PDF documents.
pub struct LabelWriter {
    /// Physical page size.
    size: LabelSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl LabelWriter {
    pub fn new(size: LabelSize) -> Self {
        Self { size, title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.size.dimensions_mm();
        (Mm(w_mm), Mm(h_mm))
    }

    /// Render `layout` with its QR image and optional logo to PDF bytes.
    #[instrument(skip_all, fields(size = %self.size, lines = layout.code_lines.len()))]
    pub fn render(
        &self,
        layout: &LabelLayout,
        qr: &QrImage,
        logo: Option<&Logo>,
    ) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Registration Label");

        info!(title, "Creating label PDF");

        let mut doc = PdfDocument::new(title);
        let mut ops: Vec<Op> = Vec::new();

        push_border(&mut ops, &layout.border);

        let qr_id = doc.add_image(&raw_image(&qr.to_dynamic()));
        push_image(&mut ops, qr_id, qr.side_px(), qr.side_px(), &layout.qr);

        // The layout only reserves a logo rect when a logo was supplied, but
        // both must be present to draw.
        if let (Some(logo), Some(rect)) = (logo, layout.logo.as_ref()) {
            let logo_id = doc.add_image(&raw_image(logo.as_dynamic()));
            push_image(&mut ops, logo_id, logo.width(), logo.height(), rect);
        }

        push_text(&mut ops, &layout.caption);
        for line in &layout.code_lines {
            push_text(&mut ops, line);
        }

        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(
            bytes = output.len(),
            warnings = warnings.len(),
            "Label PDF serialised"
        );
        Ok(output)
    }
}

/// Convert to the RGB8 raw form printpdf embeds.
fn raw_image(image: &DynamicImage) -> RawImage {
    let rgb = image.to_rgb8();
    RawImage {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
        pixels: RawImageData::U8(rgb.into_raw()),
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

/// Thin light-grey rectangle outline.
fn push_border(ops: &mut Vec<Op>, rect: &Rect) {
    let corners = [
        (rect.x, rect.y),
        (rect.right(), rect.y),
        (rect.right(), rect.top()),
        (rect.x, rect.top()),
    ];
    ops.push(Op::SetOutlineColor {
        col: Color::Rgb(Rgb::new(BORDER_GREY, BORDER_GREY, BORDER_GREY, None)),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(BORDER_STROKE_PT),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: corners
                .iter()
                .map(|&(x, y)| LinePoint {
                    p: Point { x: Pt(x), y: Pt(y) },
                    bezier: false,
                })
                .collect(),
            is_closed: true,
        },
    });
}

/// Place an image of `px_w` x `px_h` pixels so it exactly covers `rect`.
fn push_image(ops: &mut Vec<Op>, id: XObjectId, px_w: u32, px_h: u32, rect: &Rect) {
    // Native size at IMAGE_DPI, in points.
    let native_w = px_w as f32 / IMAGE_DPI * 72.0;
    let native_h = px_h as f32 / IMAGE_DPI * 72.0;

    ops.push(Op::UseXobject {
        id,
        transform: XObjectTransform {
            translate_x: Some(Pt(rect.x)),
            translate_y: Some(Pt(rect.y)),
            scale_x: Some(rect.width / native_w),
            scale_y: Some(rect.height / native_h),
            dpi: Some(IMAGE_DPI),
            rotate: None,
        },
    });
}

fn push_text(ops: &mut Vec<Op>, run: &TextRun) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(run.x),
            y: Pt(run.y),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(run.font_size),
        font: BuiltinFont::HelveticaBold,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(run.text.clone())],
        font: BuiltinFont::HelveticaBold,
    });
    ops.push(Op::EndTextSection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::LabelInspector;
    use labelwerk_core::types::RegistrationCode;

    fn render(code: &str, logo: Option<&Logo>) -> Vec<u8> {
        let size = LabelSize::default();
        let code = RegistrationCode::new(code);
        let layout = LabelLayout::compute(size, &code, logo.map(Logo::aspect_ratio));
        let qr = QrImage::generate(code.as_str()).unwrap();
        LabelWriter::new(size).render(&layout, &qr, logo).unwrap()
    }

    #[test]
    fn output_is_a_pdf() {
        let bytes = render("R57NX98AAFC62AF2A", None);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn single_page_at_label_size() {
        let bytes = render("R57NX98AAFC62AF2A", None);
        let inspector = LabelInspector::from_bytes(&bytes).unwrap();
        assert_eq!(inspector.page_count(), 1);
        let (w, h) = inspector.page_size_pt(1).unwrap();
        assert!((w - 189.0).abs() < 0.5, "width {w}");
        assert!((h - 72.0).abs() < 0.5, "height {h}");
    }

    #[test]
    fn draws_caption_and_code() {
        let bytes = render("R57NX98AAFC62AF2A", None);
        let text = LabelInspector::from_bytes(&bytes)
            .unwrap()
            .page_text(1)
            .unwrap();
        assert!(text.iter().any(|t| t == "Registration Code"));
        assert!(text.iter().any(|t| t == "R57NX98AAFC62AF2A"));
    }

    #[test]
    fn logo_adds_an_image() {
        let logo = Logo::from_dynamic(DynamicImage::new_rgb8(120, 50));
        let without = render("R57NX98AAFC62AF2A", None);
        let with = render("R57NX98AAFC62AF2A", Some(&logo));
        assert!(with.len() > without.len());
    }
}
