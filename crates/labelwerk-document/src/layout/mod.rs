// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label layout: where everything goes on the page.
//
// All coordinates are PDF points with the origin at the bottom-left corner of
// the page. The layout is a pure function of the label size, the code, and the
// logo's aspect ratio, so identical inputs always give identical output.

pub mod fit;
pub mod metrics;

use labelwerk_core::types::{LabelSize, POINTS_PER_INCH, RegistrationCode};
use tracing::{debug, instrument};

use fit::{FitStrategy, FittedText, fit_code};

/// Inset of content from the page edge.
pub const MARGIN_PT: f32 = 0.1 * POINTS_PER_INCH;
/// Inset of the decorative border.
pub const BORDER_INSET_PT: f32 = 2.0;
/// Stroke width of the border.
pub const BORDER_STROKE_PT: f32 = 0.5;
/// Largest side the QR square may have.
pub const QR_MAX_SIDE_PT: f32 = 0.75 * POINTS_PER_INCH;
/// Logo bounding box (width, height).
pub const LOGO_BOX_PT: (f32, f32) = (0.6 * POINTS_PER_INCH, 0.25 * POINTS_PER_INCH);
/// Horizontal gap between the QR square and the text column.
pub const TEXT_GAP_PT: f32 = 0.1 * POINTS_PER_INCH;
/// Extra space kept clear at the right of the text column.
pub const TEXT_RIGHT_BUFFER_PT: f32 = 0.05 * POINTS_PER_INCH;
/// Caption above the code.
pub const CAPTION: &str = "Registration Code";
pub const CAPTION_FONT_SIZE: f32 = 9.0;
/// Caption baseline as a fraction of page height.
pub const CAPTION_HEIGHT_RATIO: f32 = 0.4;
/// Code baseline as a fraction of page height.
pub const CODE_HEIGHT_RATIO: f32 = 0.25;
/// Offset of each line from the code baseline when the code is split.
pub const SPLIT_LINE_OFFSET_PT: f32 = 0.05 * POINTS_PER_INCH;

/// Axis-aligned rectangle in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// One line of text at a baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Every position and size needed to draw one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub border: Rect,
    pub qr: Rect,
    /// Present only when a logo is available.
    pub logo: Option<Rect>,
    pub caption: TextRun,
    pub code_fit: FittedText,
    pub code_lines: Vec<TextRun>,
    pub text_x: f32,
    pub available_text_width: f32,
}

impl LabelLayout {
    /// Lay out a label.
    ///
    /// `logo_aspect` is the logo's width / height, or `None` when there is no
    /// logo to draw.
    #[instrument(skip_all, fields(code_len = code.char_len(), size = %size))]
    pub fn compute(size: LabelSize, code: &RegistrationCode, logo_aspect: Option<f32>) -> Self {
        let (page_width, page_height) = size.dimensions_pt();

        let border = Rect {
            x: BORDER_INSET_PT,
            y: BORDER_INSET_PT,
            width: page_width - 2.0 * BORDER_INSET_PT,
            height: page_height - 2.0 * BORDER_INSET_PT,
        };

        let qr_side = (page_height - 2.0 * MARGIN_PT).min(QR_MAX_SIDE_PT);
        let qr = Rect {
            x: MARGIN_PT,
            y: (page_height - qr_side) / 2.0,
            width: qr_side,
            height: qr_side,
        };

        let logo = logo_aspect.map(|aspect| logo_rect(page_width, page_height, aspect));

        let text_x = qr.right() + TEXT_GAP_PT;
        let available_text_width = page_width - text_x - MARGIN_PT - TEXT_RIGHT_BUFFER_PT;

        let caption = TextRun {
            text: CAPTION.to_owned(),
            x: text_x,
            y: page_height * CAPTION_HEIGHT_RATIO,
            font_size: CAPTION_FONT_SIZE,
        };

        let code_y = page_height * CODE_HEIGHT_RATIO;
        let code_fit = fit_code(code.as_str(), available_text_width);
        let font_size = code_fit.font_size();
        let code_lines = match &code_fit {
            FittedText::Split { first, second, .. } => vec![
                TextRun {
                    text: first.clone(),
                    x: text_x,
                    y: code_y + SPLIT_LINE_OFFSET_PT,
                    font_size,
                },
                TextRun {
                    text: second.clone(),
                    x: text_x,
                    y: code_y - SPLIT_LINE_OFFSET_PT,
                    font_size,
                },
            ],
            FittedText::Single { text, .. } | FittedText::Truncated { text, .. } => {
                vec![TextRun {
                    text: text.clone(),
                    x: text_x,
                    y: code_y,
                    font_size,
                }]
            }
        };

        debug!(
            page_width,
            page_height,
            qr_side,
            text_x,
            available_text_width,
            strategy = ?code_fit.strategy(),
            "label layout computed"
        );

        Self {
            page_width,
            page_height,
            border,
            qr,
            logo,
            caption,
            code_fit,
            code_lines,
            text_x,
            available_text_width,
        }
    }

    pub fn fit_strategy(&self) -> FitStrategy {
        self.code_fit.strategy()
    }
}

/// Fit a logo of the given aspect ratio into the top-right logo box,
/// preserving aspect ratio and centring it in the box.
fn logo_rect(page_width: f32, page_height: f32, aspect: f32) -> Rect {
    let (box_w, box_h) = LOGO_BOX_PT;
    let box_x = page_width - MARGIN_PT - box_w;
    let box_y = page_height - MARGIN_PT - box_h;

    let (width, height) = if !aspect.is_finite() || aspect <= 0.0 {
        (box_w, box_h)
    } else if aspect > box_w / box_h {
        (box_w, box_w / aspect)
    } else {
        (box_h * aspect, box_h)
    };

    Rect {
        x: box_x + (box_w - width) / 2.0,
        y: box_y + (box_h - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn default_layout(code: &str) -> LabelLayout {
        LabelLayout::compute(LabelSize::default(), &RegistrationCode::new(code), None)
    }

    #[test]
    fn default_label_geometry() {
        let layout = default_layout("R57NX98AAFC62AF2A");
        assert!(approx(layout.page_width, 189.0));
        assert!(approx(layout.page_height, 72.0));
        // QR capped at 0.75" and vertically centred.
        assert!(approx(layout.qr.width, 54.0));
        assert!(approx(layout.qr.x, 7.2));
        assert!(approx(layout.qr.y, 9.0));
        assert!(approx(layout.text_x, 68.4));
        assert!(approx(layout.available_text_width, 109.8));
        assert!(approx(layout.caption.y, 28.8));
        assert!(approx(layout.border.width, 185.0));
    }

    #[test]
    fn qr_shrinks_on_short_labels() {
        let size = LabelSize::new(2.625, 0.5).unwrap();
        let layout = LabelLayout::compute(size, &RegistrationCode::new("R57NX98AAFC62AF2A"), None);
        // 36pt page minus two 7.2pt margins.
        assert!(approx(layout.qr.width, 21.6));
        assert!(approx(layout.qr.y, 7.2));
    }

    #[test]
    fn fitting_code_is_one_full_line() {
        let layout = default_layout("R57NX98AAFC62AF2A");
        assert_eq!(layout.fit_strategy(), FitStrategy::FullSize);
        assert_eq!(layout.code_lines.len(), 1);
        assert_eq!(layout.code_lines[0].text, "R57NX98AAFC62AF2A");
        assert!(approx(layout.code_lines[0].y, 18.0));
    }

    #[test]
    fn split_lines_straddle_code_baseline() {
        let code = "ABCD1234".repeat(5);
        let layout = default_layout(&code);
        assert_eq!(layout.fit_strategy(), FitStrategy::Split);
        assert_eq!(layout.code_lines.len(), 2);
        assert!(approx(layout.code_lines[0].y, 21.6));
        assert!(approx(layout.code_lines[1].y, 14.4));
        let joined: String = layout.code_lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(joined, code);
    }

    #[test]
    fn wide_logo_fills_box_width() {
        let layout = LabelLayout::compute(
            LabelSize::default(),
            &RegistrationCode::new("R57NX98AAFC62AF2A"),
            Some(4.0),
        );
        let logo = layout.logo.expect("logo rect");
        assert!(approx(logo.width, 43.2));
        assert!(approx(logo.height, 10.8));
        assert!(approx(logo.right(), 189.0 - 7.2));
        // Centred vertically in the 18pt box whose top is at 64.8.
        assert!(approx(logo.top(), 64.8 - (18.0 - 10.8) / 2.0));
    }

    #[test]
    fn tall_logo_fills_box_height() {
        let rect = logo_rect(189.0, 72.0, 1.0);
        assert!(approx(rect.height, 18.0));
        assert!(approx(rect.width, 18.0));
        assert!(approx(rect.x, 189.0 - 7.2 - 43.2 + (43.2 - 18.0) / 2.0));
    }

    #[test]
    fn no_logo_no_rect() {
        assert!(default_layout("R57NX98AAFC62AF2A").logo.is_none());
    }

    #[test]
    fn layout_is_deterministic() {
        let code = "W".repeat(60);
        assert_eq!(default_layout(&code), default_layout(&code));
    }
}
