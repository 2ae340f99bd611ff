// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Helvetica-Bold advance widths (standard 14 font metrics, WinAnsi encoding).
//
// The label text is drawn with the built-in Helvetica-Bold font, which the PDF
// viewer supplies, so measuring needs nothing more than the published AFM
// widths in 1/1000 em.

/// Advance widths for ASCII 32 (space) through 126 (`~`).
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :;<=>?@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [\]^_`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {|}~
];

/// Width used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

/// Advance width of one character, in 1/1000 em.
pub fn char_units(c: char) -> u16 {
    match c as u32 {
        code @ 32..=126 => HELVETICA_BOLD_WIDTHS[(code - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` set in Helvetica-Bold at `font_size` points.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_units(c))).sum();
    units as f32 * font_size / 1000.0
}
