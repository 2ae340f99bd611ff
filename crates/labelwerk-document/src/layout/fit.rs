// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive code-text fitting.
//
// Registration codes vary in length by vendor, and the label is tiny. The code
// is fitted into the available width by an ordered chain of attempts; the first
// attempt that fits wins and later attempts never run:
//
//   1. single line at 7 pt
//   2. single line at 6 pt
//   3. two lines at 6 pt, split at (or near) the midpoint
//   4. single truncated line at 6 pt with an ellipsis marker
//
// The last step always succeeds, so fitting never fails.

use tracing::debug;

use super::metrics::text_width;

/// Font size of the first attempt.
pub const PRIMARY_FONT_SIZE: f32 = 7.0;
/// Font size of every later attempt.
pub const REDUCED_FONT_SIZE: f32 = 6.0;
/// Appended to a truncated code.
pub const ELLIPSIS: &str = "...";
/// Characters held back from the proportional truncation budget.
const TRUNCATION_RESERVE: usize = 3;
/// How far either side of the midpoint a natural break is searched for.
const BREAK_WINDOW: usize = 2;

/// Which step of the chain produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStrategy {
    FullSize,
    Reduced,
    Split,
    Truncated,
}

/// Code text ready to place on the label.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedText {
    /// One line holding the complete code.
    Single { text: String, font_size: f32 },
    /// The complete code across two stacked lines; `first + second` is the code.
    Split {
        first: String,
        second: String,
        font_size: f32,
    },
    /// A prefix of the code followed by [`ELLIPSIS`].
    Truncated { text: String, font_size: f32 },
}

impl FittedText {
    pub fn strategy(&self) -> FitStrategy {
        match self {
            Self::Single { font_size, .. } if *font_size >= PRIMARY_FONT_SIZE => {
                FitStrategy::FullSize
            }
            Self::Single { .. } => FitStrategy::Reduced,
            Self::Split { .. } => FitStrategy::Split,
            Self::Truncated { .. } => FitStrategy::Truncated,
        }
    }

    pub fn font_size(&self) -> f32 {
        match self {
            Self::Single { font_size, .. }
            | Self::Split { font_size, .. }
            | Self::Truncated { font_size, .. } => *font_size,
        }
    }

    /// Lines top to bottom.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Single { text, .. } | Self::Truncated { text, .. } => vec![text.as_str()],
            Self::Split { first, second, .. } => vec![first.as_str(), second.as_str()],
        }
    }
}

type Attempt = fn(&str, f32) -> Option<FittedText>;

/// Fitting attempts in order of preference. Truncation is the terminal
/// fallback and is not in this list.
const ATTEMPTS: [(FitStrategy, Attempt); 3] = [
    (FitStrategy::FullSize, fit_primary),
    (FitStrategy::Reduced, fit_reduced),
    (FitStrategy::Split, fit_split),
];

/// Fit `code` into `available_width` points.
pub fn fit_code(code: &str, available_width: f32) -> FittedText {
    for (strategy, attempt) in ATTEMPTS {
        if let Some(fitted) = attempt(code, available_width) {
            debug!(?strategy, available_width, "code text fitted");
            return fitted;
        }
    }
    let fitted = truncate(code, available_width);
    if let FittedText::Truncated { text, .. } = &fitted {
        debug!(available_width, shown = %text, "code text truncated");
    }
    fitted
}

fn fits(text: &str, font_size: f32, available_width: f32) -> bool {
    text_width(text, font_size) <= available_width
}

fn fit_single(code: &str, font_size: f32, available_width: f32) -> Option<FittedText> {
    fits(code, font_size, available_width).then(|| FittedText::Single {
        text: code.to_owned(),
        font_size,
    })
}

fn fit_primary(code: &str, available_width: f32) -> Option<FittedText> {
    fit_single(code, PRIMARY_FONT_SIZE, available_width)
}

fn fit_reduced(code: &str, available_width: f32) -> Option<FittedText> {
    fit_single(code, REDUCED_FONT_SIZE, available_width)
}

fn fit_split(code: &str, available_width: f32) -> Option<FittedText> {
    let at = split_point(code);
    let (first, second) = split_at_char(code, at);
    (fits(first, REDUCED_FONT_SIZE, available_width)
        && fits(second, REDUCED_FONT_SIZE, available_width))
    .then(|| FittedText::Split {
        first: first.to_owned(),
        second: second.to_owned(),
        font_size: REDUCED_FONT_SIZE,
    })
}

/// Character index at which to break `code` across two lines.
///
/// Starts from the midpoint and scans `mid - 2 ..= mid + 2` for the first
/// interior index next to a non-alphanumeric character (before or at the
/// index). Falls back to the exact midpoint.
pub fn split_point(code: &str) -> usize {
    let chars: Vec<char> = code.chars().collect();
    let len = chars.len();
    let mid = len / 2;

    let lo = mid.saturating_sub(BREAK_WINDOW);
    (lo..=mid + BREAK_WINDOW)
        .filter(|&i| i > 0 && i < len)
        .find(|&i| !chars[i - 1].is_alphanumeric() || !chars[i].is_alphanumeric())
        .unwrap_or(mid)
}

/// Split at a character (not byte) index.
fn split_at_char(text: &str, index: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(index)
        .map_or(text.len(), |(byte, _)| byte);
    text.split_at(byte)
}

/// Last resort: keep a proportional prefix and mark it with an ellipsis.
///
/// The budget is the share of the code that fits at 6 pt minus
/// [`TRUNCATION_RESERVE`]; the result is then checked by measurement and
/// shortened until it fits. When not even the bare ellipsis fits, the
/// ellipsis is still drawn so the line is never silently blank.
fn truncate(code: &str, available_width: f32) -> FittedText {
    let len = code.chars().count();
    let full_width = text_width(code, REDUCED_FONT_SIZE);

    let proportional = if full_width > 0.0 && available_width > 0.0 {
        (len as f32 * available_width / full_width).floor() as usize
    } else {
        0
    };
    let mut keep = proportional.saturating_sub(TRUNCATION_RESERVE).min(len);

    let mut text = truncated_text(code, keep);
    while keep > 0 && !fits(&text, REDUCED_FONT_SIZE, available_width) {
        keep -= 1;
        text = truncated_text(code, keep);
    }

    FittedText::Truncated {
        text,
        font_size: REDUCED_FONT_SIZE,
    }
}

fn truncated_text(code: &str, keep: usize) -> String {
    let mut text: String = code.chars().take(keep).collect();
    text.push_str(ELLIPSIS);
    text
}
