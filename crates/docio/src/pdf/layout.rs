//! Reading-order reconstruction from positioned text runs.
//!
//! Pdfium reports characters in drawing order, which is often not reading
//! order: generators draw tables column by column, headers last, or whole
//! columns out of sequence. This module rebuilds the page text from geometry
//! alone:
//!
//! 1. runs are grouped into lines by baseline (within `line_tolerance`)
//! 2. lines are ordered top to bottom, runs within a line left to right
//! 3. a vertical gutter that no line crosses splits the page into columns,
//!    which are read one after the other (recursively, so three-column
//!    pages work too); lines spanning the gutter stay where they are
//!
//! In `auto` mode a gutter only splits the page when the two sides do not
//! behave like table cells: sides whose baselines line up and whose lines are
//! short are kept together, so table rows come out on one line.

use crate::core::config::{ColumnDetection, PdfConfig};

/// Gap between two runs, relative to the font size, that reads as a space.
const SPACE_GAP_RATIO: f32 = 0.15;

/// Median characters per line from which a column side reads as prose.
const PROSE_MIN_CHARS: usize = 20;

/// Fraction of aligned baselines from which two sides read as table rows.
const TABLE_ALIGNMENT: f32 = 0.5;

/// A piece of text drawn at one position, in user space (points, y up).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
}

impl TextRun {
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width: width.max(0.0),
            font_size,
        }
    }

    fn end(&self) -> f32 {
        self.x + self.width
    }

    fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone)]
struct Line {
    y: f32,
    runs: Vec<TextRun>,
}

impl Line {
    fn text(&self) -> String {
        let mut out = String::new();
        let mut previous: Option<(f32, f32)> = None;

        for run in &self.runs {
            if let Some((end, font_size)) = previous {
                let gap = run.x - end;
                let threshold = font_size.max(run.font_size).max(1.0) * SPACE_GAP_RATIO;
                if gap > threshold && !out.ends_with(char::is_whitespace) && !run.text.starts_with(char::is_whitespace)
                {
                    out.push(' ');
                }
            }
            out.push_str(&run.text);
            let end = previous.map_or(run.end(), |(end, _)| end.max(run.end()));
            previous = Some((end, run.font_size));
        }

        out.trim_end().to_string()
    }

    fn char_count(&self) -> usize {
        self.runs.iter().map(|run| run.text.chars().count()).sum()
    }
}

/// Rebuild the text of one page from its runs.
///
/// Lines are joined with `\n`. A page without visible text yields an empty
/// string.
pub fn layout_page(runs: Vec<TextRun>, config: &PdfConfig) -> String {
    let lines = group_lines(runs, config.line_tolerance);
    order_lines(lines, config)
        .iter()
        .map(Line::text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn group_lines(runs: Vec<TextRun>, tolerance: f32) -> Vec<Line> {
    let mut runs: Vec<TextRun> = runs.into_iter().filter(|run| !run.text.trim().is_empty()).collect();
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Line> = Vec::new();
    for run in runs {
        match lines.last_mut() {
            Some(line) if (line.y - run.y).abs() <= tolerance => line.runs.push(run),
            _ => lines.push(Line { y: run.y, runs: vec![run] }),
        }
    }

    for line in &mut lines {
        line.runs.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    lines
}

/// Widest vertical band, strictly inside the text area, crossed by at most a
/// fifth of the lines.
fn find_gutter(lines: &[Line], min_width: f32) -> Option<(f32, f32)> {
    let mut edges: Vec<f32> = lines
        .iter()
        .flat_map(|line| line.runs.iter().flat_map(|run| [run.x, run.end()]))
        .collect();
    edges.sort_by(f32::total_cmp);
    edges.dedup();

    let (first, last) = (*edges.first()?, *edges.last()?);
    let allowed = lines.len() / 5;

    let mut best: Option<(f32, f32)> = None;
    let mut open: Option<f32> = None;

    for pair in edges.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let mid = (start + end) / 2.0;
        let crossing = lines
            .iter()
            .filter(|line| line.runs.iter().any(|run| run.x <= mid && mid <= run.end()))
            .count();

        if crossing <= allowed {
            if open.is_none() {
                open = Some(start);
            }
            continue;
        }

        if let Some(band_start) = open.take() {
            let band = (band_start, start);
            let interior = band.0 > first && band.1 < last;
            let wide_enough = band.1 - band.0 >= min_width;
            let wider = best.is_none_or(|(s, e)| band.1 - band.0 > e - s);
            if interior && wide_enough && wider {
                best = Some(band);
            }
        }
    }

    best
}

enum Split {
    Spanning(Line),
    Sides(Option<Line>, Option<Line>),
}

fn split_line(line: &Line, gutter: (f32, f32)) -> Split {
    if line.runs.iter().any(|run| run.x <= gutter.0 && run.end() >= gutter.1) {
        return Split::Spanning(line.clone());
    }

    let center = (gutter.0 + gutter.1) / 2.0;
    let (left, right): (Vec<TextRun>, Vec<TextRun>) = line.runs.iter().cloned().partition(|run| run.center() < center);
    let side = |runs: Vec<TextRun>| (!runs.is_empty()).then_some(Line { y: line.y, runs });
    Split::Sides(side(left), side(right))
}

fn is_prose(lines: &[&Line]) -> bool {
    let mut counts: Vec<usize> = lines.iter().map(|line| line.char_count()).collect();
    counts.sort_unstable();
    counts.get(counts.len() / 2).is_some_and(|&median| median >= PROSE_MIN_CHARS)
}

fn baseline_alignment(left: &[&Line], right: &[&Line], tolerance: f32) -> f32 {
    let (small, large) = if left.len() <= right.len() { (left, right) } else { (right, left) };
    if small.is_empty() {
        return 0.0;
    }
    let aligned = small
        .iter()
        .filter(|line| large.iter().any(|other| (other.y - line.y).abs() <= tolerance))
        .count();
    aligned as f32 / small.len() as f32
}

fn is_column_split(splits: &[Split], config: &PdfConfig) -> bool {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for split in splits {
        if let Split::Sides(l, r) = split {
            left.extend(l.iter());
            right.extend(r.iter());
        }
    }

    let min_lines = config.min_column_lines.max(1);
    if left.len() < min_lines || right.len() < min_lines {
        return false;
    }

    match config.column_detection {
        ColumnDetection::Never => false,
        ColumnDetection::Always => true,
        ColumnDetection::Auto => {
            baseline_alignment(&left, &right, config.line_tolerance) < TABLE_ALIGNMENT
                || (is_prose(&left) && is_prose(&right))
        }
    }
}

fn order_lines(lines: Vec<Line>, config: &PdfConfig) -> Vec<Line> {
    if config.column_detection == ColumnDetection::Never || lines.len() < 2 {
        return lines;
    }
    let Some(gutter) = find_gutter(&lines, config.min_gutter_width) else {
        return lines;
    };

    let splits: Vec<Split> = lines.iter().map(|line| split_line(line, gutter)).collect();
    if !is_column_split(&splits, config) {
        return lines;
    }

    let mut ordered = Vec::with_capacity(lines.len());
    let mut left = Vec::new();
    let mut right = Vec::new();

    for split in splits {
        match split {
            Split::Spanning(line) => {
                ordered.extend(order_lines(std::mem::take(&mut left), config));
                ordered.extend(order_lines(std::mem::take(&mut right), config));
                ordered.push(line);
            }
            Split::Sides(l, r) => {
                left.extend(l);
                right.extend(r);
            }
        }
    }
    ordered.extend(order_lines(left, config));
    ordered.extend(order_lines(right, config));
    ordered
}
