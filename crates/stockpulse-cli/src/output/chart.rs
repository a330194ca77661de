//! Text line chart for closing prices.

use super::format_price;

pub const DEFAULT_HEIGHT: usize = 8;

const POINT: char = '●';
const STEM: char = '│';

/// Plot `values` into at most `width` columns and `height` rows.
///
/// The top and bottom rows carry the maximum and minimum as axis labels. Long
/// series are sampled evenly, always keeping the first and last value. A
/// flat series sits on the middle row.
pub fn line_chart(values: &[f64], width: usize, height: usize) -> Vec<String> {
    if values.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let points = sample(values, width);
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(*value), max.max(*value))
        });
    let span = max - min;
    let levels: Vec<usize> = points
        .iter()
        .map(|value| {
            if span == 0.0 {
                height / 2
            } else {
                (((value - min) / span) * (height - 1) as f64).round() as usize
            }
        })
        .collect();

    let top_label = format_price(max);
    let bottom_label = format_price(min);
    let label_width = top_label.chars().count().max(bottom_label.chars().count());

    let mut lines = Vec::with_capacity(height + 1);
    for level in (0..height).rev() {
        let label = if level == height - 1 {
            top_label.as_str()
        } else if level == 0 {
            bottom_label.as_str()
        } else {
            ""
        };
        let axis = if label.is_empty() { '│' } else { '┤' };

        let mut line = format!("{label:>label_width$} {axis}");
        for (index, &point_level) in levels.iter().enumerate() {
            let cell = if point_level == level {
                POINT
            } else if index > 0 && strictly_between(levels[index - 1], point_level, level) {
                STEM
            } else {
                ' '
            };
            line.push(cell);
        }
        lines.push(line.trim_end().to_owned());
    }
    lines.push(format!("{:>label_width$} └{}", "", "─".repeat(levels.len())));
    lines
}

fn sample(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width {
        return values.to_vec();
    }
    if width == 1 {
        return values.last().copied().into_iter().collect();
    }
    let last = values.len() - 1;
    (0..width)
        .map(|column| values[column * last / (width - 1)])
        .collect()
}

fn strictly_between(a: usize, b: usize, level: usize) -> bool {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    low < level && level < high
}
