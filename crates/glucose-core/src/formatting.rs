use unicode_width::UnicodeWidthStr;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use glucose_core::formatting::format_number;
///
/// assert_eq!(format_number(111.0, 1), "111.0");
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a tiny epsilon so exact binary midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` is "0.50"; keep ".50".
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a glucose concentration with one decimal, e.g. `"111.0 mg/dL"`.
///
/// ```
/// use glucose_core::formatting::format_mgdl;
///
/// assert_eq!(format_mgdl(65.0), "65.0 mg/dL");
/// ```
pub fn format_mgdl(value: f64) -> String {
    format!("{} mg/dL", format_level(value))
}

/// A glucose level with one decimal and no separators.
///
/// Ties round on the exact binary value, so `180.25` shows as `180.2`.
pub fn format_level(value: f64) -> String {
    format!("{:.1}", value)
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Render rows as a boxed grid table.
///
/// With `headers`, the header row is separated from the body by a `=` rule.
/// Short rows are padded with empty cells.
///
/// ```text
/// +------------+-------+
/// | Timestamp  | State |
/// +============+=======+
/// | 2025-01-01 | Low   |
/// +------------+-------+
/// ```
pub fn render_grid(headers: Option<&[&str]>, rows: &[Vec<String>]) -> String {
    let columns = headers
        .map(|h| h.len())
        .into_iter()
        .chain(rows.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut widths = vec![0usize; columns];
    if let Some(h) = headers {
        for (i, cell) in h.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut lines = vec![grid_rule(&widths, '-')];
    if let Some(h) = headers {
        lines.push(grid_row(&widths, h.iter().copied()));
        lines.push(grid_rule(&widths, '='));
    }
    for row in rows {
        lines.push(grid_row(&widths, row.iter().map(String::as_str)));
        lines.push(grid_rule(&widths, '-'));
    }
    if rows.is_empty() && headers.is_some() {
        // Header-only table: replace the `=` rule with a closing border.
        lines.pop();
        lines.push(grid_rule(&widths, '-'));
    }
    lines.join("\n")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn grid_rule(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.extend(std::iter::repeat(fill).take(w + 2));
        line.push('+');
    }
    line
}

fn grid_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    let mut cells = cells.chain(std::iter::repeat(""));
    for w in widths {
        let cell = cells.next().unwrap_or("");
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(w - cell.width() + 1));
        line.push('|');
    }
    line
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_one_decimal() {
        assert_eq!(format_number(111.0, 1), "111.0");
        assert_eq!(format_number(95.25, 1), "95.3");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    // ── format_mgdl ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_mgdl() {
        assert_eq!(format_mgdl(111.0), "111.0 mg/dL");
        assert_eq!(format_mgdl(139.96), "140.0 mg/dL");
    }

    #[test]
    fn test_format_level_matches_fixed_point() {
        assert_eq!(format_level(95.0), "95.0");
        assert_eq!(format_level(180.25), "180.2");
        assert_eq!(format_level(112.37), "112.4");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        let p = percentage(2.0, 5.0, 1);
        assert!((p - 40.0).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 2), 0.0);
    }

    // ── render_grid ──────────────────────────────────────────────────────────

    #[test]
    fn test_render_grid_with_headers() {
        let rows = vec![
            vec!["2025-01-01 10:00:00".to_string(), "95.0".to_string()],
            vec!["2025-01-02 14:30:00".to_string(), "180.0".to_string()],
        ];
        let out = render_grid(Some(&["Timestamp", "Value"]), &rows);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "+---------------------+-------+");
        assert_eq!(lines[1], "| Timestamp           | Value |");
        assert_eq!(lines[2], "+=====================+=======+");
        assert_eq!(lines[3], "| 2025-01-01 10:00:00 | 95.0  |");
        assert_eq!(lines[6], "+---------------------+-------+");
    }

    #[test]
    fn test_render_grid_without_headers() {
        let rows = vec![vec!["Total Readings".to_string(), "5".to_string()]];
        let out = render_grid(None, &rows);
        assert_eq!(
            out,
            "+----------------+---+\n| Total Readings | 5 |\n+----------------+---+"
        );
    }

    #[test]
    fn test_render_grid_pads_short_rows() {
        let rows = vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]];
        let out = render_grid(None, &rows);
        assert!(out.contains("| c |   |"));
    }

    #[test]
    fn test_render_grid_header_only() {
        let out = render_grid(Some(&["A", "B"]), &[]);
        assert_eq!(out, "+---+---+\n| A | B |\n+---+---+");
    }

    #[test]
    fn test_render_grid_empty() {
        assert_eq!(render_grid(None, &[]), "");
    }
}
