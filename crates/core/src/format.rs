//! Number formatting for tooltips and axis labels.

/// Round to the nearest integer and group thousands with commas
/// (`1234567.4` → `"1,234,567"`).
pub fn format_thousands(value: f64) -> String {
    group_digits(value.round(), 0)
}

/// Format an axis tick with as many decimals as the tick step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    group_digits(value, decimals)
}

/// Years print as plain integers.
pub fn format_year(value: f64) -> String {
    format!("{:.0}", value)
}

/// Tooltip text for a mark: `"China: 8,100,000 EVs"`.
pub fn sales_label(category: impl std::fmt::Display, total: f64) -> String {
    format!("{category}: {} EVs", format_thousands(total))
}

fn group_digits(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = grouped.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1_000.0), "1,000");
        assert_eq!(format_thousands(1_234_567.6), "1,234,568");
        assert_eq!(format_thousands(-45_000.0), "-45,000");
    }

    #[test]
    fn tick_precision_follows_step() {
        assert_eq!(format_tick(2_000_000.0, 2_000_000.0), "2,000,000");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
    }

    #[test]
    fn labels() {
        assert_eq!(format_year(2020.0), "2020");
        assert_eq!(sales_label(2019, 100.0), "2019: 100 EVs");
        assert_eq!(sales_label("China", 8_100_000.2), "China: 8,100,000 EVs");
    }
}
