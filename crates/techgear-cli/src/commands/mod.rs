//! CLI command implementations.

pub mod generate;
pub mod validate;

/// Format a count with thousands separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a dollar amount with cents and thousands separators.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        format_count((cents / 100) as usize),
        cents % 100
    )
}
