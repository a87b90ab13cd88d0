//! Fixed-width text helpers: justified rows and Rupiah-style numbers.

/// Spaces placed between `left` and `right` on a `width`-column row.
///
/// Fills the row exactly when both texts fit; otherwise a single space and
/// the row overflows.
#[inline]
pub fn gap(left_len: usize, right_len: usize, width: usize) -> usize {
    width.saturating_sub(left_len + right_len).max(1)
}

/// `left` and `right` on one row, `right` pushed to the last column.
///
/// Lengths are counted in characters, not bytes.
///
/// ```
/// use struk::receipt::format::justify;
///
/// assert_eq!(justify("Total Item", "3", 16), "Total Item     3");
/// assert_eq!(justify("a long label", "99", 8), "a long label 99");
/// ```
pub fn justify(left: &str, right: &str, width: usize) -> String {
    let spaces = gap(left.chars().count(), right.chars().count(), width);
    format!("{}{}{}", left, " ".repeat(spaces), right)
}

/// Whole-number amount with `.` between groups of three digits.
///
/// Fractions are rounded away; negatives keep their sign.
///
/// ```
/// use struk::receipt::format::group_thousands;
///
/// assert_eq!(group_thousands(1234567.0), "1.234.567");
/// assert_eq!(group_thousands(-5000.0), "-5.000");
/// ```
pub fn group_thousands(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Quantity as printed: `2`, `1.5`. Rounded to three decimals so float
/// sums like `0.1 + 0.2` print as `0.3`.
pub fn quantity(qty: f64) -> String {
    let rounded = (qty * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

// ============================================================================
// TESTS
// ============================================================================
