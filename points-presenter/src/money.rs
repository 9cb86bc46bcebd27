use crate::PresentError;

/// Largest co-pay that still converts to a whole number of cents exactly.
pub const MAX_AMOUNT: f64 = 1e13;

/// Cash co-pay on top of the points, e.g. `"+$1,234.50"`.
pub fn format_money(dollar_cost: f64) -> Result<String, PresentError> {
    if !dollar_cost.is_finite() || dollar_cost < 0.0 || dollar_cost > MAX_AMOUNT {
        return Err(PresentError::InvalidAmount(dollar_cost));
    }
    let cents = (dollar_cost * 100.0).round() as u64;
    Ok(format!("+${}.{:02}", group_thousands(cents / 100), cents % 100))
}

/// `"12,500 pts"`
pub fn format_points(point_cost: i64) -> String {
    let grouped = group_thousands(point_cost.unsigned_abs());
    if point_cost < 0 {
        format!("-{} pts", grouped)
    } else {
        format!("{} pts", grouped)
    }
}

/// Redemption value in cents per point, e.g. `"1.45¢/pt"`.
pub fn format_value_per_point(cents: f64) -> Option<String> {
    (cents.is_finite() && cents > 0.0).then(|| format!("{:.2}¢/pt", cents))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
