//! Value label formatting for chart annotations.

/// How a data point's value is printed above its bar or point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// Shortest representation of the number (`251.5`, `2792`).
    #[default]
    Plain,
    /// Fixed number of decimals (`74.7`).
    Fixed(u8),
    /// Value divided by one thousand with a `k` suffix (`653k`, `12.3k`).
    Thousands(u8),
    /// Suppresses the label.
    Hidden,
}

impl LabelFormat {
    /// Formats `value`, returning `None` for [`LabelFormat::Hidden`].
    pub fn format(self, value: f64) -> Option<String> {
        match self {
            LabelFormat::Plain => Some(plain(value)),
            LabelFormat::Fixed(decimals) => Some(fixed(value, decimals)),
            LabelFormat::Thousands(decimals) => Some(format!("{}k", fixed(value / 1000.0, decimals))),
            LabelFormat::Hidden => None,
        }
    }
}

/// Prints a number without trailing zeros.
pub fn plain(value: f64) -> String {
    format!("{}", value)
}

/// Prints a number with `decimals` places, rounding ties away from zero.
pub fn fixed(value: f64, decimals: u8) -> String {
    let factor = 10f64.powi(i32::from(decimals));
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", usize::from(decimals), rounded)
}

/// Prints a percentage share (`50%`, `98.5%`).
pub fn percent(value: f64) -> String {
    format!("{}%", plain(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_drops_trailing_zeros() {
        assert_eq!(plain(251.50), "251.5");
        assert_eq!(plain(300.13), "300.13");
        assert_eq!(plain(2792.0), "2792");
    }

    #[test]
    fn fixed_keeps_requested_decimals() {
        assert_eq!(fixed(71.0, 1), "71.0");
        assert_eq!(fixed(64.4, 1), "64.4");
    }

    #[test]
    fn thousands_round_half_away_from_zero() {
        assert_eq!(LabelFormat::Thousands(0).format(84500.0).as_deref(), Some("85k"));
        assert_eq!(LabelFormat::Thousands(0).format(653053.0).as_deref(), Some("653k"));
        assert_eq!(LabelFormat::Thousands(1).format(12250.0).as_deref(), Some("12.3k"));
        assert_eq!(LabelFormat::Thousands(1).format(10340.0).as_deref(), Some("10.3k"));
        assert_eq!(LabelFormat::Thousands(1).format(12000.0).as_deref(), Some("12.0k"));
    }

    #[test]
    fn hidden_labels_are_suppressed() {
        assert_eq!(LabelFormat::Hidden.format(1.0), None);
    }

    #[test]
    fn percent_appends_sign() {
        assert_eq!(percent(50.0), "50%");
        assert_eq!(percent(98.5), "98.5%");
    }
}
