//! Russian wording helpers shared by analytics and chat rendering.

/// Format a weight in kilograms.
///
/// Whole numbers print without decimals, everything else with one.
#[must_use]
pub fn format_weight(weight: Option<f64>) -> String {
    match weight {
        None => "—".to_string(),
        Some(w) if w.fract() == 0.0 => format!("{} кг", w as i64),
        Some(w) => format!("{w:.1} кг"),
    }
}

/// Pick the Russian plural form for `n` from (one, few, many).
#[must_use]
pub fn plural<'a>(n: i64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let n = n.abs();
    let (last, last_two) = (n % 10, n % 100);
    if last == 1 && last_two != 11 {
        one
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        few
    } else {
        many
    }
}

/// "день" / "дня" / "дней".
#[must_use]
pub fn days_word(n: i64) -> &'static str {
    plural(n, "день", "дня", "дней")
}

/// "неделю" / "недели" / "недель" (accusative, as in "2 недели назад").
#[must_use]
pub fn weeks_word(n: i64) -> &'static str {
    plural(n, "неделю", "недели", "недель")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_weight_variants() {
        assert_eq!(format_weight(None), "—");
        assert_eq!(format_weight(Some(60.0)), "60 кг");
        assert_eq!(format_weight(Some(72.5)), "72.5 кг");
        assert_eq!(format_weight(Some(0.0)), "0 кг");
    }

    #[test]
    fn days_word_forms() {
        assert_eq!(days_word(1), "день");
        assert_eq!(days_word(2), "дня");
        assert_eq!(days_word(4), "дня");
        assert_eq!(days_word(5), "дней");
        assert_eq!(days_word(11), "дней");
        assert_eq!(days_word(12), "дней");
        assert_eq!(days_word(21), "день");
        assert_eq!(days_word(22), "дня");
        assert_eq!(days_word(111), "дней");
    }

    #[test]
    fn weeks_word_forms() {
        assert_eq!(weeks_word(1), "неделю");
        assert_eq!(weeks_word(3), "недели");
        assert_eq!(weeks_word(5), "недель");
        assert_eq!(weeks_word(14), "недель");
    }
}
