//! Arithmetic mean of numeric vote labels.

/// Parses a vote label as a finite number.
///
/// Surrounding whitespace is ignored. Labels such as `"XS"`, `"?"`,
/// `"5pts"`, `"inf"` or `"NaN"` are not numeric.
pub fn parse_numeric_vote(label: &str) -> Option<f64> {
    label
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Averages the numeric labels among `votes`, rounded to one decimal place.
///
/// Returns `None` when no label is numeric.
///
/// # Example
///
/// ```
/// use planning_poker::domain::scoring::average;
///
/// assert_eq!(average(["1", "2", "3"]), Some(2.0));
/// assert_eq!(average(["XS", "1"]), Some(1.0));
/// assert_eq!(average(["XS", "M"]), None);
/// ```
pub fn average<I, S>(votes: I) -> Option<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (sum, count) = votes
        .into_iter()
        .filter_map(|vote| parse_numeric_vote(vote.as_ref()))
        .fold((0.0_f64, 0_u32), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        return None;
    }

    Some(round_to_tenth(sum / f64::from(count)))
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn averages_numeric_votes() {
        assert_eq!(average(["1", "2", "3"]), Some(2.0));
    }

    #[test]
    fn ignores_non_numeric_votes() {
        assert_eq!(average(["XS", "1"]), Some(1.0));
        assert_eq!(average(["?", "5", "8"]), Some(6.5));
    }

    #[test]
    fn returns_none_without_numeric_votes() {
        assert_eq!(average(["XS", "M"]), None);
        assert_eq!(average(Vec::<String>::new()), None);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(average(["1", "2", "2"]), Some(1.7));
        assert_eq!(average(["1", "1", "2"]), Some(1.3));
    }

    #[test]
    fn accepts_fractional_and_padded_labels() {
        assert_eq!(average(["0.5", " 1.5 "]), Some(1.0));
    }

    #[test]
    fn rejects_partially_numeric_labels() {
        assert_eq!(parse_numeric_vote("5pts"), None);
        assert_eq!(parse_numeric_vote(""), None);
    }

    #[test]
    fn rejects_non_finite_labels() {
        assert_eq!(parse_numeric_vote("inf"), None);
        assert_eq!(parse_numeric_vote("NaN"), None);
    }

    #[test]
    fn accepts_owned_strings() {
        let votes = vec!["5".to_string(), "8".to_string()];
        assert_eq!(average(&votes), Some(6.5));
    }

    proptest! {
        #[test]
        fn average_lies_within_vote_range(values in prop::collection::vec(0u32..1000, 1..30)) {
            let labels: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            let min = f64::from(*values.iter().min().unwrap());
            let max = f64::from(*values.iter().max().unwrap());

            let avg = average(&labels).unwrap();
            prop_assert!(avg >= min - 0.05 && avg <= max + 0.05);
        }

        #[test]
        fn non_numeric_labels_never_change_the_average(
            values in prop::collection::vec(0u32..100, 1..10),
            noise in prop::collection::vec("[A-Z?]{1,3}", 0..10),
        ) {
            let numeric: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            let mut mixed = numeric.clone();
            mixed.extend(noise);

            prop_assert_eq!(average(&mixed), average(&numeric));
        }
    }
}
