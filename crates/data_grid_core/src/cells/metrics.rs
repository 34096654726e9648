//! Progress and rating cells.

/// Render inputs for a progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Fill percentage in `[0, 100]`.
    pub percent: f64,
    /// Rounded percentage label.
    pub label: String,
}

/// `value / max` as a percentage clamped into `[0, 100]`.
///
/// Non-finite inputs and non-positive maxima yield `0`.
pub fn progress_percent(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// Builds the progress view model.
pub fn progress_view(value: Option<f64>, max: f64) -> ProgressView {
    let percent = progress_percent(value.unwrap_or(0.0), max);
    ProgressView {
        percent,
        label: format!("{}%", percent.round()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Fill state of one rating star.
pub enum StarFill {
    /// Fully filled.
    Full,
    /// Half filled.
    Half,
    /// Outline only.
    Empty,
}

impl StarFill {
    /// Stable `data-ui-fill` token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
            Self::Empty => "empty",
        }
    }
}

/// Render inputs for a star rating.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingView {
    /// Clamped value rounded to the nearest half.
    pub value: f64,
    /// Star count.
    pub max: u8,
    /// Per-star fill.
    pub stars: Vec<StarFill>,
}

/// Rounds `value` to the nearest half star and clamps into `[0, max]`.
pub fn rating_view(value: Option<f64>, max: u8) -> RatingView {
    let raw = value.filter(|value| value.is_finite()).unwrap_or(0.0);
    let value = ((raw * 2.0).round() / 2.0).clamp(0.0, f64::from(max));
    let stars = (0..max)
        .map(|index| {
            let remaining = value - f64::from(index);
            if remaining >= 1.0 {
                StarFill::Full
            } else if remaining >= 0.5 {
                StarFill::Half
            } else {
                StarFill::Empty
            }
        })
        .collect();
    RatingView { value, max, stars }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn progress_clamps_out_of_range_ratios() {
        assert_eq!(progress_percent(-10.0, 100.0), 0.0);
        assert_eq!(progress_percent(150.0, 100.0), 100.0);
        assert_eq!(progress_percent(3.0, 4.0), 75.0);
        assert_eq!(progress_percent(5.0, 0.0), 0.0);
        assert_eq!(progress_view(Some(150.0), 100.0).label, "100%");
    }

    #[test]
    fn rating_rounds_to_half_stars() {
        let view = rating_view(Some(3.3), 5);
        assert_eq!(view.value, 3.5);
        assert_eq!(
            view.stars,
            vec![
                StarFill::Full,
                StarFill::Full,
                StarFill::Full,
                StarFill::Half,
                StarFill::Empty,
            ]
        );
        assert_eq!(rating_view(Some(9.0), 5).value, 5.0);
        assert_eq!(rating_view(None, 3).stars, vec![StarFill::Empty; 3]);
    }
}
