use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification flags computed upstream by the workflow and trusted as
/// given: `trending` ≈ recent growth, `evergreen` ≈ stable volume,
/// `promising` ≈ high volume with low competition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KeywordStatus {
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub evergreen: bool,
    #[serde(default)]
    pub promising: bool,
}

/// Canonical keyword record every workflow response shape is normalized
/// into. Missing or null numeric fields default to 0, a missing history to
/// an empty series, missing flags to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KeywordInsight {
    pub keyword: String,
    #[serde(default)]
    pub avg_volume: i64,
    #[serde(default)]
    pub competition: f64,
    #[serde(default)]
    pub opportunity_score: f64,
    #[serde(default)]
    pub volumes_history: Vec<i64>,
    #[serde(default)]
    pub status: KeywordStatus,
}

/// Generated listing copy returned by the content-writing dispatch. Both
/// fields stay independently editable after they land.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedCopy {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// The design attributes the workflow payload is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignBrief {
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub niche: Option<String>,
    pub sub_niche: Option<String>,
    pub mockup_urls: Vec<String>,
}

/// Growth from the first to the last entry of a volume series, in percent.
/// Defined as 0 when the series is empty or starts at 0.
pub fn trend_percent(history: &[i64]) -> f64 {
    let (Some(&first), Some(&last)) = (history.first(), history.last()) else {
        return 0.0;
    };
    if first == 0 {
        return 0.0;
    }
    (last - first) as f64 / first as f64 * 100.0
}

/// Display-only sparkline geometry: each series min–max normalized
/// independently into a `width` × `height` box, y growing downwards.
/// Never stored.
pub fn sparkline_points(history: &[i64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if history.is_empty() {
        return Vec::new();
    }
    let max = history.iter().copied().max().unwrap_or(0) as f64;
    let min = history.iter().copied().min().unwrap_or(0) as f64;
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    if history.len() == 1 {
        let y = height - ((history[0] as f64 - min) / range) * height;
        return vec![(0.0, y)];
    }
    let step = width / (history.len() - 1) as f64;
    history
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = i as f64 * step;
            let y = height - ((value as f64 - min) / range) * height;
            (x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_percent_basic_growth() {
        assert_eq!(trend_percent(&[100, 150]), 50.0);
        assert_eq!(trend_percent(&[100, 200, 500]), 400.0);
        assert_eq!(trend_percent(&[200, 100]), -50.0);
    }

    #[test]
    fn trend_percent_never_divides_by_zero() {
        assert_eq!(trend_percent(&[0, 150]), 0.0);
        assert_eq!(trend_percent(&[]), 0.0);
        assert_eq!(trend_percent(&[42]), 0.0);
    }

    #[test]
    fn sparkline_normalizes_per_series() {
        let points = sparkline_points(&[100, 200, 500], 100.0, 30.0);
        assert_eq!(points.len(), 3);
        // Min maps to the bottom edge, max to the top.
        assert_eq!(points[0], (0.0, 30.0));
        assert_eq!(points[2], (100.0, 0.0));
        assert!(points[1].0 == 50.0);
    }

    #[test]
    fn sparkline_flat_series_keeps_finite_geometry() {
        let points = sparkline_points(&[7, 7, 7], 100.0, 30.0);
        assert!(points.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
        assert_eq!(points[0].1, points[2].1);
    }

    #[test]
    fn sparkline_degenerate_series() {
        assert!(sparkline_points(&[], 100.0, 30.0).is_empty());
        assert_eq!(sparkline_points(&[5], 100.0, 30.0).len(), 1);
    }
}
