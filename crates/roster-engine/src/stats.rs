//! Score statistics for an upload, shown before and after ingestion.

use schemars::JsonSchema;
use serde::Serialize;

/// Performance band of a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsSupport,
}

impl ScoreBand {
    #[must_use]
    pub fn of(score: f64) -> Self {
        if score >= 70.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else {
            Self::NeedsSupport
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsSupport => "needs_support",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count of scores per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BandCounts {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub needs_support: usize,
}

/// Summary over the scores present in an upload. Absent scores are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub count: usize,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub bands: BandCounts,
}

impl ScoreSummary {
    #[must_use]
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut summary = Self::default();
        let mut total = 0.0;
        for score in scores.into_iter().flatten() {
            summary.count += 1;
            total += score;
            summary.min = Some(summary.min.map_or(score, |m| m.min(score)));
            summary.max = Some(summary.max.map_or(score, |m| m.max(score)));
            match ScoreBand::of(score) {
                ScoreBand::Excellent => summary.bands.excellent += 1,
                ScoreBand::Good => summary.bands.good += 1,
                ScoreBand::Fair => summary.bands.fair += 1,
                ScoreBand::NeedsSupport => summary.bands.needs_support += 1,
            }
        }
        if summary.count > 0 {
            #[allow(clippy::cast_precision_loss)]
            let count = summary.count as f64;
            summary.average = Some(total / count);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, ScoreBand::Excellent)]
    #[case(70.0, ScoreBand::Excellent)]
    #[case(69.99, ScoreBand::Good)]
    #[case(60.0, ScoreBand::Good)]
    #[case(50.0, ScoreBand::Fair)]
    #[case(49.5, ScoreBand::NeedsSupport)]
    #[case(0.0, ScoreBand::NeedsSupport)]
    fn band_boundaries(#[case] score: f64, #[case] expected: ScoreBand) {
        assert_eq!(ScoreBand::of(score), expected);
    }

    #[test]
    fn summary_ignores_missing_scores() {
        let summary = ScoreSummary::from_scores([Some(80.0), None, Some(40.0), Some(60.0)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, Some(60.0));
        assert_eq!(summary.min, Some(40.0));
        assert_eq!(summary.max, Some(80.0));
        assert_eq!(
            summary.bands,
            BandCounts {
                excellent: 1,
                good: 1,
                fair: 0,
                needs_support: 1,
            }
        );
    }

    #[test]
    fn empty_summary() {
        let summary = ScoreSummary::from_scores(std::iter::empty());
        assert_eq!(summary, ScoreSummary::default());
    }

    #[test]
    fn summary_serializes_camel_case_bands() {
        let summary = ScoreSummary::from_scores([Some(45.0)]);
        let json = serde_json::to_value(summary).expect("serialize summary");
        assert_eq!(json["bands"]["needsSupport"], 1);
        assert_eq!(json["count"], 1);
    }
}
