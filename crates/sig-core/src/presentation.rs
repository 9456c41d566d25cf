//! Result presentation
//!
//! Everything displayed for a verdict is re-derived from the verdict itself;
//! there is no presentation state.

use crate::verdict::VerificationVerdict;
use serde::Serialize;
use std::fmt::Write;

/// Round a unit score to an integer percentage
pub fn confidence_percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Visual emphasis tier for a confidence percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            90..=u8::MAX => ConfidenceBand::High,
            70..=89 => ConfidenceBand::Medium,
            _ => ConfidenceBand::Low,
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "text-green-500",
            ConfidenceBand::Medium => "text-amber-500",
            ConfidenceBand::Low => "text-red-500",
        }
    }

    pub fn bar_class(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "bg-green-500",
            ConfidenceBand::Medium => "bg-amber-500",
            ConfidenceBand::Low => "bg-red-500",
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "high"),
            ConfidenceBand::Medium => write!(f, "medium"),
            ConfidenceBand::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBar {
    pub label: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub authentic: bool,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub confidence_percent: u8,
    pub band: ConfidenceBand,
    pub sub_scores: Vec<ScoreBar>,
    pub reference_signature: Option<String>,
}

impl ResultView {
    pub fn from_verdict(verdict: &VerificationVerdict) -> Self {
        let percent = confidence_percent(verdict.confidence_score);

        let sub_scores = verdict
            .match_details
            .map(|details| {
                vec![
                    ScoreBar {
                        label: "Style Match",
                        percent: confidence_percent(details.style_match),
                    },
                    ScoreBar {
                        label: "Pressure Match",
                        percent: confidence_percent(details.pressure_match),
                    },
                    ScoreBar {
                        label: "Flow Match",
                        percent: confidence_percent(details.flow_match),
                    },
                ]
            })
            .unwrap_or_default();

        let (status_label, status_class) = if verdict.is_authentic {
            ("Authentic Signature", "bg-green-50 text-green-700")
        } else {
            ("Potential Forgery", "bg-red-50 text-red-700")
        };

        Self {
            authentic: verdict.is_authentic,
            status_label,
            status_class,
            confidence_percent: percent,
            band: ConfidenceBand::from_percent(percent),
            sub_scores,
            reference_signature: verdict.reference_signature.clone(),
        }
    }

    /// Plain-text rendering for terminals and logs
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.status_label);
        let _ = writeln!(out, "{}", "=".repeat(50));
        let _ = writeln!(
            out,
            "Confidence Score: {}% ({} confidence)",
            self.confidence_percent, self.band
        );
        let _ = writeln!(out, "  [{}]", meter(self.confidence_percent));

        if !self.sub_scores.is_empty() {
            let _ = writeln!(out);
            for bar in &self.sub_scores {
                let _ = writeln!(out, "{:<16}{:>3}%  [{}]", bar.label, bar.percent, meter(bar.percent));
            }
        }

        if let Some(reference) = &self.reference_signature {
            let _ = writeln!(out);
            let _ = writeln!(out, "Compared against reference signature: {}", reference);
        }

        out
    }
}

fn meter(percent: u8) -> String {
    let filled = (percent as usize + 2) / 5;
    format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled))
}

/// Nothing is rendered until a verdict exists
pub fn present(verdict: Option<&VerificationVerdict>) -> Option<ResultView> {
    verdict.map(ResultView::from_verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::MatchDetails;

    fn verdict(score: f64, authentic: bool) -> VerificationVerdict {
        VerificationVerdict {
            is_authentic: authentic,
            confidence_score: score,
            match_details: Some(MatchDetails {
                style_match: 0.91,
                pressure_match: 0.5,
                flow_match: 0.456,
            }),
            reference_signature: Some("https://example.com/ref.png".to_string()),
        }
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(confidence_percent(0.93), 93);
        assert_eq!(confidence_percent(0.456), 46);
        assert_eq!(confidence_percent(0.004), 0);
        assert_eq!(confidence_percent(1.0), 100);
        assert_eq!(confidence_percent(f64::NAN), 0);
        assert_eq!(confidence_percent(1.7), 100);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ConfidenceBand::from_percent(100), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(90), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(89), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_percent(70), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_percent(69), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_percent(0), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::Medium.text_class(), "text-amber-500");
        assert_eq!(ConfidenceBand::Low.bar_class(), "bg-red-500");
    }

    #[test]
    fn test_authentic_view() {
        let view = ResultView::from_verdict(&verdict(0.93, true));
        assert_eq!(view.status_label, "Authentic Signature");
        assert_eq!(view.confidence_percent, 93);
        assert_eq!(view.band, ConfidenceBand::High);

        let labels: Vec<_> = view.sub_scores.iter().map(|b| (b.label, b.percent)).collect();
        assert_eq!(
            labels,
            vec![("Style Match", 91), ("Pressure Match", 50), ("Flow Match", 46)]
        );

        let text = view.render_text();
        assert!(text.starts_with("Authentic Signature\n"));
        assert!(text.contains("93%"));
        assert!(text.contains("https://example.com/ref.png"));
    }

    #[test]
    fn test_forgery_view_without_optional_parts() {
        let bare = VerificationVerdict::from_score(0.31, 0.7);
        let view = ResultView::from_verdict(&bare);
        assert_eq!(view.status_label, "Potential Forgery");
        assert!(view.sub_scores.is_empty());
        assert!(view.reference_signature.is_none());

        let text = view.render_text();
        assert!(!text.contains("Style Match"));
        assert!(!text.contains("reference"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let v = verdict(0.77, true);
        assert_eq!(ResultView::from_verdict(&v), ResultView::from_verdict(&v));
        assert_eq!(
            ResultView::from_verdict(&v).render_text(),
            ResultView::from_verdict(&v).render_text()
        );
    }

    #[test]
    fn test_present_nothing_without_verdict() {
        assert!(present(None).is_none());
        assert!(present(Some(&verdict(0.5, false))).is_some());
    }
}
