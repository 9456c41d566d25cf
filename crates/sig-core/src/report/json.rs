//! JSON report generation

use super::VerificationReport;
use crate::CoreResult;

pub fn generate(report: &VerificationReport) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fixtures::png;
    use crate::verdict::VerificationVerdict;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_verdict_keeps_wire_names() {
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let report = VerificationReport::new(
            &png("sig.png"),
            VerificationVerdict::from_score(0.93, 0.7),
            generated_at,
        );
        let json: serde_json::Value = serde_json::from_str(&generate(&report).unwrap()).unwrap();

        assert_eq!(json["file_name"], "sig.png");
        assert_eq!(json["verdict"]["isAuthentic"], true);
        assert_eq!(json["verdict"]["confidenceScore"], 0.93);
        assert_eq!(json["generated_at"], "2026-10-19T12:00:00Z");
    }
}
