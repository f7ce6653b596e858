// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pipeline analytics: summary counts and rates over a user's
//! application set.
//!
//! Nothing here is persisted; the summary is recomputed from the current
//! collection on every call. Per-user collections are small enough that
//! a single pass is fine.

use serde::{Deserialize, Serialize};

use crate::models::ApplicationStatus;

/// Per-status counts, serialized under the wire status names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(rename = "APPLIED")]
    pub applied: u64,
    #[serde(rename = "INTERVIEW")]
    pub interview: u64,
    #[serde(rename = "OFFER")]
    pub offer: u64,
    #[serde(rename = "REJECTED")]
    pub rejected: u64,
}

/// Aggregate summary for one user's applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: u64,
    pub counts: StatusCounts,
    /// Share of applications that reached at least an interview
    pub interview_rate: f64,
    /// Share of applications that reached an offer
    pub offer_rate: f64,
}

/// Fold a set of statuses into a summary in a single pass.
///
/// Both rates are 0 for an empty set rather than a division error.
pub fn summarize(statuses: impl IntoIterator<Item = ApplicationStatus>) -> Summary {
    let mut counts = StatusCounts::default();
    let mut total = 0u64;

    for status in statuses {
        total += 1;
        match status {
            ApplicationStatus::Applied => counts.applied += 1,
            ApplicationStatus::Interview => counts.interview += 1,
            ApplicationStatus::Offer => counts.offer += 1,
            ApplicationStatus::Rejected => counts.rejected += 1,
        }
    }

    let (interview_rate, offer_rate) = if total == 0 {
        (0.0, 0.0)
    } else {
        (
            (counts.interview + counts.offer) as f64 / total as f64,
            counts.offer as f64 / total as f64,
        )
    };

    Summary {
        total,
        counts,
        interview_rate,
        offer_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn test_empty_set_has_zero_rates() {
        let summary = summarize([]);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.counts, StatusCounts::default());
        assert_eq!(summary.interview_rate, 0.0);
        assert_eq!(summary.offer_rate, 0.0);
    }

    #[test]
    fn test_one_of_each_active_status() {
        let summary = summarize([Applied, Interview, Offer]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts.applied, 1);
        assert_eq!(summary.counts.interview, 1);
        assert_eq!(summary.counts.offer, 1);
        assert_eq!(summary.counts.rejected, 0);
        assert!((summary.interview_rate - 2.0 / 3.0).abs() < f64::EPSILON);
        assert!((summary.offer_rate - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejected_counts_toward_total_only() {
        let summary = summarize([Rejected, Rejected, Offer, Applied]);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.counts.rejected, 2);
        assert_eq!(summary.interview_rate, 0.25);
        assert_eq!(summary.offer_rate, 0.25);
    }

    #[test]
    fn test_counts_serialize_wire_names() {
        let summary = summarize([Applied]);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["counts"]["APPLIED"], 1);
        assert_eq!(json["counts"]["REJECTED"], 0);
        assert_eq!(json["interviewRate"], 0.0);
    }
}
