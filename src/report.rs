//! Aggregation over fetched EC2 records. Pure functions, no I/O.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::ec2::{InstanceRecord, SpotRequestRecord};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

const CLOSED_STATE: &str = "closed";
/// Status code set by fault-injection (chaos experiment) terminations,
/// distinct from ordinary capacity-driven spot reclaims.
const EXPERIMENT_STATUS_CODE: &str = "instance-terminated-by-experiment";

/// Uptime in whole seconds at `now`. A launch time in the future (clock
/// skew) clamps to zero.
pub fn uptime_seconds(record: &InstanceRecord, now: DateTime<Utc>) -> i64 {
    (now - record.launch_time).num_seconds().max(0)
}

/// Group per-instance uptime samples by instance type. Every record lands
/// under exactly one key; types with no observed instance get no key.
pub fn group_uptimes_by_type(
    records: &[InstanceRecord],
    now: DateTime<Utc>,
) -> HashMap<String, Vec<i64>> {
    let mut grouped: HashMap<String, Vec<i64>> = HashMap::new();
    for record in records {
        grouped
            .entry(record.instance_type.clone())
            .or_default()
            .push(uptime_seconds(record, now));
    }
    grouped
}

/// Average the samples per type and render as `"{days}d {hours}h {minutes}m"`.
/// Seconds are truncated, not rounded. Types with an empty sample list are
/// dropped rather than divided by zero.
pub fn average_uptime_by_type(grouped: &HashMap<String, Vec<i64>>) -> HashMap<String, String> {
    let mut averages = HashMap::new();
    for (instance_type, samples) in grouped {
        if samples.is_empty() {
            continue;
        }
        let sum: i64 = samples.iter().sum();
        let average_seconds = sum / samples.len() as i64;

        let days = average_seconds / SECONDS_PER_DAY;
        let hours = (average_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        let minutes = (average_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

        averages.insert(
            instance_type.clone(),
            format!("{}d {}h {}m", days, hours, minutes),
        );
    }
    averages
}

/// Count fault-injection interruptions by instance type. Only requests that
/// are closed with the experiment status code qualify; anything else
/// contributes zero.
pub fn count_interruptions_by_type(requests: &[SpotRequestRecord]) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for request in requests.iter().filter(|r| is_experiment_interruption(r)) {
        *counts.entry(request.instance_type.clone()).or_insert(0) += 1;
    }
    counts
}

fn is_experiment_interruption(request: &SpotRequestRecord) -> bool {
    request.state == CLOSED_STATE && request.status_code == EXPERIMENT_STATUS_CODE
}

/// Render elapsed whole seconds as `"{days}d {hours}h {minutes}m {seconds}s"`.
pub fn format_uptime(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(id: &str, instance_type: &str, launched_at: i64) -> InstanceRecord {
        InstanceRecord {
            id: id.to_string(),
            instance_type: instance_type.to_string(),
            state: "running".to_string(),
            launch_time: Utc.timestamp_opt(launched_at, 0).unwrap(),
        }
    }

    fn spot_request(instance_type: &str, state: &str, status_code: &str) -> SpotRequestRecord {
        SpotRequestRecord {
            instance_type: instance_type.to_string(),
            state: state.to_string(),
            status_code: status_code.to_string(),
        }
    }

    #[test]
    fn grouping_assigns_every_record_once() {
        let now = Utc.timestamp_opt(1_000_000, 0).unwrap();
        let records = vec![
            record("i-1", "m5.large", 900_000),
            record("i-2", "m5.large", 950_000),
            record("i-3", "t3.micro", 990_000),
        ];

        let grouped = group_uptimes_by_type(&records, now);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["m5.large"], vec![100_000, 50_000]);
        assert_eq!(grouped["t3.micro"], vec![10_000]);
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn future_launch_time_clamps_to_zero() {
        let now = Utc.timestamp_opt(1_000_000, 0).unwrap();
        let skewed = record("i-1", "m5.large", 1_000_060);

        assert_eq!(uptime_seconds(&skewed, now), 0);
    }

    #[test]
    fn average_matches_known_examples() {
        let mut grouped = HashMap::new();
        grouped.insert("a1.medium".to_string(), vec![3_600, 7_200]);
        grouped.insert("c5.xlarge".to_string(), vec![90_000]);

        let averages = average_uptime_by_type(&grouped);

        assert_eq!(averages["a1.medium"], "0d 1h 30m");
        assert_eq!(averages["c5.xlarge"], "1d 1h 0m");
    }

    #[test]
    fn average_truncates_seconds() {
        let mut grouped = HashMap::new();
        // 86459s = 1d 0h 0m 59s; the 59s must vanish, not round up
        grouped.insert("m5.large".to_string(), vec![86_459]);

        let averages = average_uptime_by_type(&grouped);

        assert_eq!(averages["m5.large"], "1d 0h 0m");
    }

    #[test]
    fn empty_sample_list_is_dropped() {
        let mut grouped: HashMap<String, Vec<i64>> = HashMap::new();
        grouped.insert("m5.large".to_string(), Vec::new());

        assert!(average_uptime_by_type(&grouped).is_empty());
    }

    #[test]
    fn recomposed_average_is_within_truncation_bound() {
        let sample_sets: Vec<Vec<i64>> = vec![
            vec![1, 2, 4],
            vec![59, 61],
            vec![3_600, 7_200],
            vec![90_000],
            vec![86_399, 86_401, 123_456],
        ];

        for samples in sample_sets {
            let true_average = samples.iter().sum::<i64>() as f64 / samples.len() as f64;
            let mut grouped = HashMap::new();
            grouped.insert("m5.large".to_string(), samples);

            let formatted = &average_uptime_by_type(&grouped)["m5.large"];
            let recomposed = recompose_seconds(formatted) as f64;

            assert!(recomposed <= true_average, "{} > {}", recomposed, true_average);
            assert!(
                true_average - recomposed < 60.0,
                "truncation bound exceeded for {}",
                formatted
            );
        }
    }

    #[test]
    fn interruption_count_requires_closed_state_and_experiment_code() {
        let requests = vec![
            spot_request("m5.large", "closed", "instance-terminated-by-experiment"),
            spot_request("m5.large", "closed", "other"),
            spot_request("m5.large", "active", "instance-terminated-by-experiment"),
            spot_request("m5.large", "closed", "marked-for-termination"),
            spot_request("t3.micro", "closed", "instance-terminated-by-experiment"),
        ];

        let counts = count_interruptions_by_type(&requests);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["m5.large"], 1);
        assert_eq!(counts["t3.micro"], 1);
    }

    #[test]
    fn no_matching_requests_yields_no_keys() {
        let requests = vec![spot_request("m5.large", "open", "pending-evaluation")];

        assert!(count_interruptions_by_type(&requests).is_empty());
    }

    #[test]
    fn uptime_formatting_strips_nothing_above_seconds() {
        assert_eq!(format_uptime(93_784), "1d 2h 3m 4s");
        assert_eq!(format_uptime(0), "0d 0h 0m 0s");
        assert_eq!(format_uptime(59), "0d 0h 0m 59s");
    }

    fn recompose_seconds(formatted: &str) -> i64 {
        let parts: Vec<i64> = formatted
            .split_whitespace()
            .map(|p| p.trim_end_matches(['d', 'h', 'm']).parse().unwrap())
            .collect();
        parts[0] * 86_400 + parts[1] * 3_600 + parts[2] * 60
    }
}
