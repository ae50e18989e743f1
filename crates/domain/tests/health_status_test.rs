use ferrous_watch_domain::{CheckStatus, HealthCheckResult, OverallStatus};

const ALL: [CheckStatus; 3] = [CheckStatus::Pass, CheckStatus::Warn, CheckStatus::Fail];

fn results(statuses: &[CheckStatus]) -> Vec<HealthCheckResult> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, s)| HealthCheckResult::new(format!("check-{}", i), *s, ""))
        .collect()
}

#[test]
fn test_aggregate_exhaustive_over_four_checks() {
    for a in ALL {
        for b in ALL {
            for c in ALL {
                for d in ALL {
                    let statuses = [a, b, c, d];
                    let overall = OverallStatus::aggregate(&results(&statuses));

                    let any_fail = statuses.contains(&CheckStatus::Fail);
                    let any_warn = statuses.contains(&CheckStatus::Warn);

                    let expected = if any_fail {
                        OverallStatus::Unhealthy
                    } else if any_warn {
                        OverallStatus::Degraded
                    } else {
                        OverallStatus::Healthy
                    };

                    assert_eq!(overall, expected, "statuses: {:?}", statuses);
                }
            }
        }
    }
}

#[test]
fn test_no_checks_is_healthy() {
    assert_eq!(OverallStatus::aggregate(&[]), OverallStatus::Healthy);
}

#[test]
fn test_warn_after_fail_stays_unhealthy() {
    let overall = OverallStatus::Unhealthy.absorb(CheckStatus::Warn);
    assert_eq!(overall, OverallStatus::Unhealthy);
}

#[test]
fn test_pass_does_not_upgrade_degraded() {
    let overall = OverallStatus::Degraded.absorb(CheckStatus::Pass);
    assert_eq!(overall, OverallStatus::Degraded);
}

#[test]
fn test_operational_statuses() {
    assert!(OverallStatus::Healthy.is_operational());
    assert!(OverallStatus::Degraded.is_operational());
    assert!(!OverallStatus::Unhealthy.is_operational());
}

#[test]
fn test_check_result_serialization() {
    let result = HealthCheckResult::warn("database", "slow").with_response_time(1200);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["status"], "warn");
    assert_eq!(json["response_time_ms"], 1200);
}

#[test]
fn test_check_result_omits_missing_response_time() {
    let result = HealthCheckResult::pass("disk", "not implemented");
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("response_time_ms").is_none());
}
