// Shared proptest configuration for integration tests.
//
// Env knobs:
// - PROPTEST_CASES: number of cases per property (e.g. 32, 800, 5000).
// - PROPTEST_MAX_SHRINK_MS: optional cap for shrinking time in milliseconds.

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base: proptest::prelude::ProptestConfig = proptest::prelude::ProptestConfig::default();

    // Deals and hand searches are cheap; default to 64 cases.
    let cases: u32 = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);

    let max_shrink_time: u32 = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    proptest::prelude::ProptestConfig {
        // Disable persistence to silence regression-file warnings in integration tests
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
