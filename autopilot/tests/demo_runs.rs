use asteroids_autopilot::runner::{run_demo, write_report, RunMetrics};

#[test]
fn identical_seeds_produce_identical_runs() {
    let a = run_demo(0x1234_5678, 1_200).expect("first run");
    let b = run_demo(0x1234_5678, 1_200).expect("second run");

    assert_eq!(a.metrics, b.metrics);
    assert_eq!(a.inputs, b.inputs);
}

#[test]
fn demo_run_records_one_input_byte_per_tick() {
    let artifact = run_demo(0xBEEF_0001, 2_000).expect("run");

    assert_eq!(artifact.inputs.len(), 2_000);
    assert_eq!(artifact.metrics.max_ticks, 2_000);
    // The pilot engages asteroids, so a dead-stick run means something broke.
    assert!(artifact.metrics.action_ticks > 0);
}

#[test]
fn zero_tick_runs_are_rejected() {
    assert!(run_demo(1, 0).is_err());
}

#[test]
fn metrics_report_round_trips_through_json() {
    let artifact = run_demo(0xA57E_0001, 600).expect("run");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reports/metrics.json");

    write_report(&path, &artifact.metrics).expect("write report");

    let data = std::fs::read(&path).expect("read report");
    let decoded: RunMetrics = serde_json::from_slice(&data).expect("decode report");
    assert_eq!(decoded, artifact.metrics);
}
