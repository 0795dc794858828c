// GPU probe and nvidia-smi parsing tests

use hwdiag::config::GpuConfig;
use hwdiag::gpu_repo::{GpuError, GpuProbe, parse_query_output, resolve_executable};
use hwdiag::models::GpuReport;

const TWO_GPUS: &str = "\
0, GPU-0a1b2c3d, 35, 8192, 1024, 7168, 45, NVIDIA GeForce RTX 3070
1, GPU-4e5f6a7b, [N/A], 16384, 0, 16384, [Not Supported], Tesla T4, PCIe
";

#[test]
fn test_parse_two_gpus() {
    let devices = parse_query_output(TWO_GPUS).expect("parse");
    assert_eq!(devices.len(), 2);

    let first = &devices[0];
    assert_eq!(first.index, 0);
    assert_eq!(first.uuid, "GPU-0a1b2c3d");
    assert_eq!(first.name, "NVIDIA GeForce RTX 3070");
    assert_eq!(first.load_percent, Some(35.0));
    assert_eq!(first.memory_total_mb, Some(8192.0));
    assert_eq!(first.memory_used_mb, Some(1024.0));
    assert_eq!(first.memory_free_mb, Some(7168.0));
    assert_eq!(first.temperature_c, Some(45.0));

    let second = &devices[1];
    assert_eq!(second.index, 1);
    assert_eq!(second.load_percent, None);
    assert_eq!(second.temperature_c, None);
    // Name is the last field, so embedded commas survive.
    assert_eq!(second.name, "Tesla T4, PCIe");
}

#[test]
fn test_parse_load_is_within_percent_range() {
    let devices = parse_query_output("0, GPU-x, 140, 1, 1, 0, 30, Odd\n").expect("parse");
    let load = devices[0].load_percent.expect("load");
    assert!((0.0..=100.0).contains(&load));
}

#[test]
fn test_parse_empty_output_is_no_devices() {
    assert!(parse_query_output("").expect("parse").is_empty());
    assert!(parse_query_output("\n  \n").expect("parse").is_empty());
}

#[test]
fn test_parse_rejects_short_line() {
    let err = parse_query_output("0, GPU-x, 35\n").unwrap_err();
    assert!(matches!(err, GpuError::Parse { line: 1, .. }));
}

#[test]
fn test_parse_rejects_bad_index() {
    let err = parse_query_output("zero, GPU-x, 35, 1, 1, 0, 30, Name\n").unwrap_err();
    assert!(err.to_string().contains("invalid index"));
}

#[test]
fn test_detect_disabled_is_unavailable() {
    let config = GpuConfig {
        enabled: false,
        ..GpuConfig::default()
    };
    assert_eq!(GpuProbe::detect(&config), GpuProbe::Unavailable);
}

#[test]
fn test_detect_missing_tool_is_unavailable() {
    let config = GpuConfig {
        enabled: true,
        nvidia_smi_path: "/nonexistent/dir/nvidia-smi".into(),
    };
    let probe = GpuProbe::detect(&config);
    assert_eq!(probe, GpuProbe::Unavailable);
    assert!(!probe.is_available());
    assert!(resolve_executable("hwdiag-no-such-tool-on-path").is_none());
}

#[tokio::test]
async fn test_unavailable_probe_reports_unavailable() {
    assert_eq!(GpuProbe::Unavailable.query().await, GpuReport::Unavailable);
}

#[cfg(unix)]
#[tokio::test]
async fn test_query_with_fake_nvidia_smi() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().unwrap();
    let write_script = |name: &str, body: &str| {
        let path = dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    };
    let ok = write_script(
        "nvidia-smi-ok",
        "echo '0, GPU-abc, 12, 4096, 512, 3584, 50, Fake GPU'",
    );
    let failing = write_script("nvidia-smi-fail", "echo 'NVIDIA-SMI has failed' >&2; exit 9");

    let probe = GpuProbe::detect(&GpuConfig {
        enabled: true,
        nvidia_smi_path: ok.to_string_lossy().into_owned(),
    });
    assert!(probe.is_available());
    match probe.query().await {
        GpuReport::Devices(devices) => {
            assert_eq!(devices.len(), 1);
            assert_eq!(devices[0].name, "Fake GPU");
            assert_eq!(devices[0].load_percent, Some(12.0));
        }
        other => panic!("expected devices, got {:?}", other),
    }

    let probe = GpuProbe::NvidiaSmi(failing);
    match probe.query().await {
        GpuReport::Error(message) => assert!(message.contains("NVIDIA-SMI has failed")),
        other => panic!("expected error, got {:?}", other),
    }
}
