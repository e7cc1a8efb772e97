use std::fs;
use std::process::Command;

use tempfile::TempDir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn shimmerctl() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_shimmerctl"));
    command.env_remove("SHIMMER_CONFIG").env("RUST_LOG", "warn");
    command
}

#[test]
fn render_writes_numbered_png_frames() {
    let root = TempDir::new().unwrap();
    let out = root.path().join("frames");

    let status = shimmerctl()
        .args(["render", "--size", "120x200", "--frames", "3", "--fps", "10", "--out"])
        .arg(&out)
        .status()
        .expect("failed to run shimmerctl render");
    assert!(status.success());

    for index in 0..3 {
        let path = out.join(format!("frame-{index:04}.png"));
        let bytes = fs::read(&path).unwrap_or_else(|err| panic!("{}: {err}", path.display()));
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }
    assert!(!out.join("frame-0003.png").exists());
}

#[test]
fn render_honours_attribute_file() {
    let root = TempDir::new().unwrap();
    let config = root.path().join("shimmer.toml");
    fs::write(
        &config,
        r##"
colored = true
highlight_color = "#FF2196F3"
direction = "top_to_bottom"
duration = "2s"
repeat_mode = "reverse"
auto_start = false
item_count = 2
"##,
    )
    .unwrap();
    let out = root.path().join("colored");

    let status = shimmerctl()
        .args(["render", "--size", "64x96", "--frames", "2", "--background", "#202020"])
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .status()
        .expect("failed to run shimmerctl render");
    assert!(status.success());
    assert!(out.join("frame-0001.png").exists());
}

#[test]
fn inspect_reports_sweep_offsets() {
    let root = TempDir::new().unwrap();
    let config = root.path().join("flat.toml");
    fs::write(&config, "tilt = 0.0\n").unwrap();

    let output = shimmerctl()
        .args(["inspect", "--size", "120x200", "--config"])
        .arg(&config)
        .output()
        .expect("failed to run shimmerctl inspect");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("shape:          linear"), "{stdout}");
    assert!(stdout.contains("positions:      [0.2500, 0.4995, 0.5005, 0.7500]"), "{stdout}");
    assert!(stdout.contains("dx=-120.0 dy=0.0"), "{stdout}");
    assert!(stdout.contains("dx=120.0 dy=0.0"), "{stdout}");
}

#[test]
fn invalid_config_is_rejected() {
    let root = TempDir::new().unwrap();
    let config = root.path().join("broken.toml");
    fs::write(&config, "duration = -5\n").unwrap();

    let output = shimmerctl()
        .args(["inspect", "--config"])
        .arg(&config)
        .output()
        .expect("failed to run shimmerctl inspect");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("negative duration"), "{stderr}");
}

#[test]
fn zero_sized_surface_is_rejected() {
    let root = TempDir::new().unwrap();
    let status = shimmerctl()
        .args(["render", "--size", "0x10", "--out"])
        .arg(root.path())
        .status()
        .expect("failed to run shimmerctl render");
    assert!(!status.success());
}

#[test]
fn render_with_system_clock() {
    let root = TempDir::new().unwrap();
    let status = shimmerctl()
        .args(["render", "--size", "48x48", "--frames", "2", "--fps", "50", "--realtime", "--out"])
        .arg(root.path())
        .status()
        .expect("failed to run shimmerctl render");
    assert!(status.success());
    assert!(root.path().join("frame-0001.png").exists());
}

#[test]
fn collapsed_density_is_rejected() {
    let root = TempDir::new().unwrap();
    let output = shimmerctl()
        .args(["render", "--density", "0.001", "--out"])
        .arg(root.path())
        .output()
        .expect("failed to run shimmerctl render");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("too small"), "{stderr}");
}
