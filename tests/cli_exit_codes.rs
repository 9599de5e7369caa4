use image::RgbaImage;
use serde_json::Value;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_image(path: &std::path::Path, color: [u8; 4]) {
    let img = RgbaImage::from_pixel(4, 4, image::Rgba(color));
    img.save(path).expect("write image");
}

/// Run the binary with HOME pointed at `dir` so no user config is picked up.
fn stylescope(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stylescope"))
        .args(args)
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("STYLESCOPE_ENV")
        .output()
        .expect("run stylescope")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

#[test]
fn analyze_image_file_prints_palette() {
    let dir = TempDir::new().expect("tempdir");
    let img_path = dir.path().join("red.png");
    write_image(&img_path, [255, 0, 0, 255]);

    let output = stylescope(
        &dir,
        &["analyze", "--type", "image", "--input", img_path.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0));

    let body = stdout_json(&output);
    assert_eq!(body["colors"], serde_json::json!(["#FF0000"]));
    assert_eq!(body["typography"][0]["element"], "Detected Text");
    assert_eq!(body["typography"][0]["fontFamily"], "Unknown (Image Source)");
}

#[test]
fn analyze_writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let img_path = dir.path().join("blue.png");
    let out_path = dir.path().join("result.json");
    write_image(&img_path, [0, 0, 255, 255]);

    let output = stylescope(
        &dir,
        &[
            "analyze",
            "--type",
            "image",
            "--input",
            img_path.to_str().unwrap(),
            "-o",
            out_path.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(0));

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).expect("read output"))
            .expect("output is json");
    assert_eq!(written["colors"], serde_json::json!(["#0000FF"]));
}

#[test]
fn analyze_pdf_file_prints_placeholder_record() {
    let dir = TempDir::new().expect("tempdir");
    let pdf_path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/quarterly-report.pdf");

    let output = stylescope(&dir, &["analyze", "--type", "pdf", "--input", pdf_path]);
    assert_eq!(output.status.code(), Some(0));

    let body = stdout_json(&output);
    assert_eq!(body["colors"], serde_json::json!([]));
    assert_eq!(body["typography"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["typography"][0]["element"], "PDF Content Detect");
    assert_eq!(body["typography"][0]["fontFamily"], "Embedded Fonts");
    assert_eq!(body["typography"][0]["backgroundColor"], "Transparent");
}

#[test]
fn analyze_bad_pdf_exits_with_analysis_failure() {
    let dir = TempDir::new().expect("tempdir");
    let pdf_path = dir.path().join("broken.pdf");
    std::fs::write(&pdf_path, b"this is not a pdf").expect("write pdf");

    let output = stylescope(
        &dir,
        &["analyze", "--type", "pdf", "--input", pdf_path.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));

    let body = stdout_json(&output);
    assert_eq!(body["error"], "PDF analysis failed");
    assert_eq!(body["details"], "Failed to parse PDF");
}

#[test]
fn analyze_rejects_non_http_website() {
    let dir = TempDir::new().expect("tempdir");
    let output = stylescope(&dir, &["analyze", "--type", "website", "--input", "ftp://x"]);

    assert_eq!(output.status.code(), Some(2));
    let body = stdout_json(&output);
    assert_eq!(
        body["error"],
        "Invalid URL. Must start with http:// or https://"
    );
}

#[test]
fn analyze_missing_file_is_invalid_input() {
    let dir = TempDir::new().expect("tempdir");
    let output = stylescope(
        &dir,
        &["analyze", "--type", "image", "--input", "missing.png"],
    );

    assert_eq!(output.status.code(), Some(2));
    let body = stdout_json(&output);
    assert!(body["error"].as_str().unwrap().contains("missing.png"));
    assert_eq!(body["diagnostic"]["category"], "config");
}

#[test]
fn invalid_config_is_invalid_input() {
    let dir = TempDir::new().expect("tempdir");
    let img_path = dir.path().join("red.png");
    let cfg_path = dir.path().join("custom.toml");
    write_image(&img_path, [255, 0, 0, 255]);
    std::fs::write(&cfg_path, "[image]\nsample_step = 0\n").expect("write config");

    let output = stylescope(
        &dir,
        &[
            "analyze",
            "--type",
            "image",
            "--input",
            img_path.to_str().unwrap(),
            "--config",
            cfg_path.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(2));
    let body = stdout_json(&output);
    assert!(body["error"].as_str().unwrap().contains("sample_step"));
}

#[test]
fn local_config_file_is_picked_up() {
    let dir = TempDir::new().expect("tempdir");
    let img_path = dir.path().join("mixed.png");
    let mut img = RgbaImage::from_pixel(2, 1, image::Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
    img.save(&img_path).expect("write image");
    std::fs::write(dir.path().join("stylescope.toml"), "[image]\nsample_step = 1\n")
        .expect("write config");

    let output = stylescope(
        &dir,
        &["analyze", "--type", "image", "--input", img_path.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0));
    let body = stdout_json(&output);
    assert_eq!(body["colors"], serde_json::json!(["#FF0000", "#00FF00"]));
}
