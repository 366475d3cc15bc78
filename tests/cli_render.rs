//! CLI integration tests for `pxm render`, `pxm paint` and `pxm show`.
//!
//! Every run pins its settings with `--config tests/fixtures/pxm.toml`
//! (10px cells, 1px gaps at 100% zoom), so a 3x3 grid renders at 32x32.

use image::Rgba;
use std::path::{Path, PathBuf};
use std::process::Command;

const SETTINGS: &str = "tests/fixtures/pxm.toml";
const SCENARIO: &str = "tests/fixtures/scenario.json";

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INACTIVE: Rgba<u8> = Rgba([0xf5, 0xf5, 0xf5, 255]);
const GAP: Rgba<u8> = Rgba([0xd0, 0xd0, 0xd0, 255]);

/// Get the path to the pxm binary.
fn pxm_binary() -> PathBuf {
    let release = Path::new("target/release/pxm");
    if release.exists() {
        return release.to_path_buf();
    }
    let debug = Path::new("target/debug/pxm");
    if debug.exists() {
        return debug.to_path_buf();
    }
    panic!("pxm binary not found. Run 'cargo build' first.");
}

/// Run pxm with the fixture settings and return (stdout, stderr, exit code).
fn run_pxm(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(pxm_binary())
        .args(["--config", SETTINGS])
        .args(args)
        .output()
        .expect("Failed to execute pxm");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

/// Pixel at the top-left corner of cell `(row, col)`.
fn cell_pixel(image: &image::RgbaImage, row: u32, col: u32) -> Rgba<u8> {
    *image.get_pixel(col * 11, row * 11)
}

fn open(path: &Path) -> image::RgbaImage {
    image::open(path).expect("output should be a readable PNG").to_rgba8()
}

// ============================================================================
// render
// ============================================================================

#[test]
fn test_render_edit_view() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("edit.png");

    let (stdout, stderr, code) = run_pxm(&["render", SCENARIO, "-o", out.to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Saved:"));

    let image = open(&out);
    assert_eq!(image.dimensions(), (32, 32));
    assert_eq!(cell_pixel(&image, 0, 0), WHITE);
    assert_eq!(cell_pixel(&image, 1, 1), INACTIVE);
    assert_eq!(*image.get_pixel(10, 0), GAP);
}

#[test]
fn test_render_preview() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("preview.png");

    let (_, stderr, code) =
        run_pxm(&["render", SCENARIO, "--preview", "-o", out.to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let image = open(&out);
    assert_eq!(cell_pixel(&image, 0, 0), RED);
    assert_eq!(cell_pixel(&image, 0, 2), BLUE);
    assert_eq!(cell_pixel(&image, 2, 0), GREEN);
    assert_eq!(cell_pixel(&image, 1, 1), INACTIVE);
}

#[test]
fn test_render_pixel_size_and_zoom() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("big.png");

    let (_, stderr, code) = run_pxm(&[
        "render", SCENARIO, "--pixel-size", "4", "--zoom", "2", "-o", out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    // 8px cells, 2px gaps
    assert_eq!(open(&out).dimensions(), (28, 28));
}

#[test]
fn test_render_into_directory_uses_default_name() {
    let dir = tempfile::TempDir::new().unwrap();
    let target = format!("{}/", dir.path().join("exports").display());

    let (_, stderr, code) = run_pxm(&["render", SCENARIO, "-o", &target]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(dir.path().join("exports").join("pixel-matrix.png").exists());
}

#[test]
fn test_render_missing_field_reports_fixed_message() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("never.png");

    let (_, stderr, code) =
        run_pxm(&["render", "tests/fixtures/missing_field.json", "-o", out.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("configuration must contain numColorMap, borderColorMap and matrix fields"));
    assert!(!out.exists());
}

#[test]
fn test_render_ragged_matrix_is_rejected() {
    let (_, stderr, code) = run_pxm(&["render", "tests/fixtures/ragged.json", "-o", "/dev/null"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("row 1"), "stderr: {}", stderr);
}

#[test]
fn test_render_nonexistent_input() {
    let (_, stderr, code) = run_pxm(&["render", "tests/fixtures/nope.json"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Cannot open input file"));
}

#[test]
fn test_render_bad_color_lenient_and_strict() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("bad.png");

    let (_, stderr, code) = run_pxm(&[
        "render", "tests/fixtures/bad_color.json", "--preview", "-o", out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stderr.contains("not-a-color"));
    assert_eq!(cell_pixel(&open(&out), 0, 0), Rgba([255, 0, 255, 255]));

    let strict_out = dir.path().join("strict.png");
    let (_, _, code) = run_pxm(&[
        "render",
        "tests/fixtures/bad_color.json",
        "--preview",
        "--strict",
        "-o",
        strict_out.to_str().unwrap(),
    ]);
    assert_eq!(code, 1);
    assert!(!strict_out.exists());
}

// ============================================================================
// paint
// ============================================================================

#[test]
fn test_paint_flood_then_single_cell() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("painted.png");

    let (_, stderr, code) = run_pxm(&[
        "paint",
        SCENARIO,
        "--color",
        "#ff0000",
        "--at",
        "0,0",
        "--at",
        "0,2",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stderr.contains("Filled 3 cell(s) from 0,0"));
    assert!(stderr.contains("Painted 0,2"));

    let image = open(&out);
    for (r, c) in [(0, 0), (0, 1), (1, 0), (0, 2)] {
        assert_eq!(cell_pixel(&image, r, c), RED, "cell ({}, {})", r, c);
    }
    for (r, c) in [(1, 2), (2, 0), (2, 1), (2, 2)] {
        assert_eq!(cell_pixel(&image, r, c), WHITE, "cell ({}, {})", r, c);
    }
    assert_eq!(cell_pixel(&image, 1, 1), INACTIVE);
}

#[test]
fn test_paint_by_key() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("blue.png");

    let (_, stderr, code) =
        run_pxm(&["paint", SCENARIO, "--color", "2", "--at", "1,2", "-o", out.to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let image = open(&out);
    for r in 0..3 {
        assert_eq!(cell_pixel(&image, r, 2), BLUE, "row {}", r);
    }
    assert_eq!(cell_pixel(&image, 0, 0), WHITE);
}

#[test]
fn test_paint_out_of_bounds_is_ignored() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("same.png");

    let (_, stderr, code) = run_pxm(&[
        "paint", SCENARIO, "--color", "#ff0000", "--at", "5,5", "-o", out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stderr.contains("ignored: OutOfBounds"));
    assert_eq!(cell_pixel(&open(&out), 0, 0), WHITE);
}

#[test]
fn test_paint_requires_coordinates() {
    let (_, _, code) = run_pxm(&["paint", SCENARIO, "--color", "#ff0000"]);
    assert_eq!(code, 2);

    let (_, _, code) = run_pxm(&["paint", SCENARIO, "--color", "#ff0000", "--at", "1"]);
    assert_eq!(code, 2);
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_plain_when_piped() {
    let (stdout, stderr, code) = run_pxm(&["show", SCENARIO]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    // stdout is a pipe here, so the plain coordinate view is used
    assert!(!stdout.contains("\x1b["));
    assert!(stdout.contains(" 0 \u{2502}  1  1  2"));
    assert!(stdout.contains("  2 = #0000ff"));
    assert!(stdout.contains("  A = #222222 (border)"));
    assert!(stdout.contains("3 x 3 cells"));
}
