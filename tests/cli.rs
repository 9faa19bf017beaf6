//! Runs the `image-variants` binary against temp image directories.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_image-variants"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn setup(files: &[&str], config: Option<&str>) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    std::fs::create_dir(&images).unwrap();
    for name in files {
        std::fs::write(images.join(name), b"").unwrap();
    }
    if let Some(config) = config {
        std::fs::write(tmp.path().join("image-variants.toml"), config).unwrap();
    }
    tmp
}

const BREAKPOINTS: &str = r#"
[[breakpoints]]
name = "medium"
min_width = "768px"
"#;

#[test]
fn resolve_prints_rules() {
    let tmp = setup(&["hero.jpg", "hero.medium.jpg", "hero.foo.jpg"], Some(BREAKPOINTS));
    let out = run(tmp.path(), &["resolve", "hero.jpg"]);
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("001 hero.jpg"));
    assert!(text.contains("002 hero.medium.jpg"));
    assert!(text.contains("When: @media (min-width: 768px)"));
    assert!(text.contains("Ignoring unknown extensions 'foo'"));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Ignoring unknown extensions 'foo'"));
}

#[test]
fn resolve_json() {
    let tmp = setup(&["hero.jpg", "hero.2x.jpg"], None);
    let out = run(tmp.path(), &["resolve", "hero.jpg", "--json"]);
    assert!(out.status.success());

    let rules: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(rules[0]["image"], "hero.jpg");
    assert_eq!(rules[1]["image"], "hero.2x.jpg");
    assert_eq!(
        rules[1]["condition"]["media"],
        "(-webkit-min-device-pixel-ratio: 1.75), (min-resolution: 168dpi)"
    );
}

#[test]
fn invalid_config_fails() {
    let tmp = setup(&["hero.jpg"], Some("breakpointz = []"));
    let out = run(tmp.path(), &["resolve", "hero.jpg"]);
    assert!(!out.status.success());
}

#[test]
fn check_reports_every_base_image() {
    let tmp = setup(
        &["hero.jpg", "hero.2x.jpg", "cat.png", "cat.wat.png", "notes.txt"],
        None,
    );
    let out = run(tmp.path(), &["check"]);
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("cat.png: 1 rule, 1 diagnostic"));
    assert!(text.contains("hero.jpg: 2 rules"));
    assert!(text.contains("Checked 2 images: 1 with diagnostics, 0 failed"));
}

#[test]
fn check_with_heights_fails_on_unreadable_images() {
    let tmp = setup(&["hero.jpg"], None);
    let out = run(tmp.path(), &["check", "--heights"]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("hero.jpg: FAILED"));
}

#[test]
fn gen_config_is_loadable() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    assert!(image_variants::config::parse_config(&stdout(&out)).is_ok());
}
