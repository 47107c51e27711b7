//! Rendering saved flags back through the palette.

mod common;

use flagmaker::error::FlagError;
use pretty_assertions::assert_eq;

use common::fixtures::{self, colors};
use common::TestApp;

fn rgb(color: [u8; 4]) -> image::Rgb<u8> {
    image::Rgb([color[0], color[1], color[2]])
}

#[tokio::test]
async fn test_preview_solid_flag() {
    let app = TestApp::new();
    let source = app.solid_source("green.png", colors::GREEN);

    let pipeline = app.pipeline();
    pipeline.generate(&source).await.unwrap();
    let png = pipeline.preview("green", 1).await.unwrap();

    let decoded = common::assert_png(&png);
    assert_eq!(decoded.dimensions(), (100, 66));
    assert!(decoded.pixels().all(|p| *p == rgb(colors::GREEN)));
}

#[tokio::test]
async fn test_preview_is_upright_and_scaled() {
    let app = TestApp::new();
    let source = app.path("sky.png");
    fixtures::write_split_horizontal(&source, 200, 132, colors::BLUE, colors::RED);

    let pipeline = app.pipeline();
    pipeline.generate(&source).await.unwrap();
    let png = pipeline.preview("sky", 2).await.unwrap();

    let decoded = common::assert_png(&png);
    assert_eq!(decoded.dimensions(), (200, 132));
    assert_eq!(*decoded.get_pixel(0, 0), rgb(colors::BLUE));
    assert_eq!(*decoded.get_pixel(199, 131), rgb(colors::RED));
}

#[tokio::test]
async fn test_preview_by_path() {
    let app = TestApp::new();
    let source = app.solid_source("white.png", colors::WHITE);

    let pipeline = app.pipeline();
    let report = pipeline.generate(&source).await.unwrap();
    let path = report.saved_to.to_string_lossy().into_owned();

    let decoded = common::assert_png(&pipeline.preview(&path, 1).await.unwrap());
    assert_eq!(*decoded.get_pixel(42, 17), rgb(colors::WHITE));
}

#[tokio::test]
async fn test_preview_rejects_bad_scale() {
    let app = TestApp::new();
    let source = app.solid_source("red.png", colors::RED);

    let pipeline = app.pipeline();
    pipeline.generate(&source).await.unwrap();

    assert!(matches!(
        pipeline.preview("red", 0).await,
        Err(FlagError::Preview(_))
    ));
}

#[tokio::test]
async fn test_preview_of_corrupt_flag() {
    let app = TestApp::new();
    let pipeline = app.pipeline();
    std::fs::write(app.saved_flags_dir().join("broken.txt"), "0.5:0.5,oops").unwrap();

    assert!(matches!(
        pipeline.preview("broken", 1).await,
        Err(FlagError::InvalidFlag(_))
    ));
}
