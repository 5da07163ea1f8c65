use sudoku_shell::{
    SurfaceEvent, TextureRecord, TextureSlot,
    data_structures::texture::Sampling,
    resources::{
        assets::{AssetSource, DirAssets},
        texture::TextureLoader,
    },
};

use crate::common::test_utils::{
    Call, RecordingEngine, RecordingGraphics, Upload, renderer_with, write_png,
};

mod common;

#[test]
fn should_record_dimensions_of_a_valid_image() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "board.png", 64, 32);
    let mut loader = TextureLoader::new(Box::new(DirAssets::new(dir.path())));
    let mut graphics = RecordingGraphics::default();

    let record = loader.load(&mut graphics, TextureSlot(3), "board.png");

    assert_eq!(
        record,
        TextureRecord {
            width: 64,
            height: 32
        }
    );
    assert_eq!((loader.width(), loader.height()), (64, 32));
    assert_eq!(
        graphics.uploads,
        vec![Upload {
            slot: TextureSlot(3),
            width: 64,
            height: 32,
            sampling: Sampling::ENGINE,
        }]
    );
    assert_eq!(Sampling::ENGINE.min_filter, wgpu::FilterMode::Nearest);
    assert_eq!(Sampling::ENGINE.mag_filter, wgpu::FilterMode::Linear);
    assert_eq!(Sampling::ENGINE.wrap_u, wgpu::AddressMode::Repeat);
    assert_eq!(Sampling::ENGINE.wrap_v, wgpu::AddressMode::Repeat);
}

#[test]
fn should_leave_zero_dimensions_for_a_missing_asset() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = TextureLoader::new(Box::new(DirAssets::new(dir.path())));
    let mut graphics = RecordingGraphics::default();

    let record = loader.load(&mut graphics, TextureSlot(1), "missing.png");

    assert_eq!(record, TextureRecord::default());
    assert_eq!((loader.width(), loader.height()), (0, 0));
    assert!(graphics.uploads.is_empty());
}

#[test]
fn should_reset_dimensions_when_a_later_load_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "digits.png", 16, 48);
    std::fs::write(dir.path().join("corrupt.png"), b"\x89PNG not really").unwrap();
    let mut loader = TextureLoader::new(Box::new(DirAssets::new(dir.path())));
    let mut graphics = RecordingGraphics::default();

    loader.load(&mut graphics, TextureSlot(1), "digits.png");
    assert_eq!(loader.record(), TextureRecord { width: 16, height: 48 });

    loader.load(&mut graphics, TextureSlot(2), "corrupt.png");
    assert_eq!(loader.record(), TextureRecord::default());
    assert_eq!(graphics.uploads.len(), 1);
}

#[test]
fn should_leave_zero_dimensions_when_the_backend_refuses_an_image() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "wide.png", 64, 1);
    write_png(dir.path(), "small.png", 8, 8);
    let mut loader = TextureLoader::new(Box::new(DirAssets::new(dir.path())));
    let mut graphics = RecordingGraphics {
        max_dimension: Some(32),
        ..Default::default()
    };

    assert_eq!(
        loader.load(&mut graphics, TextureSlot(4), "small.png"),
        TextureRecord { width: 8, height: 8 }
    );
    let record = loader.load(&mut graphics, TextureSlot(5), "wide.png");

    assert_eq!(record, TextureRecord::default());
    assert_eq!((loader.width(), loader.height()), (0, 0));
    assert_eq!(graphics.uploads.len(), 1);
    assert_eq!(graphics.uploads[0].slot, TextureSlot(4));
}

#[test]
fn should_keep_asset_names_inside_the_store() {
    let root = tempfile::tempdir().unwrap();
    let assets_dir = root.path().join("assets");
    std::fs::create_dir(&assets_dir).unwrap();
    write_png(root.path(), "outside.png", 2, 2);
    write_png(&assets_dir, "inside.png", 2, 2);
    let assets = DirAssets::new(&assets_dir);

    assert!(assets.open("inside.png").is_ok());
    assert!(assets.open("./inside.png").is_ok());
    assert!(assets.open("../outside.png").is_err());
    let absolute = root.path().join("outside.png");
    assert!(assets.open(absolute.to_str().unwrap()).is_err());
}

#[test]
fn should_load_textures_requested_by_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "cells.png", 128, 256);
    let mut engine = RecordingEngine::new();
    engine.textures_on_init = vec![
        (TextureSlot(1), String::from("cells.png")),
        (TextureSlot(2), String::from("nope.png")),
    ];
    let log = engine.log();
    let mut renderer = renderer_with(engine, dir.path());

    renderer.handle(SurfaceEvent::SurfaceChanged {
        width: 480,
        height: 800,
    });

    assert_eq!(
        log.lock().unwrap()[..3],
        [
            Call::Init(480, 800),
            Call::TextureLoaded(
                TextureSlot(1),
                TextureRecord {
                    width: 128,
                    height: 256
                }
            ),
            Call::TextureLoaded(TextureSlot(2), TextureRecord::default()),
        ]
    );
    assert_eq!(renderer.texture_record(), TextureRecord::default());
    assert_eq!(renderer.graphics().uploads.len(), 1);
}
