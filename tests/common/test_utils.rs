use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use image::RgbaImage;
use sudoku_shell::{
    Host, NativeEngine, Renderer, TextureRecord, TextureSlot,
    data_structures::texture::Sampling,
    graphics::{Graphics, TextureSink},
    resources::assets::DirAssets,
};

/// One call the shell made into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Init(u32, u32),
    Start,
    Stop,
    Restart,
    Pause,
    Resume,
    Render,
    Reload,
    TouchDown(f32, f32),
    TouchMove(f32, f32),
    TouchUp(f32, f32),
    BackKey,
    TextureLoaded(TextureSlot, TextureRecord),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Engine that records every call. Optionally loads textures during `init`
/// and requests the app be backgrounded on the back key.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: CallLog,
    pub textures_on_init: Vec<(TextureSlot, String)>,
    pub background_on_back: bool,
    pub panic_on_back: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CallLog {
        self.calls.clone()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl NativeEngine<RecordingGraphics> for RecordingEngine {
    fn init(&mut self, host: &mut Host<'_, RecordingGraphics>, width: u32, height: u32) {
        self.push(Call::Init(width, height));
        for (slot, name) in self.textures_on_init.clone() {
            let record = host.load_texture(slot, &name);
            assert_eq!(record.width, host.texture_width());
            assert_eq!(record.height, host.texture_height());
            self.push(Call::TextureLoaded(slot, record));
        }
    }

    fn start(&mut self, _: &mut Host<'_, RecordingGraphics>) {
        self.push(Call::Start);
    }

    fn stop(&mut self, _: &mut Host<'_, RecordingGraphics>) {
        self.push(Call::Stop);
    }

    fn restart(&mut self, _: &mut Host<'_, RecordingGraphics>) {
        self.push(Call::Restart);
    }

    fn pause(&mut self, _: &mut Host<'_, RecordingGraphics>) {
        self.push(Call::Pause);
    }

    fn resume(&mut self, _: &mut Host<'_, RecordingGraphics>) {
        self.push(Call::Resume);
    }

    fn render(&mut self, host: &mut Host<'_, RecordingGraphics>) {
        self.push(Call::Render);
        host.graphics().frames += 1;
    }

    fn reload(&mut self, _: &mut Host<'_, RecordingGraphics>) {
        self.push(Call::Reload);
    }

    fn touch_down(&mut self, _: &mut Host<'_, RecordingGraphics>, x: f32, y: f32) {
        self.push(Call::TouchDown(x, y));
    }

    fn touch_move(&mut self, _: &mut Host<'_, RecordingGraphics>, x: f32, y: f32) {
        self.push(Call::TouchMove(x, y));
    }

    fn touch_up(&mut self, _: &mut Host<'_, RecordingGraphics>, x: f32, y: f32) {
        self.push(Call::TouchUp(x, y));
    }

    fn back_key(&mut self, host: &mut Host<'_, RecordingGraphics>) {
        if self.panic_on_back {
            panic!("engine crashed on back key");
        }
        self.push(Call::BackKey);
        if self.background_on_back {
            host.move_task_to_back();
        }
    }
}

/// One texture upload seen by the graphics backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub slot: TextureSlot,
    pub width: u32,
    pub height: u32,
    pub sampling: Sampling,
}

/// Backend that records what the renderer asks of it. Uploads larger than
/// `max_dimension` are refused, like a device limit.
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    pub uploads: Vec<Upload>,
    pub surfaces_created: u32,
    pub surfaces_destroyed: u32,
    pub sizes: Vec<(u32, u32)>,
    pub frames: u32,
    pub max_dimension: Option<u32>,
}

impl TextureSink for RecordingGraphics {
    fn upload(
        &mut self,
        slot: TextureSlot,
        rgba: &RgbaImage,
        sampling: &Sampling,
    ) -> anyhow::Result<()> {
        if let Some(max) = self.max_dimension {
            anyhow::ensure!(rgba.width() <= max && rgba.height() <= max, "too large");
        }
        self.uploads.push(Upload {
            slot,
            width: rgba.width(),
            height: rgba.height(),
            sampling: *sampling,
        });
        Ok(())
    }
}

impl Graphics for RecordingGraphics {
    fn surface_created(&mut self) -> anyhow::Result<()> {
        self.surfaces_created += 1;
        Ok(())
    }

    fn surface_destroyed(&mut self) {
        self.surfaces_destroyed += 1;
    }

    fn surface_changed(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }
}

/// Write a `width` x `height` PNG named `name` below `dir`.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 0x80, 0xff])
    });
    img.save(dir.join(name)).unwrap();
}

pub fn renderer_with(
    engine: RecordingEngine,
    assets: &Path,
) -> Renderer<RecordingEngine, RecordingGraphics> {
    Renderer::new(
        engine,
        RecordingGraphics::default(),
        Box::new(DirAssets::new(assets)),
        assets,
    )
}

/// Every call except frames, for assertions that should not depend on
/// frame timing.
pub fn without_frames(log: &CallLog) -> Vec<Call> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|call| **call != Call::Render)
        .cloned()
        .collect()
}
