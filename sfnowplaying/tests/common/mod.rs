#![allow(dead_code)]

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb as PixelRgb, RgbImage};
use sfcovers::Rgb;
use sfnowplaying::{ArtProcessor, CoverProcessor, PlaybackSnapshot, PlaybackSource};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Source pilotable : snapshot courant, pochettes par URL, pannes et latence
#[derive(Default)]
pub struct FakeSource {
    snapshot: Mutex<Option<PlaybackSnapshot>>,
    art: Mutex<HashMap<String, Vec<u8>>>,
    fail_playback: Mutex<bool>,
    playback_delay: Mutex<Option<Duration>>,
    fetch_delay: Mutex<Option<Duration>>,
    pub playback_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&self, snapshot: PlaybackSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    pub fn stop(&self) {
        *self.snapshot.lock().unwrap() = None;
    }

    pub fn set_art(&self, url: &str, bytes: Vec<u8>) {
        self.art.lock().unwrap().insert(url.to_string(), bytes);
    }

    pub fn remove_art(&self, url: &str) {
        self.art.lock().unwrap().remove(url);
    }

    pub fn fail_playback(&self, fail: bool) {
        *self.fail_playback.lock().unwrap() = fail;
    }

    pub fn delay_playback(&self, delay: Duration) {
        *self.playback_delay.lock().unwrap() = Some(delay);
    }

    pub fn delay_fetch(&self, delay: Duration) {
        *self.fetch_delay.lock().unwrap() = Some(delay);
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaybackSource for FakeSource {
    async fn currently_playing(&self) -> anyhow::Result<Option<PlaybackSnapshot>> {
        self.playback_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.playback_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_playback.lock().unwrap() {
            anyhow::bail!("connection refused");
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn fetch_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.art
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("HTTP 404 for {}", url))
    }
}

/// Processeur qui compte les appels et délègue à `CoverProcessor`
#[derive(Default)]
pub struct CountingProcessor {
    pub decode_calls: AtomicUsize,
    pub color_calls: AtomicUsize,
    pub render_calls: AtomicUsize,
}

impl CountingProcessor {
    pub fn decodes(&self) -> usize {
        self.decode_calls.load(Ordering::SeqCst)
    }

    pub fn colors(&self) -> usize {
        self.color_calls.load(Ordering::SeqCst)
    }

    pub fn renders(&self) -> usize {
        self.render_calls.load(Ordering::SeqCst)
    }
}

impl ArtProcessor for CountingProcessor {
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<DynamicImage> {
        self.decode_calls.fetch_add(1, Ordering::SeqCst);
        CoverProcessor.decode(bytes)
    }

    fn dominant_color(&self, image: &DynamicImage) -> Rgb {
        self.color_calls.fetch_add(1, Ordering::SeqCst);
        CoverProcessor.dominant_color(image)
    }

    fn render(&self, image: &DynamicImage, size: u32) -> anyhow::Result<Vec<u8>> {
        self.render_calls.fetch_add(1, Ordering::SeqCst);
        CoverProcessor.render(image, size)
    }
}

pub fn snapshot(id: &str, art_url: Option<&str>) -> PlaybackSnapshot {
    PlaybackSnapshot {
        track_id: id.to_string(),
        title: format!("Title {id}"),
        artists: vec!["First".to_string(), "Second".to_string()],
        album_art_url: art_url.map(str::to_string),
        is_playing: true,
    }
}

/// PNG uni de dimensions données
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, PixelRgb(color));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

pub fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).unwrap();
    (img.width(), img.height())
}
