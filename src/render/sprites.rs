//! Sprite cache keyed by building type.
//!
//! Sprites are decoded off the UI thread and handed over through a channel.
//! The cache never touches game state; the draw code asks it for a sprite
//! and falls back to a flat color when none has arrived.

use crate::city::BuildingType;
use crate::core::error::{CityError, Result};
use ahash::AHashMap;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};

/// Pixels with alpha below this are treated as transparent
const ALPHA_CUTOFF: u8 = 128;

/// A sprite downsampled to the pixel footprint of one grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Sprite {
    /// Resize `image` to `width` x `height` pixels
    pub fn from_image(image: &DynamicImage, width: u32, height: u32) -> Self {
        let rgba = image
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgba8();
        let pixels = rgba.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode a PNG (or any format `image` understands) from disk
    pub fn load(path: &Path, width: u32, height: u32) -> Result<Self> {
        let image = image::open(path)
            .map_err(|e| CityError::Sprite(format!("{}: {e}", path.display())))?;
        Ok(Self::from_image(&image, width, height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB at (x, y), `None` if out of range or transparent
    pub fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[(y * self.width + x) as usize];
        (a >= ALPHA_CUTOFF).then_some((r, g, b))
    }
}

/// Result of one background load
type SpriteLoad = (BuildingType, Result<Sprite>);

/// Sprites that have finished loading, plus the channel still delivering the rest
#[derive(Debug, Default)]
pub struct SpriteCache {
    sprites: AHashMap<BuildingType, Sprite>,
    pending: Option<UnboundedReceiver<SpriteLoad>>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start decoding `<assets_dir>/<type>.png` for every building type.
    ///
    /// Returns immediately; call [`SpriteCache::poll`] to collect results.
    pub fn spawn_loading(runtime: &Handle, assets_dir: &Path, width: u32, height: u32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        for building_type in BuildingType::ALL {
            let tx = tx.clone();
            let path = sprite_path(assets_dir, building_type);
            runtime.spawn_blocking(move || {
                let result = Sprite::load(&path, width, height);
                // receiver gone means the UI already exited
                let _ = tx.send((building_type, result));
            });
        }
        Self {
            sprites: AHashMap::new(),
            pending: Some(rx),
        }
    }

    /// Drain finished loads without blocking. Returns true if a sprite arrived.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };

        let mut arrived = false;
        loop {
            match rx.try_recv() {
                Ok((building_type, Ok(sprite))) => {
                    tracing::debug!(building = %building_type, "Sprite loaded");
                    self.sprites.insert(building_type, sprite);
                    arrived = true;
                }
                Ok((building_type, Err(e))) => {
                    tracing::warn!(
                        building = %building_type,
                        error = %e,
                        "Sprite unavailable, using fallback color"
                    );
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.pending = None;
                    break;
                }
            }
        }
        arrived
    }

    /// True once every load has reported back
    pub fn is_settled(&self) -> bool {
        self.pending.is_none()
    }

    pub fn insert(&mut self, building_type: BuildingType, sprite: Sprite) {
        self.sprites.insert(building_type, sprite);
    }

    pub fn get(&self, building_type: BuildingType) -> Option<&Sprite> {
        self.sprites.get(&building_type)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Where the sprite for a building type lives
pub fn sprite_path(assets_dir: &Path, building_type: BuildingType) -> PathBuf {
    assets_dir.join(format!("{}.png", building_type.key()))
}
