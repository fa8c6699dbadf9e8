// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the spritecap application.

pub mod canvas;
pub mod cards;
pub mod properties;
pub mod slots;
pub mod strip;
pub mod timeline;
pub mod toolbar;

use image::RgbaImage;

/// Longest edge of strip and grid thumbnails, in pixels.
pub const THUMBNAIL_EDGE: u32 = 160;

/// Upload an RGBA image as an egui texture.
pub fn texture_from_image(ctx: &egui::Context, name: &str, image: &RgbaImage) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

/// Downscale so the longest edge is at most [`THUMBNAIL_EDGE`].
pub fn thumbnail(image: &RgbaImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let longest = w.max(h);
    if longest <= THUMBNAIL_EDGE {
        return image.clone();
    }
    let scale = THUMBNAIL_EDGE as f32 / longest as f32;
    let tw = ((w as f32 * scale).round() as u32).max(1);
    let th = ((h as f32 * scale).round() as u32).max(1);
    image::imageops::thumbnail(image, tw, th)
}

/// Textures rebuilt wholesale whenever their source revision changes.
#[derive(Default)]
pub struct TextureSet {
    revision: Option<u64>,
    textures: Vec<egui::TextureHandle>,
}

impl TextureSet {
    /// Rebuild thumbnails from `images` if `revision` differs from the last sync.
    pub fn sync<'a>(
        &mut self,
        ctx: &egui::Context,
        name: &str,
        revision: u64,
        images: impl Iterator<Item = &'a RgbaImage>,
    ) {
        if self.revision == Some(revision) {
            return;
        }
        self.textures = images
            .enumerate()
            .map(|(i, img)| texture_from_image(ctx, &format!("{}_{}", name, i), &thumbnail(img)))
            .collect();
        self.revision = Some(revision);
    }

    pub fn get(&self, index: usize) -> Option<&egui::TextureHandle> {
        self.textures.get(index)
    }

    pub fn clear(&mut self) {
        self.revision = None;
        self.textures.clear();
    }
}

/// Display size of a texture scaled to `height` points.
pub fn scaled_to_height(texture: &egui::TextureHandle, height: f32) -> egui::Vec2 {
    let [w, h] = texture.size();
    if h == 0 {
        return egui::vec2(height, height);
    }
    egui::vec2(w as f32 * height / h as f32, height)
}
