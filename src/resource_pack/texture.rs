//! Font texture loading.

/// Raw texture data loaded from PNG.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Create a new texture from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get a pixel at (x, y), or transparent black outside the texture.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = ((y * self.width + x) * 4) as usize;
        match self.pixels.get(idx..idx + 4) {
            Some(&[r, g, b, a]) => [r, g, b, a],
            _ => [0; 4],
        }
    }

    /// Rightmost column holding a non-transparent pixel within the
    /// `w`×`h` cell at (`x`, `y`), plus one. Zero for an empty cell.
    pub fn opaque_extent(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        let mut max_x = 0;
        for py in 0..h {
            for px in (max_x..w).rev() {
                if self.get_pixel(x + px, y + py)[3] > 0 {
                    max_x = px + 1;
                    break;
                }
            }
        }
        max_x
    }
}

/// Load a texture from PNG bytes.
pub fn load_texture_from_bytes(data: &[u8]) -> Result<TextureData, image::ImageError> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_pixel() {
        let tex = TextureData::new(2, 2, vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255]);

        assert_eq!(tex.get_pixel(0, 0), [255, 0, 0, 255]); // Red
        assert_eq!(tex.get_pixel(1, 0), [0, 255, 0, 255]); // Green
        assert_eq!(tex.get_pixel(0, 1), [0, 0, 255, 255]); // Blue
        assert_eq!(tex.get_pixel(1, 1), [255, 255, 255, 255]); // White
        assert_eq!(tex.get_pixel(2, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_opaque_extent() {
        // 4x2, opaque at (1, 0) and (2, 1).
        let mut pixels = vec![0u8; 4 * 2 * 4];
        pixels[(1 * 4) + 3] = 255;
        pixels[((4 + 2) * 4) + 3] = 10;
        let tex = TextureData::new(4, 2, pixels);

        assert_eq!(tex.opaque_extent(0, 0, 4, 2), 3);
        assert_eq!(tex.opaque_extent(0, 0, 2, 1), 2);
        assert_eq!(tex.opaque_extent(3, 0, 1, 2), 0);
    }

    #[test]
    fn test_load_texture_from_bytes() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let tex = load_texture_from_bytes(&png).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(tex.get_pixel(2, 1), [1, 2, 3, 4]);
        assert!(load_texture_from_bytes(b"not a png").is_err());
    }
}
