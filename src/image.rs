//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use std::io::Cursor;
use std::path::Path;

use png::{BitDepth, ColorType, Decoder, Transformations};

use crate::*;

#[derive(Clone, Debug)]
/// Decoded RGBA8888 image ready for [`Renderer::create_texture`].
pub struct DecodedImage {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Row major RGBA bytes.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Replaces the color of every pixel whose RGB matches `from` with `to`, alpha included.
    pub fn recolor(&mut self, from: Color, to: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            if px[0] == from.r && px[1] == from.g && px[2] == from.b {
                px[0] = to.r;
                px[1] = to.g;
                px[2] = to.b;
                px[3] = to.a;
            }
        }
    }

    /// Applies `(from, to)` swaps taken pairwise from `colours`. A trailing unpaired color is
    /// swapped to `fallback`.
    pub fn swap_colours(&mut self, colours: &[Color], fallback: Color) {
        for pair in colours.chunks(2) {
            match pair {
                [from, to] => self.recolor(*from, *to),
                [from] => self.recolor(*from, fallback),
                _ => (),
            }
        }
    }

    /// Uploads the pixels as a new texture.
    pub fn upload(&self, renderer: &mut dyn Renderer) -> Result<Texture> {
        let id = renderer.create_texture(self.width, self.height, &self.pixels)?;
        Ok(Texture { id, width: self.width, height: self.height })
    }
}

fn image_error(path: &str, reason: impl ToString) -> WidgetError { WidgetError::Image { path: path.to_string(), reason: reason.to_string() } }

/// Reads and decodes a PNG file.
pub fn load_image_file(path: &Path) -> Result<DecodedImage> {
    let name = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| image_error(&name, e))?;
    decode_png(&bytes, &name)
}

/// Grayscale and RGB inputs are expanded to RGBA with an opaque alpha.
fn decode_png(bytes: &[u8], name: &str) -> Result<DecodedImage> {
    let mut cursor = Cursor::new(bytes);
    let mut decoder = Decoder::new(&mut cursor);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|e| image_error(name, format!("PNG decode error: {}", e)))?;
    let buf_size = reader.output_buffer_size().ok_or_else(|| image_error(name, "PNG decoder did not report output size"))?;
    let mut data = vec![0; buf_size];
    let info = reader.next_frame(&mut data).map_err(|e| image_error(name, e))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(image_error(name, format!("unsupported PNG bit depth: {:?}", info.bit_depth)));
    }

    let pixel_size = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Indexed => return Err(image_error(name, "indexed PNGs are not supported")),
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
    };

    let (width, height) = (info.width as usize, info.height as usize);
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let line = &data[y * info.line_size..(y + 1) * info.line_size];
        for px in line[..width * pixel_size].chunks_exact(pixel_size) {
            let rgba = match px {
                [v] => [*v, *v, *v, 0xFF],
                [v, a] => [*v, *v, *v, *a],
                [r, g, b] => [*r, *g, *b, 0xFF],
                [r, g, b, a] => [*r, *g, *b, *a],
                _ => continue,
            };
            pixels.extend_from_slice(&rgba);
        }
    }

    Ok(DecodedImage { width: width as i32, height: height as i32, pixels })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use png::Encoder;

    pub(crate) fn encode_png(color_type: ColorType, data: &[u8], width: u32, height: u32, palette: Option<&[u8]>) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(BitDepth::Eight);
            if let Some(palette) = palette {
                encoder.set_palette(palette);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buffer
    }

    #[test]
    fn png_decode_error_returns_err() {
        assert!(decode_png(&[], "empty").is_err());
    }

    #[test]
    fn png_decode_rgb_expands_alpha() {
        let bytes = encode_png(ColorType::Rgb, &[10, 20, 30], 1, 1, None);
        let img = decode_png(&bytes, "mem").unwrap();
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.pixels, vec![10, 20, 30, 0xFF]);
    }

    #[test]
    fn png_decode_indexed_uses_palette() {
        let palette = [0x01, 0x02, 0x03];
        let bytes = encode_png(ColorType::Indexed, &[0], 1, 1, Some(&palette));
        let img = decode_png(&bytes, "mem").unwrap();
        assert_eq!(img.pixels, vec![1, 2, 3, 255]);
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_image_file(Path::new("no/such/image.png")).unwrap_err();
        assert!(matches!(err, WidgetError::Image { ref path, .. } if path.ends_with("image.png")));
    }

    #[test]
    fn swap_pairs_and_trailing_fallback() {
        let mut img = DecodedImage { width: 3, height: 1, pixels: vec![255, 0, 0, 255, 0, 0, 255, 255, 9, 9, 9, 255] };
        let red = color(255, 0, 0, 255);
        let blue = color(0, 0, 255, 255);
        let half = color(1, 1, 1, 128);
        img.swap_colours(&[red, half, blue], Color::WHITE);
        assert_eq!(&img.pixels[0..4], &[1, 1, 1, 128]);
        assert_eq!(&img.pixels[4..8], &[255, 255, 255, 255]);
        assert_eq!(&img.pixels[8..12], &[9, 9, 9, 255]);
    }
}
