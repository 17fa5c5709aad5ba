//! Deterministic PNG reading and writing.
//!
//! Writing uses fixed compression settings so the same canvas always encodes
//! to the same bytes.

use std::io::{Read, Write};
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType, Transformations};
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unsupported PNG format: {0}")]
    Unsupported(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a pixel buffer as 8-bit RGBA PNG to any writer.
///
/// The buffer's top row becomes the first image row.
pub fn write_rgba_to_writer<W: Write>(
    buffer: &PixelBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode a {}x{} image",
            buffer.width, buffer.height
        )));
    }

    let mut encoder = Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate doesn't add timestamps or other variable metadata
    let mut png_writer = encoder.write_header()?;

    let data = buffer.to_rgba8_top_down();
    png_writer.write_image_data(&data)?;

    Ok(())
}

/// Write a pixel buffer to a PNG file.
pub fn write_rgba(buffer: &PixelBuffer, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    write_rgba_to_writer(buffer, writer, config)
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Write to a Vec<u8> and return the hash.
pub fn write_rgba_to_vec_with_hash(
    buffer: &PixelBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Decode a PNG into an RGBA pixel buffer.
///
/// Palette, grayscale, and RGB images are expanded to RGBA; 16-bit channels
/// are reduced to 8 bits.
pub fn read_rgba<R: Read>(reader: R) -> Result<PixelBuffer, PngError> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut raw = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut raw)?;
    raw.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::Unsupported(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let rgba: Vec<u8> = match info.color_type {
        ColorType::Rgba => raw,
        ColorType::Rgb => raw
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ColorType::GrayscaleAlpha => raw
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => raw.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        ColorType::Indexed => {
            return Err(PngError::Unsupported("unexpanded indexed color".to_string()))
        }
    };

    PixelBuffer::from_rgba8_top_down(info.width, info.height, &rgba).ok_or_else(|| {
        PngError::InvalidDimensions(format!(
            "decoded {} bytes for a {}x{} image",
            rgba.len(),
            info.width,
            info.height
        ))
    })
}

/// Decode a PNG file into an RGBA pixel buffer.
pub fn read_rgba_file(path: &Path) -> Result<PixelBuffer, PngError> {
    let file = std::fs::File::open(path)?;
    read_rgba(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritebake_spec::Rgba8;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height, Rgba8::CLEAR);
        for y in 0..height {
            for x in 0..width {
                buffer.set(x, y, Rgba8::new((x * 4) as u8, (y * 4) as u8, 128, (x + y) as u8));
            }
        }
        buffer
    }

    #[test]
    fn test_rgba_deterministic() {
        let buffer = gradient(64, 64);
        let config = PngConfig::default();

        let (data1, hash1) = write_rgba_to_vec_with_hash(&buffer, &config).unwrap();
        let (data2, hash2) = write_rgba_to_vec_with_hash(&buffer, &config).unwrap();

        assert_eq!(data1, data2, "PNG data should be identical");
        assert_eq!(hash1, hash2, "PNG hashes should be identical");
    }

    #[test]
    fn test_lossless_including_alpha() {
        let buffer = gradient(16, 8);
        let config = PngConfig {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        };
        let (data, _) = write_rgba_to_vec_with_hash(&buffer, &config).unwrap();
        let decoded = read_rgba(std::io::Cursor::new(data)).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_bottom_row_is_last_image_row() {
        let mut buffer = PixelBuffer::new(1, 2, Rgba8::WHITE);
        buffer.set(0, 0, Rgba8::BLACK);
        let (data, _) = write_rgba_to_vec_with_hash(&buffer, &PngConfig::default()).unwrap();

        let decoder = Decoder::new(std::io::Cursor::new(data));
        let mut reader = decoder.read_info().unwrap();
        let mut raw = vec![0u8; reader.output_buffer_size()];
        reader.next_frame(&mut raw).unwrap();

        assert_eq!(&raw[0..4], &[255, 255, 255, 255]);
        assert_eq!(&raw[4..8], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_decode_rgb_adds_opaque_alpha() {
        let mut data = Vec::new();
        {
            let mut encoder = Encoder::new(&mut data, 2, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 20, 30, 40, 50, 60]).unwrap();
        }

        let decoded = read_rgba(std::io::Cursor::new(data)).unwrap();
        assert_eq!(decoded.get(0, 0), Rgba8::new(10, 20, 30, 255));
        assert_eq!(decoded.get(1, 0), Rgba8::new(40, 50, 60, 255));
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let buffer = PixelBuffer::new(0, 4, Rgba8::CLEAR);
        let result = write_rgba_to_vec_with_hash(&buffer, &PngConfig::default());
        assert!(matches!(result, Err(PngError::InvalidDimensions(_))));
    }
}
