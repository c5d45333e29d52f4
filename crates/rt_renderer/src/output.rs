//! Writing rendered images to disk.
//!
//! Full-range output goes to Portable Float Map files; PNG is an 8-bit,
//! gamma-corrected preview.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::renderer::ImageBuffer;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

impl ImageBuffer {
    /// Write the PFM encoding of the image to `writer`.
    ///
    /// Little-endian RGB floats, bottom row first.
    pub fn write_pfm<W: Write>(&self, writer: &mut W) -> OutputResult<()> {
        write!(writer, "PF\n{} {}\n-1.0\n", self.width, self.height)?;
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                let color = self.get(col, row);
                for channel in color.to_array() {
                    writer.write_all(&channel.to_le_bytes())?;
                }
            }
        }
        Ok(())
    }

    /// Save as a Portable Float Map.
    pub fn save_pfm(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_pfm(&mut writer)?;
        writer.flush()?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    /// Save an 8-bit preview (format chosen from the file extension).
    pub fn save_png(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}
