//! Row-major pixel rasters and image output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::pixel::{Channel, Pixel};

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// A width × height grid of pixels.
///
/// Pixels are stored row by row, from the top row to the bottom row.
/// `(x, y)` addresses column `x` of row `y`, with `y = 0` at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster<T: Channel> {
    width: u32,
    height: u32,
    pixels: Vec<Pixel<T>>,
}

impl<T: Channel> Raster<T> {
    /// Create a new raster filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::black(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel<T>] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Pixel<T> {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel<T>) {
        let i = self.index(x, y);
        self.pixels[i] = pixel;
    }

    /// Whether `other` has the same dimensions.
    pub fn same_shape<U: Channel>(&self, other: &Raster<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn map<U: Channel>(&self, f: impl Fn(Pixel<T>) -> Pixel<U>) -> Raster<U> {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }

    /// Channel-wise mean of rasters with identical dimensions, rounded to
    /// the nearest value.
    ///
    /// Sums are taken in `T::Wide` so that any practical number of inputs
    /// cannot overflow.
    pub fn average(images: &[Raster<T>]) -> Raster<T> {
        assert!(!images.is_empty(), "cannot average zero rasters");
        let first = &images[0];
        assert!(
            images.iter().all(|img| img.same_shape(first)),
            "rasters must share the same dimensions"
        );
        assert!(images.len() <= u32::MAX as usize, "too many rasters to average");
        let count = images.len() as u32;
        let n = T::Wide::from(count);
        let half = T::Wide::from(count / 2);
        let zero = T::Wide::default();

        let pixels = (0..first.pixels.len())
            .map(|i| {
                let (r, g, b) = images.iter().fold((zero, zero, zero), |(r, g, b), img| {
                    let p = img.pixels[i];
                    (r + p.r.widen(), g + p.g.widen(), b + p.b.widen())
                });
                Pixel::new(
                    T::narrow((r + half) / n),
                    T::narrow((g + half) / n),
                    T::narrow((b + half) / n),
                )
            })
            .collect();

        Raster {
            width: first.width,
            height: first.height,
            pixels,
        }
    }

    /// Rescale every pixel to another channel depth.
    pub fn convert<U: Channel>(&self) -> Raster<U> {
        self.map(Pixel::convert)
    }

    /// Apply gamma-2 correction to every pixel.
    pub fn gamma2(&self) -> Raster<T> {
        self.map(Pixel::gamma2)
    }

    /// Write the raster as a plain-text PPM (`P3`) image.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "{}", T::MAX)?;

        for pixel in &self.pixels {
            writeln!(out, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
        }

        Ok(())
    }

    /// Write the raster as a plain PPM file.
    pub fn save_ppm(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl Raster<u8> {
    /// Convert to an `image` buffer for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = self.get(x, y);
            image::Rgb([p.r, p.g, p.b])
        })
    }

    /// Save as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} PNG to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{Pixel16, Pixel8};

    fn gradient(width: u32, height: u32) -> Raster<u8> {
        let mut raster = Raster::new(width, height);
        for y in 0..height {
            for x in 0..width {
                raster.set(x, y, Pixel8::new((x * 40) as u8, (y * 60) as u8, 7));
            }
        }
        raster
    }

    #[test]
    fn test_row_major_layout() {
        let raster = gradient(3, 2);
        assert_eq!(raster.pixels().len(), 6);
        assert_eq!(raster.pixels()[1], Pixel8::new(40, 0, 7));
        assert_eq!(raster.pixels()[3], Pixel8::new(0, 60, 7));
        assert_eq!(raster.get(2, 1), Pixel8::new(80, 60, 7));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds() {
        Raster::<u8>::new(2, 2).get(2, 0);
    }

    #[test]
    fn test_average_identical_is_identity() {
        let raster = gradient(4, 3);
        let copies = vec![raster.clone(); 7];
        assert_eq!(Raster::average(&copies), raster);
    }

    #[test]
    fn test_average_rounds() {
        let mut a = Raster::<u8>::new(1, 1);
        let mut b = Raster::<u8>::new(1, 1);
        a.set(0, 0, Pixel8::new(0, 10, 255));
        b.set(0, 0, Pixel8::new(1, 20, 255));
        assert_eq!(Raster::average(&[a, b]).get(0, 0), Pixel8::new(1, 15, 255));
    }

    #[test]
    fn test_average_wide_channels_do_not_overflow() {
        let mut white = Raster::<u32>::new(1, 1);
        white.set(0, 0, Pixel::white());
        let images = vec![white.clone(); 16];
        assert_eq!(Raster::average(&images), white);
    }

    #[test]
    #[should_panic(expected = "same dimensions")]
    fn test_average_rejects_mismatched_shapes() {
        Raster::average(&[Raster::<u8>::new(1, 2), Raster::<u8>::new(2, 1)]);
    }

    #[test]
    fn test_convert_and_gamma() {
        let mut raster = Raster::<u16>::new(1, 1);
        raster.set(0, 0, Pixel16::from_normalized(0.25, 1.0, 0.0));
        let out = raster.gamma2().convert::<u8>();
        assert_eq!(out.get(0, 0), Pixel8::new(127, 255, 0));
    }

    #[test]
    fn test_write_ppm() {
        let mut raster = Raster::<u8>::new(2, 1);
        raster.set(1, 0, Pixel8::new(255, 128, 0));

        let mut out = Vec::new();
        raster.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n0 0 0\n255 128 0\n");
    }

    #[test]
    fn test_write_ppm_16_bit_header() {
        let raster = Raster::<u16>::new(1, 1);
        let mut out = Vec::new();
        raster.write_ppm(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("P3\n1 1\n65535\n"));
    }

    #[test]
    fn test_to_rgb_image() {
        let raster = gradient(3, 2);
        let image = raster.to_rgb_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [80, 60, 7]);
    }
}
