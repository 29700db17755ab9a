//! Mean RGB colors of image regions

use crate::io::decoder::PixelBuffer;
use image::Rgba;
use num_traits::ToPrimitive;

/// Averaged RGB color of a cell or tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSample {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl ColorSample {
    /// Create a sample from its three channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels as an array in RGB order
    pub const fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Squared Euclidean distance in RGB space
    pub const fn distance_squared(self, other: Self) -> u32 {
        let dr = self.red.abs_diff(other.red) as u32;
        let dg = self.green.abs_diff(other.green) as u32;
        let db = self.blue.abs_diff(other.blue) as u32;
        dr * dr + dg * dg + db * db
    }

    /// Per-channel mean over every pixel of an image
    ///
    /// Alpha is ignored. An empty image averages to black.
    pub fn mean_of(image: &PixelBuffer) -> Self {
        Self::mean_of_region(image, 0, 0, image.width(), image.height())
    }

    /// Per-channel mean over a rectangle of an image
    ///
    /// The rectangle is clipped to the image bounds.
    pub fn mean_of_region(image: &PixelBuffer, x: u32, y: u32, width: u32, height: u32) -> Self {
        let x_end = x.saturating_add(width).min(image.width());
        let y_end = y.saturating_add(height).min(image.height());

        let mut sums = [0_u64; 3];
        let mut count = 0_u64;
        for row in y..y_end {
            for col in x..x_end {
                if let Some(pixel) = image.get_pixel_checked(col, row) {
                    for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                        *sum += u64::from(channel);
                    }
                    count += 1;
                }
            }
        }

        let [red, green, blue] = sums.map(|sum| rounded_mean(sum, count));
        Self { red, green, blue }
    }
}

impl From<ColorSample> for Rgba<u8> {
    fn from(color: ColorSample) -> Self {
        Self([color.red, color.green, color.blue, u8::MAX])
    }
}

// Rounds half up and clamps into the channel range
fn rounded_mean(sum: u64, count: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    let mean = (sum as f64 / count as f64).round();
    mean.clamp(0.0, 255.0).to_u8().unwrap_or(u8::MAX)
}
