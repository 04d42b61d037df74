use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgba};

/// Prepares a decoded screenshot for Tesseract.
///
/// Without a threshold the image is only converted to grayscale. With one,
/// bright pixels are turned into black text on a white background.
pub fn prepare_for_ocr(img: &DynamicImage, threshold: Option<u8>) -> GrayImage {
    match threshold {
        Some(t) => threshold_bright_pixels(&img.to_rgba8(), t),
        None => img.to_luma8(),
    }
}

/// Converts image to binary by keeping only bright pixels.
///
/// Pixels where R > threshold AND G > threshold AND B > threshold become black (text).
/// All other pixels become white (background).
pub fn threshold_bright_pixels(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    threshold: u8,
) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        let value = if r > threshold && g > threshold && b > threshold {
            0u8
        } else {
            255u8
        };
        output.put_pixel(x, y, Luma([value]));
    }

    output
}
