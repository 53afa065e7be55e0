use crates_image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use imtensor_image::{
    Bitmap, ImageError, Layout, PixelFormat, decode_bitmap, decode_bitmap_blocking, to_tensor,
};
use std::io::Cursor;

fn encode_png(image: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn sample_rgb() -> RgbImage {
    RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 80, y as u8 * 100, 7]))
}

#[tokio::test]
async fn test_decode_png_to_bgr_bitmap() {
    let bitmap = decode_bitmap(&encode_png(&sample_rgb())).await.unwrap();

    assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
    assert_eq!(bitmap.format(), PixelFormat::Bgr24);
    assert_eq!(bitmap.stride(), 12);

    let bits = bitmap.lock_bits();
    // pixel (2, 1) is R=160, G=100, B=7, stored as B, G, R
    assert_eq!(&bits.row(1)[6..9], &[7, 100, 160]);
}

#[tokio::test]
async fn test_decode_invalid_data() {
    let result = decode_bitmap(&[0, 1, 2, 3, 4]).await;
    assert!(matches!(result, Err(ImageError::Decode(_))));
}

#[test]
fn test_decode_blocking_drops_alpha() {
    let rgba = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]));
    let mut buf = Cursor::new(Vec::new());
    rgba.write_to(&mut buf, ImageFormat::Png).unwrap();

    let bitmap = decode_bitmap_blocking(buf.get_ref()).unwrap();
    assert_eq!(bitmap.to_packed(), [30, 20, 10].repeat(4));
}

#[test]
fn test_decoded_tensor_is_rgb() {
    let bitmap = decode_bitmap_blocking(&encode_png(&sample_rgb())).unwrap();
    let tensor = to_tensor(&bitmap, Layout::ChwHw).unwrap();

    // R plane at (x=2, y=1)
    assert_eq!(tensor.get(&[0, 0, 1, 2]), Some(&(160.0 / 255.0)));
    // B plane is constant 7
    assert!(tensor.data[12..].iter().all(|&v| v == 7.0 / 255.0));
}

#[test]
fn test_rgb_image_round_trip_through_padded_bitmap() {
    let image = sample_rgb();
    let bitmap = Bitmap::from_rgb_image(&image).unwrap();
    assert_eq!(bitmap.to_rgb_image().unwrap(), image);
}

#[test]
fn test_to_rgb_image_rejects_non_bgr24() {
    let bitmap = Bitmap::from_raw(1, 1, 4, PixelFormat::Gray8, vec![0; 4]).unwrap();
    assert!(matches!(
        bitmap.to_rgb_image(),
        Err(ImageError::InvalidImageFormat(PixelFormat::Gray8))
    ));
}

#[test]
fn test_from_empty_rgb_image() {
    let image = RgbImage::new(0, 3);
    assert!(matches!(
        Bitmap::from_rgb_image(&image),
        Err(ImageError::InvalidDimensions { width: 0, height: 3 })
    ));
}
