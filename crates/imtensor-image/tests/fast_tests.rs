use imtensor_image::{
    Bitmap, ImageError, Layout, PixelBuffer, PixelFormat, to_tensor, to_tensor_chw_hw,
    to_tensor_fast,
};

fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

#[test]
fn test_fast_path_matches_general_path() {
    for (width, height) in [(1, 1), (2, 2), (5, 3), (17, 11), (64, 48)] {
        let bitmap = Bitmap::from_bgr(width, height, noise((width * height * 3) as usize, width)).unwrap();

        let fast = to_tensor_fast(&bitmap).unwrap();
        let general = to_tensor_chw_hw(&PixelBuffer::new(&bitmap).unwrap());

        assert_eq!(fast.shape, general.shape, "{width}x{height}");
        assert_eq!(fast.data, general.data, "{width}x{height}");
    }
}

#[test]
fn test_fast_path_honors_wide_stride() {
    // 3 pixels per row (9 bytes) in a 32-byte stride full of junk
    let (width, height, stride) = (3u32, 4u32, 32usize);
    let mut data = noise(stride * height as usize, 99);
    let packed = noise((width * height * 3) as usize, 5);
    for y in 0..height as usize {
        data[y * stride..y * stride + 9].copy_from_slice(&packed[y * 9..y * 9 + 9]);
    }

    let padded = Bitmap::from_raw(width, height, stride, PixelFormat::Bgr24, data).unwrap();
    let tight = Bitmap::from_bgr(width, height, packed).unwrap();

    let from_padded = to_tensor_fast(&padded).unwrap();
    assert_eq!(from_padded.data, to_tensor_fast(&tight).unwrap().data);
    assert_eq!(
        from_padded.data,
        to_tensor(&padded, Layout::ChwHw).unwrap().data
    );
}

#[test]
fn test_fast_path_plane_layout() {
    // stored B, G, R for two pixels
    let bitmap = Bitmap::from_bgr(2, 1, vec![0, 51, 255, 102, 153, 204]).unwrap();
    let tensor = to_tensor_fast(&bitmap).unwrap();

    assert_eq!(tensor.shape, vec![1, 3, 1, 2]);
    assert_eq!(
        tensor.data,
        vec![
            1.0, 204.0 / 255.0, // R plane
            0.2, 0.6, // G plane
            0.0, 0.4, // B plane
        ]
    );
}

#[test]
fn test_fast_path_rejects_other_formats() {
    for format in [PixelFormat::Bgra32, PixelFormat::Gray8] {
        let stride = 4 * format.bytes_per_pixel();
        let bitmap = Bitmap::from_raw(4, 2, stride, format, vec![0; stride * 2]).unwrap();
        let err = to_tensor_fast(&bitmap).unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedPixelFormat(_)));
        assert!(err.to_string().starts_with("unsupported pixel format"));
    }
}
