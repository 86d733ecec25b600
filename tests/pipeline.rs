use image::{DynamicImage, Rgba, RgbaImage};
use image_quantize_wasm::{
    QuantizeError, QuantizeOptions, encode_png, pixel_dataset, quantize_bytes, quantize_dataset,
    quantize_image, run_kmeans,
};

fn stripes(width: u32, height: u32) -> DynamicImage {
    let colors = [
        Rgba([200, 30, 30, 255]),
        Rgba([30, 200, 30, 255]),
        Rgba([30, 30, 200, 255]),
    ];
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |_, y| {
        colors[(y * 3 / height) as usize]
    }))
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255])
    }))
}

#[test]
fn downsampled_palette_remaps_full_resolution() {
    let img = gradient(120, 80);
    let options = QuantizeOptions {
        k: 4,
        max_pixels: Some(500),
        ..Default::default()
    };
    let out = quantize_image(&img, &options).unwrap();

    assert_eq!(out.image.dimensions(), (120, 80));
    assert_eq!(out.palette.len(), 4);

    let full = pixel_dataset(&img, None);
    let expected = quantize_dataset(&full, &out.palette).unwrap();
    let actual = pixel_dataset(&DynamicImage::ImageRgba8(out.image.clone()), None);
    for (e, a) in expected.iter().zip(&actual) {
        for (x, y) in e.iter().zip(a) {
            assert!((x - y).abs() <= 0.5);
        }
    }
}

#[test]
fn image_quantization_is_deterministic() {
    let img = gradient(64, 64);
    let options = QuantizeOptions {
        k: 5,
        max_pixels: Some(1000),
        ..Default::default()
    };
    let a = quantize_image(&img, &options).unwrap();
    let b = quantize_image(&img, &options).unwrap();
    assert_eq!(a.palette, b.palette);
    assert_eq!(a.image, b.image);
}

#[test]
fn three_stripes_keep_their_colors() {
    let img = stripes(9, 9);
    let dataset = pixel_dataset(&img, None);
    let palette = run_kmeans(&dataset, 3).unwrap();
    let mut colors: Vec<_> = palette.colors().to_vec();
    colors.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(
        colors,
        vec![
            vec![30.0, 30.0, 200.0, 255.0],
            vec![30.0, 200.0, 30.0, 255.0],
            vec![200.0, 30.0, 30.0, 255.0],
        ]
    );
    assert_eq!(quantize_dataset(&dataset, &palette).unwrap(), dataset);
}

#[test]
fn bytes_round_trip_through_png() {
    let img = stripes(12, 6);
    let png = encode_png(&img.to_rgba8()).unwrap();
    let options = QuantizeOptions {
        k: 3,
        ..Default::default()
    };
    let (out, palette) = quantize_bytes(&png, &options).unwrap();

    let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
    assert_eq!(decoded, img.to_rgba8());
    assert_eq!(palette.len(), 3);
    for hex in &palette {
        assert_eq!(hex.len(), 6);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}

#[test]
fn invalid_inputs_surface_as_errors() {
    let err = quantize_bytes(b"not an image", &QuantizeOptions::default()).unwrap_err();
    assert!(matches!(err, QuantizeError::Image(_)));
    assert!(!err.is_invalid_input());

    let img = stripes(3, 3);
    let options = QuantizeOptions {
        k: 0,
        ..Default::default()
    };
    let err = quantize_image(&img, &options).unwrap_err();
    assert!(matches!(err, QuantizeError::InvalidK(0)));
    assert!(err.is_invalid_input());
}
