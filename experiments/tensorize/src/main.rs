use imtensor_image::{Layout, PreprocessConfig, ResizeMode, Tensor, decode_bitmap, preprocess};
use std::env;
use std::path::PathBuf;
use std::time::Instant;

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Per-channel (min, max, mean) of a tensor in the given layout.
fn channel_stats(tensor: &Tensor<f32>, layout: Layout) -> [(f32, f32, f32); 3] {
    let mut stats = [(f32::INFINITY, f32::NEG_INFINITY, 0.0f64); 3];
    let per_channel = tensor.len() / 3;

    for (i, &v) in tensor.data.iter().enumerate() {
        let c = match layout {
            Layout::Hwc => i % 3,
            _ => i / per_channel,
        };
        let (min, max, sum) = &mut stats[c];
        *min = (*min).min(v);
        *max = (*max).max(v);
        *sum += v as f64;
    }

    stats.map(|(min, max, sum)| (min, max, (sum / per_channel as f64) as f32))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    imtensor_base::init_stdout_logger();

    let input: PathBuf = env::args()
        .nth(1)
        .unwrap_or_else(|| env_or("IMTENSOR_INPUT", "images/sample.png"))
        .into();
    let size: u32 = env_or("IMTENSOR_SIZE", "640").parse()?;
    let layout: Layout = env_or("IMTENSOR_LAYOUT", "fast13hw").parse()?;
    let resize: ResizeMode = env_or("IMTENSOR_RESIZE", "letterbox").parse()?;

    let config = PreprocessConfig::default()
        .with_width(size)
        .with_height(size)
        .with_layout(layout)
        .with_resize(resize);

    log::info!("input {}, {size}x{size}, layout {layout}, resize {resize}", input.display());

    let bytes = tokio::fs::read(&input).await?;
    let start = Instant::now();
    let bitmap = decode_bitmap(&bytes).await?;
    log::info!(
        "decoded {}x{} in {:.1} ms",
        bitmap.width(),
        bitmap.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let start = Instant::now();
    let out = preprocess(&bitmap, &config)?;
    log::info!(
        "tensor {:?} in {:.1} ms",
        out.tensor.shape,
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(info) = out.letterbox {
        log::info!(
            "letterbox scale {:.4}, scaled {}x{}, pad {}x{}",
            info.scale,
            info.scaled_width,
            info.scaled_height,
            info.pad_x,
            info.pad_y
        );
    }

    for (name, (min, max, mean)) in ["R", "G", "B"].iter().zip(channel_stats(&out.tensor, layout)) {
        log::info!("{name}: min {min:.4} max {max:.4} mean {mean:.4}");
    }

    Ok(())
}
