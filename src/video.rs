use std::fs::{ self, File };
use std::io::BufWriter;
use std::path::{ Path, PathBuf };
use std::process::{ Command, Stdio };

use image::codecs::gif::{ GifEncoder as GifWriter, Repeat };
use image::{ Delay, Frame };
use log::{ debug, warn };

use crate::canvas::Canvas;
use crate::config::VideoFormat;

/// Turns an ordered list of same-sized frames into an animation file.
///
/// Encoding is all-or-nothing: any failure yields `None`, and the caller
/// simply omits the animation.
pub trait VideoEncoder {
    fn encode(&self, frames: &[Canvas], fps: u32, destination: &Path)
        -> Option<PathBuf>;
}

/// Picks the encoder for `format`, or `None` when it cannot run here.
pub fn encoder_for(format: VideoFormat) -> Option<Box<dyn VideoEncoder>> {
    match format {
        VideoFormat::Mp4 if FfmpegEncoder::is_available() => {
            Some(Box::new(FfmpegEncoder))
        },
        VideoFormat::Mp4 => {
            warn!("ffmpeg not found, animations will be skipped");
            None
        },
        VideoFormat::Gif => Some(Box::new(GifEncoder)),
    }
}

/// Encodes H.264 MP4 files with an external `ffmpeg`.
pub struct FfmpegEncoder;

impl FfmpegEncoder {
    /// Whether `ffmpeg` can be run.
    pub fn is_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn write_frames(frames: &[Canvas], dir: &Path) -> Option<()> {
        fs::create_dir_all(dir).ok()?;

        for (i, frame) in frames.iter().enumerate() {
            let path = dir.join(format!("frame_{:04}.png", i));
            if let Err(e) = frame.save(&path) {
                warn!("Failed to write frame {}: {}", path.display(), e);
                return None;
            }
        }

        Some(())
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn encode(&self, frames: &[Canvas], fps: u32, destination: &Path)
        -> Option<PathBuf> {
        if frames.is_empty() {
            return None;
        }

        let scratch = destination.with_extension("frames");
        let written = FfmpegEncoder::write_frames(frames, &scratch);

        let status = written.and_then(|_| {
            Command::new("ffmpeg")
                .arg("-y")
                .arg("-loglevel").arg("error")
                .arg("-framerate").arg(fps.to_string())
                .arg("-i").arg(scratch.join("frame_%04d.png"))
                .arg("-c:v").arg("libx264")
                .arg("-pix_fmt").arg("yuv420p")
                .arg(destination)
                .status()
                .ok()
        });

        if let Err(e) = fs::remove_dir_all(&scratch) {
            debug!("Could not remove {}: {}", scratch.display(), e);
        }

        match status {
            Some(s) if s.success() && destination.exists() => {
                Some(destination.to_path_buf())
            },
            _ => {
                warn!("ffmpeg failed to encode {}", destination.display());
                None
            }
        }
    }
}

/// Encodes looping animated GIFs in-process.
pub struct GifEncoder;

impl VideoEncoder for GifEncoder {
    fn encode(&self, frames: &[Canvas], fps: u32, destination: &Path)
        -> Option<PathBuf> {
        if frames.is_empty() || fps == 0 {
            return None;
        }

        let result = File::create(destination)
            .map_err(image::ImageError::from)
            .and_then(|file| {
                let mut writer = GifWriter::new(BufWriter::new(file));
                writer.set_repeat(Repeat::Infinite)?;

                let delay = Delay::from_numer_denom_ms(1000, fps);
                writer.encode_frames(frames.iter()
                    .map(|f| Frame::from_parts(f.to_rgba_image(), 0, 0, delay)))
            });

        match result {
            Ok(()) => Some(destination.to_path_buf()),
            Err(e) => {
                warn!("Failed to encode {}: {}", destination.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
use crate::color::Color;

#[test]
fn gif_encoder_writes_file() {
    let dir = std::env::temp_dir().join("glass_refraction_gif_test");
    fs::create_dir_all(&dir).unwrap();
    let dest = dir.join("anim.gif");

    let frames = vec![
        Canvas::filled(8, 8, Color::white()),
        Canvas::filled(8, 8, Color::red()),
    ];
    let out = GifEncoder.encode(&frames, 10, &dest);

    assert_eq!(out, Some(dest.clone()));
    assert!(fs::metadata(&dest).unwrap().len() > 0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn encoders_reject_empty_input() {
    let dest = std::env::temp_dir().join("glass_refraction_empty.gif");

    assert_eq!(GifEncoder.encode(&[], 10, &dest), None);
    assert_eq!(FfmpegEncoder.encode(&[], 10, &dest), None);
}

#[test]
fn gif_format_always_has_an_encoder() {
    assert!(encoder_for(VideoFormat::Gif).is_some());
}
