use std::fs;
use std::path::{ Path, PathBuf };

use serde::{ Serialize, Deserialize };

use crate::error::ConfigError;
use crate::consts::{ AIR_RI, GLASS_RI_MIN, GLASS_RI_MAX, THETA_MIN_DEG,
    THETA_MAX_DEG, HOLD_FRAMES, TRANSITION_FRAMES };

/// Container format for the ground truth animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    Gif,
}

impl VideoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Gif => "gif",
        }
    }
}

/// Generation settings.
///
/// Loaded from JSON; every field is optional in the file and falls back to
/// the default below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub num_samples: usize,
    pub domain: String,
    pub random_seed: Option<u64>,
    pub output_dir: PathBuf,

    /// Canvas width and height, in pixels.
    pub image_size: (usize, usize),

    pub generate_videos: bool,
    pub video_fps: u32,
    pub video_format: VideoFormat,

    pub n_glass_min: f64,
    pub n_glass_max: f64,

    /// Incident angle range, in degrees from the normal.
    pub theta_min: f64,
    pub theta_max: f64,

    pub n_air: f64,

    pub hold_frames: usize,
    pub transition_frames: usize,
}

impl Default for TaskConfig {
    fn default() -> TaskConfig {
        TaskConfig {
            num_samples: 10,
            domain: "glass_refraction".to_string(),
            random_seed: None,
            output_dir: PathBuf::from("data/questions"),

            image_size: (512, 512),

            generate_videos: true,
            video_fps: 10,
            video_format: VideoFormat::Mp4,

            n_glass_min: GLASS_RI_MIN,
            n_glass_max: GLASS_RI_MAX,

            theta_min: THETA_MIN_DEG,
            theta_max: THETA_MAX_DEG,

            n_air: AIR_RI,

            hold_frames: HOLD_FRAMES,
            transition_frames: TRANSITION_FRAMES,
        }
    }
}

impl TaskConfig {
    /// Parses and validates a config from a JSON string.
    pub fn from_json(json: &str) -> Result<TaskConfig, ConfigError> {
        let config: TaskConfig = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_file(path: &Path) -> Result<TaskConfig, ConfigError> {
        TaskConfig::from_json(&fs::read_to_string(path)?)
    }

    /// Checks that the sampling ranges and output settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_glass_min > self.n_glass_max {
            return Err(ConfigError::InvalidRange {
                name: "n_glass",
                min: self.n_glass_min,
                max: self.n_glass_max,
            });
        }

        if self.theta_min > self.theta_max {
            return Err(ConfigError::InvalidRange {
                name: "theta",
                min: self.theta_min,
                max: self.theta_max,
            });
        }

        if self.theta_min < 0.0 || self.theta_max >= 90.0 {
            return Err(ConfigError::InvalidAngle {
                min: self.theta_min,
                max: self.theta_max,
            });
        }

        if !(self.n_glass_min > 0.0) {
            return Err(ConfigError::InvalidIndex {
                name: "n_glass_min",
                value: self.n_glass_min,
            });
        }

        if !(self.n_air > 0.0) {
            return Err(ConfigError::InvalidIndex {
                name: "n_air",
                value: self.n_air,
            });
        }

        let (width, height) = self.image_size;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidImageSize { width, height });
        }

        if self.transition_frames == 0 {
            return Err(ConfigError::InvalidFrameCounts);
        }

        if self.video_fps == 0 {
            return Err(ConfigError::InvalidFps);
        }

        Ok(())
    }
}

#[test]
fn defaults_are_valid() {
    let c = TaskConfig::default();

    assert!(c.validate().is_ok());
    assert_eq!(c.image_size, (512, 512));
    assert_eq!(c.hold_frames, 5);
    assert_eq!(c.transition_frames, 25);
    assert_eq!(c.video_format, VideoFormat::Mp4);
}

#[test]
fn partial_json_fills_defaults() {
    let c = TaskConfig::from_json(r#"{
        "num_samples": 3,
        "random_seed": 42,
        "image_size": [640, 480],
        "video_format": "gif"
    }"#).unwrap();

    assert_eq!(c.num_samples, 3);
    assert_eq!(c.random_seed, Some(42));
    assert_eq!(c.image_size, (640, 480));
    assert_eq!(c.video_format, VideoFormat::Gif);
    assert_eq!(c.domain, "glass_refraction");
    assert!(crate::feq(c.n_glass_max, 2.0));
}

#[test]
fn rejects_inverted_ranges() {
    let err = TaskConfig::from_json(r#"{ "n_glass_min": 2.5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange { name: "n_glass", .. }));

    let err = TaskConfig::from_json(
        r#"{ "theta_min": 60.0, "theta_max": 10.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange { name: "theta", .. }));
}

#[test]
fn rejects_out_of_domain_values() {
    let err = TaskConfig::from_json(r#"{ "theta_max": 90.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAngle { .. }));

    let err = TaskConfig::from_json(r#"{ "n_air": 0.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidIndex { name: "n_air", .. }));

    let err = TaskConfig::from_json(r#"{ "image_size": [0, 512] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidImageSize { .. }));

    let err = TaskConfig::from_json(r#"{ "transition_frames": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFrameCounts));

    let err = TaskConfig::from_json(r#"{ "video_fps": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFps));
}

#[test]
fn rejects_malformed_json() {
    let err = TaskConfig::from_json("{ num_samples: }").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
