use std::fs;
use std::path::{ Path, PathBuf };

use log::{ debug, info };
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::canvas::Canvas;
use crate::config::TaskConfig;
use crate::error::GenerationError;
use crate::frames::FrameSequencer;
use crate::prompts::{ get_prompt, get_rubric };
use crate::refraction::PhysicsSample;
use crate::video::{ VideoEncoder, encoder_for };

/// One generated example: the before/after images, an optional animation
/// and the instruction that goes with them.
#[derive(Clone, Debug)]
pub struct TaskPair {
    pub task_id: String,
    pub domain: String,
    pub prompt: String,
    pub rubric: String,
    pub sample: PhysicsSample,

    pub first_image: Canvas,
    pub final_image: Canvas,
    pub ground_truth_video: Option<PathBuf>,
}

#[derive(Serialize)]
struct TaskMetadata<'a> {
    task_id: &'a str,
    domain: &'a str,
    prompt: &'a str,
    physics: &'a PhysicsSample,
    has_video: bool,
}

impl TaskPair {
    /// Writes the pair to `<root>/<domain>_task/<task_id>/` and returns that
    /// directory.
    pub fn save(&self, root: &Path) -> Result<PathBuf, GenerationError> {
        let dir = root.join(format!("{}_task", self.domain)).join(&self.task_id);
        fs::create_dir_all(&dir)?;

        self.first_image.save(&dir.join("first_frame.png"))?;
        self.final_image.save(&dir.join("final_frame.png"))?;
        fs::write(dir.join("prompt.txt"), &self.prompt)?;
        fs::write(dir.join("rubric.txt"), &self.rubric)?;

        if let Some(video) = &self.ground_truth_video {
            let ext = video.extension().and_then(|e| e.to_str()).unwrap_or("mp4");
            fs::copy(video, dir.join(format!("ground_truth.{}", ext)))?;
        }

        let metadata = TaskMetadata {
            task_id: &self.task_id,
            domain: &self.domain,
            prompt: &self.prompt,
            physics: &self.sample,
            has_video: self.ground_truth_video.is_some(),
        };
        fs::write(dir.join("metadata.json"), serde_json::to_string_pretty(&metadata)?)?;

        Ok(dir)
    }
}

/// Generates refraction task pairs.
///
/// All randomness comes from the generator's own seeded RNG, so two
/// generators built from the same config produce the same tasks.
pub struct TaskGenerator {
    pub config: TaskConfig,
    sequencer: FrameSequencer,
    encoder: Option<Box<dyn VideoEncoder>>,
    rng: StdRng,
}

impl TaskGenerator {
    /// Creates a generator, picking a video encoder if animations are enabled.
    pub fn new(config: TaskConfig) -> Result<TaskGenerator, GenerationError> {
        let encoder = if config.generate_videos {
            encoder_for(config.video_format)
        } else {
            None
        };

        TaskGenerator::with_encoder(config, encoder)
    }

    /// Creates a generator with an explicit encoder (or none).
    pub fn with_encoder(config: TaskConfig, encoder: Option<Box<dyn VideoEncoder>>)
        -> Result<TaskGenerator, GenerationError> {
        config.validate()?;

        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (width, height) = config.image_size;
        let sequencer = FrameSequencer::with_timing(width, height,
            config.hold_frames, config.transition_frames);

        Ok(TaskGenerator { config, sequencer, encoder, rng })
    }

    /// Samples, renders and labels one task.
    pub fn generate_task_pair(&mut self, task_id: &str) -> TaskPair {
        let sample = PhysicsSample::sample(&mut self.rng, &self.config);
        debug!("{}: n_glass = {:.3}, incident {:.2} deg, refracted {:.2} deg",
            task_id, sample.n_glass, sample.theta_incident.degrees,
            sample.theta_refracted.degrees);

        let first_image: Canvas = self.sequencer.render_initial(&sample);
        let final_image: Canvas = self.sequencer.render_final(&sample);

        let ground_truth_video = if self.config.generate_videos {
            self.generate_video(task_id, &sample)
        } else {
            None
        };

        let prompt = get_prompt(sample.kind, sample.n_glass, &mut self.rng);
        let rubric = get_rubric(sample.kind, &mut self.rng);

        TaskPair {
            task_id: task_id.to_string(),
            domain: self.config.domain.clone(),
            prompt,
            rubric,
            sample,
            first_image,
            final_image,
            ground_truth_video,
        }
    }

    /// Renders the animation and hands it to the encoder. Returns `None` when
    /// there is no encoder or encoding fails.
    fn generate_video(&self, task_id: &str, sample: &PhysicsSample)
        -> Option<PathBuf> {
        let encoder = self.encoder.as_ref()?;

        let dir = std::env::temp_dir()
            .join(format!("{}_videos", self.config.domain));
        fs::create_dir_all(&dir).ok()?;
        let destination = dir.join(format!("{}_ground_truth.{}", task_id,
            self.config.video_format.extension()));

        let frames: Vec<Canvas> = self.sequencer.animation(sample);
        encoder.encode(&frames, self.config.video_fps, &destination)
    }

    /// Generates and saves `num_samples` task pairs under the output
    /// directory. Returns how many were written.
    pub fn generate_dataset(&mut self) -> Result<usize, GenerationError> {
        let total = self.config.num_samples;
        let root = self.config.output_dir.clone();
        info!("Generating {} tasks into {}...", total, root.display());

        for i in 0..total {
            let task_id = format!("{}_{:04}", self.config.domain, i);
            let pair = self.generate_task_pair(&task_id);
            let dir = pair.save(&root)?;

            info!("[{}/{}] {} -> {}{}", i + 1, total, task_id, dir.display(),
                if pair.ground_truth_video.is_some() { " (with video)" } else { "" });
        }

        info!("...done.");
        Ok(total)
    }
}

#[cfg(test)]
fn test_config(seed: u64) -> TaskConfig {
    TaskConfig {
        random_seed: Some(seed),
        image_size: (160, 120),
        generate_videos: false,
        hold_frames: 1,
        transition_frames: 3,
        ..Default::default()
    }
}

#[test]
fn same_seed_same_tasks() {
    let mut a = TaskGenerator::new(test_config(42)).unwrap();
    let mut b = TaskGenerator::new(test_config(42)).unwrap();

    for i in 0..5 {
        let id = format!("t{}", i);
        let pa = a.generate_task_pair(&id);
        let pb = b.generate_task_pair(&id);

        assert_eq!(pa.sample, pb.sample);
        assert_eq!(pa.prompt, pb.prompt);
        assert_eq!(pa.rubric, pb.rubric);
        assert_eq!(pa.first_image, pb.first_image);
    }
}

#[test]
fn task_pair_has_both_images_and_prompt() {
    let mut g = TaskGenerator::new(test_config(1)).unwrap();
    let pair = g.generate_task_pair("glass_refraction_0000");

    assert_eq!(pair.first_image.width, 160);
    assert_eq!(pair.final_image.height, 120);
    assert_ne!(pair.first_image, pair.final_image);
    assert!(pair.prompt.contains(&format!("{:.2}", pair.sample.n_glass)));
    assert!(pair.ground_truth_video.is_none());
}

#[cfg(test)]
struct FailingEncoder;

#[cfg(test)]
impl VideoEncoder for FailingEncoder {
    fn encode(&self, _: &[Canvas], _: u32, _: &Path) -> Option<PathBuf> {
        None
    }
}

#[test]
fn encoder_failure_omits_video_only() {
    let config = TaskConfig { generate_videos: true, ..test_config(3) };
    let mut g = TaskGenerator::with_encoder(config,
        Some(Box::new(FailingEncoder))).unwrap();
    let pair = g.generate_task_pair("t");

    assert!(pair.ground_truth_video.is_none());
    assert_eq!(pair.first_image.width, 160);
}

#[test]
fn invalid_config_is_rejected() {
    let config = TaskConfig { transition_frames: 0, ..test_config(3) };
    assert!(TaskGenerator::new(config).is_err());
}

#[test]
fn dataset_is_written_to_disk() {
    let root = std::env::temp_dir().join("glass_refraction_dataset_test");
    let _ = fs::remove_dir_all(&root);

    let config = TaskConfig {
        num_samples: 2,
        output_dir: root.clone(),
        ..test_config(9)
    };
    let mut g = TaskGenerator::new(config).unwrap();
    assert_eq!(g.generate_dataset().unwrap(), 2);

    for id in ["glass_refraction_0000", "glass_refraction_0001"].iter() {
        let dir = root.join("glass_refraction_task").join(id);
        for file in ["first_frame.png", "final_frame.png", "prompt.txt",
            "rubric.txt", "metadata.json"].iter() {
            assert!(dir.join(file).exists(), "missing {}", file);
        }
    }

    let metadata = fs::read_to_string(root.join("glass_refraction_task")
        .join("glass_refraction_0000").join("metadata.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&metadata).unwrap();
    assert_eq!(value["physics"]["kind"], "default");
    assert!(value["physics"]["theta_refracted"]["degrees"].is_f64());

    fs::remove_dir_all(&root).unwrap();
}
