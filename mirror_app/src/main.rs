//! Records a scripted animation of a scene model into a USD stage
//!
//! ```text
//! mirror_app --model resources/scenes/demo_scene.ron --config config/mirror.toml --frames 120
//! ```

mod animation;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;
use std::sync::Arc;

use usd_mirror::config::{Config, MirrorConfig};
use usd_mirror::model::Model;
use usd_mirror::SceneMirror;

use animation::Animation;

const DEFAULT_FRAMES: &str = "120";
const DEFAULT_TIMESTEP: &str = "0.0166667";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let matches = Command::new("mirror_app")
        .about("Plays a scripted animation of a scene model and records it into a USD stage")
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Scene model (.ron or .toml)")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Mirror configuration (.toml or .ron)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("frames")
                .short('n')
                .long("frames")
                .value_name("COUNT")
                .help("Number of frames to record")
                .value_parser(value_parser!(u32))
                .default_value(DEFAULT_FRAMES),
        )
        .arg(
            Arg::new("timestep")
                .short('t')
                .long("timestep")
                .value_name("SECONDS")
                .help("Simulated time between frames")
                .value_parser(value_parser!(f64))
                .default_value(DEFAULT_TIMESTEP),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Override the output .usda path")
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches();

    let model_path = matches.get_one::<PathBuf>("model").context("Missing --model")?;
    let model = Arc::new(
        Model::load(model_path).with_context(|| format!("Failed to load model {}", model_path.display()))?,
    );

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => MirrorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MirrorConfig::default(),
    };
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config.output_path.clone_from(output);
    }

    let frames = matches.get_one::<u32>("frames").copied().unwrap_or(120);
    let timestep = matches.get_one::<f64>("timestep").copied().unwrap_or(1.0 / 60.0);

    record(&model, config, frames, timestep)
}

fn record(model: &Arc<Model>, config: MirrorConfig, frames: u32, timestep: f64) -> Result<()> {
    log::info!("Recording {} frames at {} s per frame to {:?}", frames, timestep, config.output_path);

    if let Some(parent) = config.output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let mut mirror = SceneMirror::new(Arc::clone(model), config).context("Failed to create scene mirror")?;
    let animation = Animation::new(model);

    for frame in 0..frames {
        let state = animation.state_at(model, f64::from(frame) * timestep);
        mirror
            .update(&state)
            .with_context(|| format!("Failed to mirror frame {frame}"))?;

        if frame == 0 {
            for line in mirror.node_summaries() {
                log::debug!("{}", line);
            }
        }
    }

    mirror.save().context("Failed to save USD stage")?;
    log::info!(
        "Recorded {} frames: {} geometry prims, {} light prims, {} textures",
        mirror.frames_mirrored(),
        mirror.geom_node_count(),
        mirror.light_node_count(),
        mirror.texture_paths().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_model() -> Arc<Model> {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/scenes/demo_scene.ron");
        Arc::new(Model::load(path).unwrap())
    }

    #[test]
    fn test_demo_scene_loads() {
        let model = demo_model();
        assert_eq!(model.texture_count(), 2);
        assert_eq!(model.geom_count(), 9);
        assert_eq!(model.light_count(), 2);
    }

    #[test]
    fn test_demo_config_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/mirror.toml");
        let config = MirrorConfig::load_from_file(path).unwrap();
        assert_eq!((config.width, config.height), (640, 480));
    }

    #[test]
    fn test_record_writes_stage_and_textures() {
        let dir = tempfile::tempdir().unwrap();
        let config = MirrorConfig::in_directory(dir.path());
        let output = config.output_path.clone();

        record(&demo_model(), config, 5, 0.1).unwrap();

        let stage = std::fs::read_to_string(output).unwrap();
        assert!(stage.contains("def Plane \"plane_0\""));
        assert!(stage.contains("def Mesh \"mesh_6\""));
        assert!(!stage.contains("box_8"));
        assert!(dir.path().join("0.png").is_file());
        assert!(dir.path().join("1.png").is_file());
    }

    #[test]
    fn test_record_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("output");
        let config = MirrorConfig {
            output_path: output_dir.join("demo_stage.usda"),
            texture_dir: output_dir.clone(),
            ..MirrorConfig::default()
        };

        record(&demo_model(), config, 2, 0.1).unwrap();

        assert!(output_dir.join("demo_stage.usda").is_file());
        assert!(output_dir.join("0.png").is_file());
    }
}
