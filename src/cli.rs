//! Command line options
use crate::{
    error::SceneError,
    render::Light,
    scene::Scene,
    surface::CubeGenerator,
    vector::Vec3,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version, about = "Render a lit cube to the terminal as ASCII art")]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The terminal belongs to the interactive viewer, so logs are appended to a file
    File(PathBuf),
}

impl Cli {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
    pub fn log_target(&self) -> LogTarget {
        match &self.command {
            Some(Command::Tui { log_file, .. }) => LogTarget::File(log_file.clone()),
            Some(Command::Print { .. }) | None => LogTarget::Stderr,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print frames to stdout, moving the cube along x between frames
    Print {
        #[command(flatten)]
        scene: SceneArgs,
        /// Number of frames to print
        #[arg(long, default_value_t = 2)]
        frames: usize,
        /// Distance the cube moves along x after each frame
        #[arg(long, default_value_t = -7.0, allow_negative_numbers = true)]
        shift: f64,
        /// Pause between frames in milliseconds
        #[arg(long, default_value_t = 3000)]
        delay_ms: u64,
        /// Do not clear the screen before each frame
        #[arg(long)]
        no_clear: bool,
    },
    /// Interactive viewer
    Tui {
        #[command(flatten)]
        scene: SceneArgs,
        /// File the viewer appends its log to
        #[arg(long, default_value = "cube_tui.log")]
        log_file: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Print {
            scene: SceneArgs::default(),
            frames: 2,
            shift: -7.0,
            delay_ms: 3000,
            no_clear: false,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SceneArgs {
    /// Corner of the cube with the smallest coordinates, as `x,y,z`
    #[arg(long, value_parser = parse_vec3, default_value = "10,10,8", allow_hyphen_values = true)]
    pub corner: Vec3,
    /// Length of a side of the cube
    #[arg(long, default_value_t = 3.0)]
    pub side: f64,
    /// Spacing between sample points on a face
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,
    /// Position of the light, as `x,y,z`
    #[arg(long, value_parser = parse_vec3, default_value = "0,-2,0", allow_hyphen_values = true)]
    pub light: Vec3,
    /// Brightness of the light
    #[arg(long, default_value_t = 12.0)]
    pub intensity: f64,
    /// Screen width, the canvas gets one extra column
    #[arg(long, default_value_t = 15)]
    pub width: usize,
    /// Screen height, the canvas gets one extra row
    #[arg(long, default_value_t = 15)]
    pub height: usize,
    /// Viewing depth, the projection distance is one more than this
    #[arg(long, default_value_t = 15)]
    pub depth: usize,
}

impl Default for SceneArgs {
    fn default() -> Self {
        Self {
            corner: Vec3::new(10.0, 10.0, 8.0),
            side: 3.0,
            step: 1.0,
            light: Vec3::new(0.0, -2.0, 0.0),
            intensity: 12.0,
            width: 15,
            height: 15,
            depth: 15,
        }
    }
}

impl SceneArgs {
    pub fn to_scene(&self) -> Result<Scene, SceneError> {
        let cube = CubeGenerator::new(self.corner, self.side, self.step)?;
        let camera = Scene::camera_for_screen(self.width, self.height, self.depth)?;
        let light = Light::new(self.light, self.intensity);
        Ok(Scene::new(cube, camera, light))
    }
}

/// Parse `x,y,z` into a vector
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let components = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| format!("invalid component in '{s}': {e}"))?;
    match components[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!(
            "expected three comma separated numbers, got {} in '{s}'",
            components.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("0,-2,0"), Ok(Vec3::new(0.0, -2.0, 0.0)));
        assert_eq!(parse_vec3(" 1.5, 2 ,3"), Ok(Vec3::new(1.5, 2.0, 3.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,a,3").is_err());
    }

    #[test]
    fn test_defaults_match_reference_scene() {
        let cli = Cli::parse_from(["cube_tui", "print"]);
        let Some(Command::Print { scene, frames, .. }) = cli.command else {
            panic!("expected print command");
        };
        assert_eq!(frames, 2);
        assert_eq!(scene, SceneArgs::default());
        assert_eq!(scene.to_scene().unwrap(), Scene::default());
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::parse_from([
            "cube_tui", "-vv", "tui", "--corner", "-1,2,9", "--side", "2", "--width", "31",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), Level::DEBUG);
        let Some(Command::Tui { scene, .. }) = cli.command else {
            panic!("expected tui command");
        };
        assert_eq!(scene.corner, Vec3::new(-1.0, 2.0, 9.0));
        let scene = scene.to_scene().unwrap();
        assert_eq!(scene.camera.width(), 32);
        assert_eq!(scene.cube.side_length(), 2.0);
    }

    #[test]
    fn test_log_target() {
        let print = Cli::parse_from(["cube_tui", "print"]);
        assert_eq!(print.log_target(), LogTarget::Stderr);
        assert_eq!(print.log_level(), Level::WARN);
        assert_eq!(Cli::parse_from(["cube_tui"]).log_target(), LogTarget::Stderr);

        // Nothing may write to the terminal while the viewer draws on it
        let tui = Cli::parse_from(["cube_tui", "tui"]);
        assert_eq!(
            tui.log_target(),
            LogTarget::File(PathBuf::from("cube_tui.log"))
        );
        let tui = Cli::parse_from(["cube_tui", "-vvvv", "tui", "--log-file", "/tmp/viewer.log"]);
        assert_eq!(
            tui.log_target(),
            LogTarget::File(PathBuf::from("/tmp/viewer.log"))
        );
        assert_eq!(tui.log_level(), Level::TRACE);
    }

    #[test]
    fn test_invalid_scene() {
        let args = SceneArgs {
            step: 0.0,
            ..SceneArgs::default()
        };
        assert_eq!(args.to_scene(), Err(SceneError::InvalidStep(0.0)));
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
