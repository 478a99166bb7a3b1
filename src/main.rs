use anyhow::{Context, Result};
use clap::Parser;
use cube_tui::{
    cli::{Cli, Command, LogTarget},
    display::FramePrinter,
    tui::ui::{run, shutdown, startup, Viewer},
    vector::Vec3,
};
use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = cli.log_level();
    match cli.log_target() {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
    }

    match cli.command.unwrap_or_default() {
        Command::Print {
            scene,
            frames,
            shift,
            delay_ms,
            no_clear,
        } => {
            let mut scene = scene.to_scene().context("Invalid scene")?;
            let mut printer = FramePrinter::new(stdout());
            if no_clear {
                printer = printer.without_clearing();
            }
            let offset = Vec3::new(shift, 0.0, 0.0);
            for i in 0..frames {
                if i > 0 {
                    std::thread::sleep(Duration::from_millis(delay_ms));
                    scene.translate_cube(&offset);
                }
                let canvas = scene.render().map_err(|e| {
                    error!(frame = i, error = %e, "failed to render frame");
                    e
                })?;
                info!(frame = i, corner = ?scene.cube.corner(), "printing frame");
                printer.print(&canvas).context("Failed to write frame")?;
            }
        }
        Command::Tui { scene, .. } => {
            let scene = scene.to_scene().context("Invalid scene")?;
            let viewer = Viewer::new(scene).context("Failed to render first frame")?;
            startup()?;
            let result = run(viewer);
            shutdown()?;
            result?;
        }
    }
    Ok(())
}
