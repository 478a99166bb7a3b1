use crate::{
    error::DomainError,
    rasterizer::{PaletteRasterizer, Rasterizer},
    render::Canvas,
    scene::Scene,
    tui::{
        popup::HelpPopup,
        state::{App, HelpState, ViewState},
    },
    vector::Vec3,
};

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::{CrosstermBackend, Frame, Rect, Style, Stylize, Terminal},
    style::Color,
    text::{Line, Text},
    widgets::Paragraph,
};
use std::io::{stdout, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Enum holding the possible things that will happen after an action
#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
    Quit,
    MoveCube(Vec3),
    MoveLight(Vec3),
    Save,
    Nothing,
    Help,
    Back,
}

/// Return the next action depending on the latest `KeyEvent`
fn next_action_from_key(key: KeyEvent) -> NextAction {
    let step = 1.0f64;
    if key.kind == KeyEventKind::Press {
        match key.code {
            KeyCode::Char('q') => NextAction::Quit,
            // Row 0 is the top of the screen, so "up" is towards smaller y
            KeyCode::Char('l') | KeyCode::Right => NextAction::MoveCube(Vec3::new(step, 0.0, 0.0)),
            KeyCode::Char('h') | KeyCode::Left => NextAction::MoveCube(Vec3::new(-step, 0.0, 0.0)),
            KeyCode::Char('k') | KeyCode::Up => NextAction::MoveCube(Vec3::new(0.0, -step, 0.0)),
            KeyCode::Char('j') | KeyCode::Down => NextAction::MoveCube(Vec3::new(0.0, step, 0.0)),
            KeyCode::Char('u') => NextAction::MoveCube(Vec3::new(0.0, 0.0, step)),
            KeyCode::Char('d') => NextAction::MoveCube(Vec3::new(0.0, 0.0, -step)),
            KeyCode::Char('L') => NextAction::MoveLight(Vec3::new(step, 0.0, 0.0)),
            KeyCode::Char('H') => NextAction::MoveLight(Vec3::new(-step, 0.0, 0.0)),
            KeyCode::Char('K') => NextAction::MoveLight(Vec3::new(0.0, -step, 0.0)),
            KeyCode::Char('J') => NextAction::MoveLight(Vec3::new(0.0, step, 0.0)),
            KeyCode::Char('s') => NextAction::Save,
            KeyCode::Char('?') => NextAction::Help,
            KeyCode::Esc => NextAction::Back,
            _ => NextAction::Nothing,
        }
    } else {
        NextAction::Nothing
    }
}

/// Scene being looked at, together with its last successfully rendered frame
pub struct Viewer {
    scene: Scene,
    canvas: Canvas,
    rasterizer: PaletteRasterizer,
    status: String,
}

impl Viewer {
    pub fn new(scene: Scene) -> std::result::Result<Self, DomainError> {
        let canvas = scene.render()?;
        Ok(Self {
            scene,
            canvas,
            rasterizer: PaletteRasterizer::default(),
            status: String::new(),
        })
    }
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
    pub fn status(&self) -> &str {
        &self.status
    }
    pub fn lines(&self) -> Vec<String> {
        self.rasterizer.canvas_to_lines(&self.canvas)
    }
    /// Apply a change to a copy of the scene and keep it only if the new frame renders.
    /// A rejected change leaves the previous frame on screen.
    pub fn apply<F: FnOnce(&mut Scene)>(&mut self, change: F) -> bool {
        let mut next = self.scene.clone();
        change(&mut next);
        match next.render() {
            Ok(canvas) => {
                self.scene = next;
                self.canvas = canvas;
                self.status.clear();
                true
            }
            Err(e) => {
                warn!(error = %e, "rejected scene change");
                self.status = format!("Rejected: {e}");
                false
            }
        }
    }
    /// Write the current frame as text next to the working directory
    pub fn save(&mut self) -> Result<PathBuf> {
        let now: DateTime<Local> = Local::now();
        let path = PathBuf::from(format!("cube_frame_{}.txt", now.format("%Y%m%d_%H%M%S")));
        std::fs::write(&path, self.lines().join("\n") + "\n")?;
        info!(path = %path.display(), "saved frame");
        self.status = format!("Saved {}", path.display());
        Ok(path)
    }
}

pub enum StateWrapper {
    Viewing(App<ViewState>),
    Helping(App<HelpState>),
}

impl StateWrapper {
    pub fn update(mut self, viewer: &mut Viewer, next_action: NextAction) -> Self {
        match self {
            Self::Viewing(ref mut app) => match next_action {
                NextAction::MoveCube(offset) => {
                    if viewer.apply(|scene| scene.translate_cube(&offset)) {
                        app.frames += 1;
                    }
                    self
                }
                NextAction::MoveLight(offset) => {
                    if viewer.apply(|scene| scene.translate_light(&offset)) {
                        app.frames += 1;
                    }
                    self
                }
                NextAction::Save => {
                    if let Err(e) = viewer.save() {
                        warn!(error = %e, "could not save frame");
                        viewer.status = format!("Save failed: {e}");
                    }
                    self
                }
                NextAction::Quit => {
                    app.should_quit = true;
                    self
                }
                NextAction::Help => StateWrapper::Helping(App::<HelpState>::from(*app)),
                _ => self,
            },
            Self::Helping(ref mut app) => match next_action {
                NextAction::Quit => {
                    app.should_quit = true;
                    self
                }
                NextAction::Back => StateWrapper::Viewing(App::<ViewState>::from(*app)),
                _ => self,
            },
        }
    }

    pub fn should_quit(&self) -> bool {
        match self {
            Self::Viewing(app) => app.should_quit,
            Self::Helping(app) => app.should_quit,
        }
    }

    fn frames(&self) -> usize {
        match self {
            Self::Viewing(app) => app.frames,
            Self::Helping(app) => app.frames,
        }
    }

    pub fn ui(&self, viewer: &Viewer, frame: &mut Frame) {
        let area = frame.size();
        if area.height == 0 {
            return;
        }
        let render_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height - 1,
        };
        let lines: Vec<Line> = viewer.lines().into_iter().map(Line::from).collect();
        let widget = Paragraph::new(Text::from(lines)).fg(Color::Blue);
        frame.render_widget(widget, render_area);

        match self {
            Self::Helping(_) => {
                let popup_area = Rect {
                    x: area.width / 3,
                    y: area.height / 4,
                    width: area.width / 3,
                    height: area.height / 2,
                };
                let popup = HelpPopup::default()
                    .style(Style::new().black())
                    .key_style(Style::new().red())
                    .title_style(Style::new().bold())
                    .border_style(Style::new().red());
                frame.render_widget(popup, popup_area);
            }
            Self::Viewing(_) => {
                let bottom = Rect {
                    x: 0,
                    y: area.height - 1,
                    width: area.width,
                    height: 1,
                }
                .clamp(area);
                let corner = viewer.scene().cube.corner();
                let light = viewer.scene().light.position;
                let text = format!(
                    "{} cube ({}, {}, {}) light ({}, {}, {}) frame {} | Press ? for help.",
                    viewer.status(),
                    corner.x,
                    corner.y,
                    corner.z,
                    light.x,
                    light.y,
                    light.z,
                    self.frames(),
                );
                let text = Text::raw(text)
                    .style(Style::new().red())
                    .alignment(ratatui::layout::Alignment::Right);
                frame.render_widget(text, bottom);
            }
        }
    }
}

/// Perform shutdown of terminal
pub fn shutdown() -> Result<()> {
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Start the terminal
pub fn startup() -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

pub fn run(mut viewer: Viewer) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = StateWrapper::Viewing(App::<ViewState>::default());
    loop {
        terminal.draw(|frame| app.ui(&viewer, frame))?;

        if event::poll(std::time::Duration::from_millis(16))? {
            if let event::Event::Key(key) = event::read()? {
                let next_action = next_action_from_key(key);
                app = app.update(&mut viewer, next_action);
                if app.should_quit() {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(next_action_from_key(press('q')), NextAction::Quit);
        assert_eq!(
            next_action_from_key(press('l')),
            NextAction::MoveCube(Vec3::new(1.0, 0.0, 0.0))
        );
        assert_eq!(
            next_action_from_key(press('J')),
            NextAction::MoveLight(Vec3::new(0.0, 1.0, 0.0))
        );
        assert_eq!(next_action_from_key(press('x')), NextAction::Nothing);
    }

    #[test]
    fn test_move_updates_frame() {
        let mut viewer = Viewer::new(Scene::default()).unwrap();
        let app = StateWrapper::Viewing(App::<ViewState>::default());
        let app = app.update(&mut viewer, NextAction::MoveCube(Vec3::new(-7.0, 0.0, 0.0)));
        assert_eq!(app.frames(), 1);
        assert_eq!(viewer.scene().cube.corner(), Vec3::new(3.0, 10.0, 8.0));
        assert_eq!(viewer.canvas(), &viewer.scene().render().unwrap());
    }

    #[test]
    fn test_rejected_move_keeps_previous_frame() {
        let mut viewer = Viewer::new(Scene::default()).unwrap();
        let before = viewer.canvas().clone();
        // Puts the near face of the cube on the camera plane
        let accepted = viewer.apply(|scene| scene.translate_cube(&Vec3::new(0.0, 0.0, -8.0)));
        assert!(!accepted);
        assert_eq!(viewer.canvas(), &before);
        assert_eq!(viewer.scene().cube.corner(), Vec3::new(10.0, 10.0, 8.0));
        assert!(viewer.status().starts_with("Rejected"));
    }

    #[test]
    fn test_help_and_back() {
        let mut viewer = Viewer::new(Scene::default()).unwrap();
        let app = StateWrapper::Viewing(App::<ViewState>::default());
        let app = app.update(&mut viewer, NextAction::Help);
        assert!(matches!(app, StateWrapper::Helping(_)));
        // Moves are ignored while the popup is open
        let app = app.update(&mut viewer, NextAction::MoveCube(Vec3::x()));
        assert_eq!(viewer.scene().cube.corner(), Vec3::new(10.0, 10.0, 8.0));
        let app = app.update(&mut viewer, NextAction::Back);
        assert!(matches!(app, StateWrapper::Viewing(_)));
        let app = app.update(&mut viewer, NextAction::Quit);
        assert!(app.should_quit());
    }
}
