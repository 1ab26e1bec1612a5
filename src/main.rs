use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use pinhole::config::SceneConfig;
use pinhole::prelude::*;

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Scene description in RON. Without one, the built-in cube is rendered
    /// with the default camera.
    scene: Option<PathBuf>,

    /// Render a single frame to this image file instead of opening a window.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Configures the log verbosity.
    ///
    /// `-v` is Debug, `-vv` is Trace.
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> log::Level {
        match self.verbose {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}

fn main() -> pinhole::Result<()> {
    let cli = Cli::parse();
    if let Err(err) = simple_logger::init_with_level(cli.log_level()) {
        eprintln!("failed to initialise logger: {err}");
    }

    let config = match &cli.scene {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };
    let mut engine = config.build_engine()?;
    let models = config.load_models()?;

    match cli.output {
        Some(path) => render_to_file(&mut engine, &models, &path),
        None => run_window(&mut engine, &models),
    }
}

fn render_to_file(engine: &mut Engine, models: &[Model], path: &Path) -> pinhole::Result<()> {
    let projection = engine.camera().projection();
    let mut surface = PixelBuffer::new(projection.width(), projection.height());

    let stats = engine.render_scene(models, &mut surface);
    log::info!(
        "Rendered {} of {} triangles, {} pixels",
        stats.rasterized,
        stats.submitted,
        stats.pixels_written
    );

    surface.present()?;
    surface.save(path)
}

#[cfg(feature = "window")]
fn run_window(engine: &mut Engine, models: &[Model]) -> pinhole::Result<()> {
    let projection = engine.camera().projection();
    let mut window = Window::new("pinhole", projection.width(), projection.height())?;
    let mut limiter = FrameLimiter::new(&window);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                engine.resize(w, h)?;
                window.resize(w, h)?;
            }
            WindowEvent::SetRenderMode(mode) => {
                log::info!("Render mode: {:?}", mode);
                engine.set_render_mode(mode);
            }
            WindowEvent::ToggleBackfaceCulling => {
                engine.backface_culling = !engine.backface_culling;
                log::info!("Back-face culling: {}", engine.backface_culling);
            }
            WindowEvent::None => {}
        }

        engine.render_scene(models, &mut window);
        window.present()?;

        let delta = limiter.wait_and_get_delta(&window);
        log::trace!("Frame time: {} ms", delta);
    }

    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_engine: &mut Engine, _models: &[Model]) -> pinhole::Result<()> {
    Err(pinhole::Error::Display(
        "built without the `window` feature; use --output to render to a file".to_string(),
    ))
}
