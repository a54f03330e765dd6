//! Host-side plumbing around the maze engine: configuration from the
//! environment, the tracing subscriber, and maze files on disk.

use std::fs;
use std::path::Path;

use maze_core::{Maze, MazeConfig, MazeParams, MazeStub};

/// Largest maze file `load_maze` will read.
pub const MAX_MAZE_FILE_BYTES: u64 = 10_000_000;

/// Install the global `fmt` subscriber.
///
/// The filter comes from `RUST_LOG`, with `info` added as the default level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

/// Read generation bounds from the process environment.
pub fn load_config() -> Result<MazeConfig, Box<dyn std::error::Error>> {
    let config = MazeConfig::from_env()?;
    tracing::debug!("Loaded config: {:?}", config);
    Ok(config)
}

/// Generate a maze, attaching `note` when it is non-empty.
///
/// # Example
/// ```no_run
/// use maze_core::{MazeConfig, MazeParams};
/// use maze_host::generate_maze;
///
/// let params = MazeParams::new(10, 10, 5, "Cellar", "cellar-01");
/// let maze = generate_maze(&MazeConfig::default(), &params, None).unwrap();
/// println!("{}", maze.text_render());
/// ```
pub fn generate_maze(
    config: &MazeConfig,
    params: &MazeParams,
    note: Option<&str>,
) -> Result<Maze, Box<dyn std::error::Error>> {
    tracing::info!(
        "Generating {}x{} maze '{}' (challenge {}, seed '{}')",
        params.height,
        params.width,
        params.name,
        params.challenge,
        params.seed
    );

    let mut maze = Maze::build(config, params)?;
    if let Some(note) = note.filter(|n| !n.is_empty()) {
        maze.set_note(note);
    }
    Ok(maze)
}

/// Default file name for a saved maze.
pub fn default_maze_file(seed: &str) -> String {
    let safe: String = seed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}_maze.json", safe)
}

pub fn save_maze(maze: &Maze, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = maze.to_json_pretty()?;
    fs::write(path.as_ref(), json)?;
    tracing::info!("Saved maze {} to {}", maze.id(), path.as_ref().display());
    Ok(())
}

pub fn load_maze(path: impl AsRef<Path>) -> Result<Maze, Box<dyn std::error::Error>> {
    let path = path.as_ref();

    // Refuse to pull huge files into memory
    let size = fs::metadata(path)?.len();
    if size > MAX_MAZE_FILE_BYTES {
        return Err(format!(
            "Maze file is too large: {} bytes (max {})",
            size, MAX_MAZE_FILE_BYTES
        )
        .into());
    }

    let json = fs::read_to_string(path)?;
    let maze = Maze::from_json(&json)?;
    tracing::info!("Loaded maze {} from {}", maze.id(), path.display());
    Ok(maze)
}

pub fn stub_json(maze: &Maze) -> Result<String, Box<dyn std::error::Error>> {
    let stub: MazeStub = maze.stub();
    Ok(serde_json::to_string_pretty(&stub)?)
}
