use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use maze_core::{GridCoordinate, MazeParams};
use maze_host::{default_maze_file, generate_maze, init_tracing, load_config, load_maze, save_maze, stub_json};

/// Generate, inspect and render game mazes
#[derive(Parser, Debug)]
#[command(name = "maze")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and save it as JSON
    Generate {
        #[arg(long)]
        height: usize,

        #[arg(long)]
        width: usize,

        /// Challenge level, 1-10
        #[arg(short, long)]
        challenge: u8,

        #[arg(short, long)]
        name: String,

        /// Seed string; the same seed always gives the same maze
        #[arg(short, long)]
        seed: String,

        /// Free-text note stored with the maze
        #[arg(long)]
        note: Option<String>,

        /// Output file. Defaults to <seed>_maze.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the text render of a saved maze
    Render {
        file: PathBuf,

        /// Row of a player position to overlay
        #[arg(long, requires = "col")]
        row: Option<i32>,

        /// Column of a player position to overlay
        #[arg(long, requires = "row")]
        col: Option<i32>,
    },

    /// Print the catalog stub of a saved maze
    Stub { file: PathBuf },
}

fn main() {
    init_tracing();

    let args = Args::parse();
    let result = match args.command {
        Command::Generate {
            height,
            width,
            challenge,
            name,
            seed,
            note,
            output,
        } => {
            let params = MazeParams::new(height, width, challenge, name, seed);
            generate_command(&params, note.as_deref(), output)
        }
        Command::Render { file, row, col } => {
            let live = row.zip(col).map(|(row, col)| GridCoordinate::new(row, col));
            render_command(file, live)
        }
        Command::Stub { file } => stub_command(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate_command(
    params: &MazeParams,
    note: Option<&str>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let start = Instant::now();
    let maze = generate_maze(&config, params, note)?;
    let duration = start.elapsed();

    println!("{}", maze.text_render());
    println!("Maze: {} ({})", maze.id(), maze.name());
    println!("  Size: {}x{}", maze.height(), maze.width());
    println!("  Challenge: {}", maze.challenge());
    println!("  Start: {}  Finish: {}", maze.start_cell(), maze.finish_cell());
    println!("  Path length: {}", maze.shortest_path_length());
    println!("  Traps: {}", maze.trap_count());
    println!("  Generation time: {:.2}ms", duration.as_secs_f64() * 1000.0);

    let file = output.unwrap_or_else(|| PathBuf::from(default_maze_file(maze.seed())));
    save_maze(&maze, &file)?;
    println!("Saved to: {}", file.display());
    Ok(())
}

fn render_command(
    file: PathBuf,
    live: Option<GridCoordinate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut maze = load_maze(&file)?;
    if let Some(pos) = live {
        // fail early on a position outside the grid
        maze.cell(pos)?;
    }
    println!("{}", maze.render(live.is_some(), live));
    Ok(())
}

fn stub_command(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let maze = load_maze(&file)?;
    println!("{}", stub_json(&maze)?);
    Ok(())
}
