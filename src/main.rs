use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use clap::Parser;
use gmaze::{
    algorithms::{
        default_registry,
        growth::{Growth, GrowthState},
        new_rng, Generator, MazeSpec,
    },
    Dims, Grid,
};
use growmaze::{
    logging,
    render::{self, SymbolTable},
    settings::{MazeGenAlgo, Settings},
    AppError,
};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "growmaze")]
struct Args {
    #[clap(short, long, value_enum, help = "Maze algorithm, settings file value by default")]
    algorithm: Option<MazeGenAlgo>,
    #[clap(short, long, help = "Number of rows, border included")]
    rows: Option<i32>,
    #[clap(short, long, help = "Number of columns, border included")]
    cols: Option<i32>,
    #[clap(short, long, help = "Seed for reproducible mazes")]
    seed: Option<u64>,
    #[clap(long, action, help = "Replace every random choice with the first option")]
    no_rng: bool,
    #[clap(short, long, help = "Write the maze to a file instead of stdout")]
    output: Option<PathBuf>,
    #[clap(long, action, requires = "output", help = "Append to the output file")]
    append: bool,
    #[clap(long, action, help = "Print the growing maze after every step to stderr")]
    trace: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeat for more")]
    verbose: u8,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.reset_config {
        return Settings::reset_config(&Settings::default_path());
    }

    if args.show_config_path {
        let settings_path = Settings::default_path();
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(&Settings::default_path())?);
        return Ok(());
    }

    better_panic::install();
    if let Err(err) = logging::init(logging::level_from_verbosity(args.verbose)) {
        eprintln!("logger already set: {}", err);
    }

    let settings = Settings::load(&Settings::default_path())?;
    let symbols = settings.get_symbols();
    let algorithm = args.algorithm.unwrap_or_else(|| settings.get_algorithm());
    let size = Dims(
        args.cols.unwrap_or_else(|| settings.get_cols()),
        args.rows.unwrap_or_else(|| settings.get_rows()),
    );

    let mut params = settings.params();
    if args.no_rng {
        params.set("no_rng", true);
    }

    let spec = MazeSpec::new(size)
        .seed(args.seed)
        .algorithm(algorithm.registry_name())
        .params(params);
    let generator = Generator::from_maze_spec(&spec, &default_registry())?;

    let grid = match (args.trace, algorithm) {
        (true, MazeGenAlgo::Growth) => trace_growth(size, args.seed, args.no_rng, &symbols)?,
        (true, _) => {
            log::warn!("--trace only applies to the growth algorithm");
            generator.generate()
        }
        (false, _) => generator.generate(),
    };

    if !grid.start_reaches_end() {
        log::warn!("start and end are not connected in this maze");
    }

    render::save(&grid, &symbols, args.output.as_deref(), args.append)?;

    Ok(())
}

/// Runs the growth algorithm one step at a time, printing the grid in between.
fn trace_growth(
    size: Dims,
    seed: Option<u64>,
    no_rng: bool,
    symbols: &SymbolTable,
) -> Result<Grid, AppError> {
    let mut rng = new_rng(seed);
    let mut growth = Growth::new(size, &mut rng, no_rng);
    let mut stderr = io::stderr().lock();

    while growth.step() == GrowthState::Running {
        writeln!(
            stderr,
            "step {} ({} pathfinders)",
            growth.steps(),
            growth.pathfinders().len()
        )?;
        render::write_grid(&mut stderr, growth.grid(), symbols)?;
        writeln!(stderr)?;
    }

    Ok(growth.run())
}
