use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use projectile_sim::app::{
    self, AppError, LaunchValues, OutputFormat, ParameterSource, PlotTarget, RunOptions,
};
use projectile_sim::core::ballistics::EARTH_GRAVITY_MPS2;
use projectile_sim::report::{NoPause, Reporter, SleepPacer};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "projectile_sim")]
#[command(version)]
#[command(about = "Projectile motion without air resistance", long_about = None)]
#[command(after_help = "Run without launch values to be prompted for them.")]
struct Cli {
    /// Initial velocity (m/s)
    #[arg(short = 'v', long, allow_negative_numbers = true, requires = "angle")]
    velocity: Option<f64>,

    /// Launch angle above horizontal (degrees, 0-90)
    #[arg(short = 'a', long, allow_negative_numbers = true, requires = "velocity")]
    angle: Option<f64>,

    /// Initial height (m) [default: 0]
    #[arg(long, allow_negative_numbers = true, requires = "velocity")]
    height: Option<f64>,

    /// Gravitational acceleration (m/s^2) [default: 9.8]
    #[arg(short = 'g', long, allow_negative_numbers = true, requires = "velocity")]
    gravity: Option<f64>,

    /// Output format for the results
    #[arg(short = 'o', long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Save a plot (.png, .bmp or .svg); without a path a timestamped PNG is written
    #[arg(long, num_args = 0..=1, value_name = "PATH", conflicts_with = "window")]
    plot: Option<Option<PathBuf>>,

    /// Show the trajectory in a window instead of saving a file
    #[arg(long)]
    window: bool,

    /// Also print the closed-form flight time, max height and range
    #[arg(long)]
    analytic: bool,

    /// Leave the impact annotation off saved plots
    #[arg(long)]
    no_labels: bool,

    /// Skip the pauses between interactive output lines
    #[arg(long)]
    no_pause: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        let values = match (self.velocity, self.angle) {
            (Some(speed_mps), Some(angle_deg)) => Some(LaunchValues {
                speed_mps,
                angle_deg,
                height_m: self.height.unwrap_or(0.0),
                gravity_mps2: self.gravity.unwrap_or(EARTH_GRAVITY_MPS2),
            }),
            _ => None,
        };

        let plot = match (&self.plot, self.window) {
            (_, true) => PlotTarget::Window,
            (Some(Some(path)), false) => PlotTarget::File(path.clone()),
            (Some(None), false) => PlotTarget::TimestampedFile,
            (None, false) => PlotTarget::None,
        };

        RunOptions {
            values,
            format: match self.format {
                Format::Text => OutputFormat::Text,
                Format::Json => OutputFormat::Json,
            },
            plot,
            analytic: self.analytic,
            labels: !self.no_labels,
        }
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let options = cli.run_options();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let color = !cli.no_color && stdout.is_terminal();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    let mut console = io::stderr().lock();

    let paced = options.source() == ParameterSource::Interactive && !cli.no_pause;
    if paced {
        let mut reporter = Reporter::new(SleepPacer, color);
        app::run(&options, &mut input, &mut out, &mut console, &mut reporter)
    } else {
        let mut reporter = Reporter::new(NoPause, color);
        app::run(&options, &mut input, &mut out, &mut console, &mut reporter)
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
