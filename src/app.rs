use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;

use crate::core::ballistics::{AnalyticSolution, ProjectileParameters, TrajectoryResult, compute};
use crate::core::error::{SimulationError, ValidationError};
use crate::input::{InputError, Prompter};
use crate::render::{RenderError, TrajectoryRenderer, default_plot_path};
use crate::report::{Pacer, Reporter, write_json};
use crate::viewer;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Could not write output: {0}")]
    Io(#[from] io::Error),
}

/// Raw launch values as given on the command line, not yet validated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchValues {
    pub speed_mps: f64,
    pub angle_deg: f64,
    pub height_m: f64,
    pub gravity_mps2: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterSource {
    Interactive,
    Given,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlotTarget {
    None,
    File(PathBuf),
    TimestampedFile,
    Window,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    pub values: Option<LaunchValues>,
    pub format: OutputFormat,
    pub plot: PlotTarget,
    pub analytic: bool,
    pub labels: bool,
}

impl RunOptions {
    pub fn source(&self) -> ParameterSource {
        if self.values.is_some() {
            ParameterSource::Given
        } else {
            ParameterSource::Interactive
        }
    }
}

/// One simulation run: acquire parameters, compute, report, optionally plot.
/// Every error ends the run; nothing is retried.
///
/// Results go to `out`. With JSON output, prompts and status lines go to
/// `console` instead so `out` holds only the JSON document.
pub fn run<R: BufRead, W: Write, C: Write, P: Pacer>(
    options: &RunOptions,
    input: &mut R,
    out: &mut W,
    console: &mut C,
    reporter: &mut Reporter<P>,
) -> Result<(), AppError> {
    match (options.values, options.format) {
        (None, OutputFormat::Text) => {
            run_interactive(options, input, out, None::<&mut W>, reporter)
        }
        (None, OutputFormat::Json) => run_interactive(options, input, console, Some(out), reporter),
        (Some(values), format) => {
            let params = ProjectileParameters::new(
                values.speed_mps,
                values.angle_deg,
                values.height_m,
                values.gravity_mps2,
            )?;
            let result = compute(params)?;
            match format {
                OutputFormat::Text => {
                    present_results(options, out, reporter, &result)?;
                    display_plot(&options.plot, options, out, reporter, &result)
                }
                OutputFormat::Json => {
                    write_json(out, &result)?;
                    display_plot(&options.plot, options, console, reporter, &result)
                }
            }
        }
    }
}

fn run_interactive<R: BufRead, C: Write, W: Write, P: Pacer>(
    options: &RunOptions,
    input: &mut R,
    chat: &mut C,
    json_out: Option<&mut W>,
    reporter: &mut Reporter<P>,
) -> Result<(), AppError> {
    reporter.banner(chat)?;
    let params = Prompter::new(&mut *input, &mut *chat).read_parameters()?;

    reporter.status(chat, "\nCalculating trajectory...")?;
    let result = compute(params)?;

    reporter.status(chat, "Displaying results...")?;
    match json_out {
        Some(out) => write_json(out, &result)?,
        None => present_results(options, chat, reporter, &result)?,
    }

    let show = Prompter::new(&mut *input, &mut *chat)
        .confirm("Show the simulation plot? (y/n): ")?;
    if !show {
        reporter.finished(chat, "Simulation finished without a plot.")?;
        return Ok(());
    }

    let target = match &options.plot {
        PlotTarget::None => PlotTarget::TimestampedFile,
        other => other.clone(),
    };
    reporter.status(chat, "Opening the trajectory plot...")?;
    display_plot(&target, options, chat, reporter, &result)
}

fn present_results<W: Write, P: Pacer>(
    options: &RunOptions,
    out: &mut W,
    reporter: &mut Reporter<P>,
    result: &TrajectoryResult,
) -> Result<(), AppError> {
    reporter.results(out, result)?;
    if options.analytic {
        reporter.analytic(out, &AnalyticSolution::for_parameters(result.parameters()))?;
    }
    Ok(())
}

fn display_plot<W: Write, P: Pacer>(
    target: &PlotTarget,
    options: &RunOptions,
    chat: &mut W,
    reporter: &mut Reporter<P>,
    result: &TrajectoryResult,
) -> Result<(), AppError> {
    let path = match target {
        PlotTarget::None => return Ok(()),
        PlotTarget::Window => {
            viewer::show(result);
            return Ok(());
        }
        PlotTarget::File(path) => path.clone(),
        PlotTarget::TimestampedFile => default_plot_path(&Local::now()),
    };

    let renderer = TrajectoryRenderer::new(path).with_labels(options.labels);
    renderer.render(result)?;
    reporter.finished(chat, &format!("Plot saved to {}", renderer.path().display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NoPause;
    use std::io::Cursor;

    fn options(values: Option<LaunchValues>) -> RunOptions {
        RunOptions {
            values,
            format: OutputFormat::Text,
            plot: PlotTarget::None,
            analytic: false,
            labels: false,
        }
    }

    fn launch(speed_mps: f64, angle_deg: f64) -> LaunchValues {
        LaunchValues {
            speed_mps,
            angle_deg,
            height_m: 0.0,
            gravity_mps2: 9.8,
        }
    }

    struct Captured {
        outcome: Result<(), AppError>,
        out: String,
        console: String,
    }

    fn capture(options: &RunOptions, input: &str) -> Captured {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut console = Vec::new();
        let mut reporter = Reporter::new(NoPause, false);
        let outcome = run(options, &mut reader, &mut out, &mut console, &mut reporter);
        Captured {
            outcome,
            out: String::from_utf8(out).expect("utf8 output"),
            console: String::from_utf8(console).expect("utf8 console"),
        }
    }

    fn run_with(options: &RunOptions, input: &str) -> (Result<(), AppError>, String) {
        let captured = capture(options, input);
        assert!(captured.console.is_empty());
        (captured.outcome, captured.out)
    }

    #[test]
    fn interactive_session_without_plot() {
        let opts = options(None);
        assert_eq!(opts.source(), ParameterSource::Interactive);

        let (outcome, text) = run_with(&opts, "20\n45\n0\n9.8\nn\n");
        outcome.expect("session should finish");
        assert!(text.contains("=== Projectile Simulator ==="));
        assert!(text.contains("Calculating trajectory..."));
        assert!(text.contains("Max height: 10.20 meters"));
        assert!(text.contains("Show the simulation plot?"));
        assert!(text.ends_with("Simulation finished without a plot.\n"));
    }

    #[test]
    fn interactive_session_aborts_on_bad_angle() {
        let (outcome, text) = run_with(&options(None), "20\n95\n");
        assert!(matches!(
            outcome,
            Err(AppError::Input(InputError::Invalid(
                ValidationError::AngleOutOfRange { .. }
            )))
        ));
        assert!(!text.contains("Calculating trajectory"));
    }

    #[test]
    fn interactive_session_saves_plot_on_yes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session.svg");
        let mut opts = options(None);
        opts.plot = PlotTarget::File(path.clone());

        let (outcome, text) = run_with(&opts, "15\n30\n2\n9.8\ny\n");
        outcome.expect("session should finish");
        assert!(path.exists());
        assert!(text.contains("Plot saved to"));
    }

    #[test]
    fn given_values_skip_prompts() {
        let mut opts = options(Some(launch(20.0, 45.0)));
        opts.analytic = true;
        assert_eq!(opts.source(), ParameterSource::Given);

        let (outcome, text) = run_with(&opts, "");
        outcome.expect("run should finish");
        assert!(!text.contains("Initial velocity"));
        assert!(text.contains("Flight time: 2.90 seconds"));
        assert!(text.contains("Closed-form reference"));
    }

    #[test]
    fn given_values_are_validated() {
        let mut values = launch(20.0, 45.0);
        values.gravity_mps2 = -9.8;
        let (outcome, text) = run_with(&options(Some(values)), "");
        assert!(matches!(
            outcome,
            Err(AppError::Invalid(ValidationError::NonPositiveGravity { .. }))
        ));
        assert!(text.is_empty());
    }

    #[test]
    fn json_output_is_a_single_document() {
        let mut opts = options(Some(launch(10.0, 30.0)));
        opts.format = OutputFormat::Json;
        let (outcome, text) = run_with(&opts, "");
        outcome.expect("run should finish");

        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["parameters"]["speed_mps"], 10.0);
    }

    #[test]
    fn interactive_json_keeps_prompts_off_the_result_stream() {
        let mut opts = options(None);
        opts.format = OutputFormat::Json;

        let captured = capture(&opts, "20\n45\n0\n9.8\nn\n");
        captured.outcome.expect("session should finish");

        let value: serde_json::Value =
            serde_json::from_str(&captured.out).expect("stdout holds only json");
        assert_eq!(value["parameters"]["angle_deg"], 45.0);
        assert!(captured.console.contains("Initial velocity (m/s): "));
        assert!(captured.console.contains("Calculating trajectory..."));
        assert!(captured.console.contains("Simulation finished without a plot."));
    }

    #[test]
    fn json_plot_notice_goes_to_console() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("given.svg");
        let mut opts = options(Some(launch(12.0, 40.0)));
        opts.format = OutputFormat::Json;
        opts.plot = PlotTarget::File(path.clone());

        let captured = capture(&opts, "");
        captured.outcome.expect("run should finish");
        assert!(path.exists());
        assert!(serde_json::from_str::<serde_json::Value>(&captured.out).is_ok());
        assert!(captured.console.contains("Plot saved to"));
    }
}
