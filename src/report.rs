use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use serde::Serialize;

use crate::core::ballistics::{AnalyticSolution, TrajectoryResult};

const STEP_PAUSE: Duration = Duration::from_secs(1);

/// Delay between console lines. Purely cosmetic.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _duration: Duration) {}
}

#[derive(Clone, Copy)]
enum Tone {
    Title,
    Heading,
    Label,
    Progress,
    Done,
}

pub struct Reporter<P> {
    pacer: P,
    color: bool,
    step_pause: Duration,
}

impl<P: Pacer> Reporter<P> {
    pub fn new(pacer: P, color: bool) -> Self {
        Self {
            pacer,
            color,
            step_pause: STEP_PAUSE,
        }
    }

    pub fn with_step_pause(mut self, step_pause: Duration) -> Self {
        self.step_pause = step_pause;
        self
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Title => text.magenta().bold().to_string(),
            Tone::Heading => text.cyan().bold().to_string(),
            Tone::Label => text.yellow().bold().to_string(),
            Tone::Progress => text.blue().bold().to_string(),
            Tone::Done => text.green().bold().to_string(),
        }
    }

    fn pause(&mut self) {
        self.pacer.pause(self.step_pause);
    }

    /// Clears the terminal and prints the title with suggested input ranges.
    pub fn banner<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.color {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(out, "{}", self.paint("=== Projectile Simulator ===", Tone::Title))?;
        writeln!(out, "Suggested values:")?;
        writeln!(out, "- Velocity: between 10 and 50 m/s")?;
        writeln!(out, "- Angle: between 0 and 45 degrees")?;
        writeln!(out, "- Initial height: between 0 and 10 meters")?;
        writeln!(out, "- Gravity: usually 9.8 m/s^2")?;
        Ok(())
    }

    pub fn status<W: Write>(&mut self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", self.paint(message, Tone::Progress))?;
        out.flush()?;
        self.pause();
        Ok(())
    }

    pub fn finished<W: Write>(&mut self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", self.paint(message, Tone::Done))
    }

    fn metric<W: Write>(&mut self, out: &mut W, label: &str, value: String) -> io::Result<()> {
        writeln!(out, "{} {value}", self.paint(label, Tone::Label))?;
        out.flush()?;
        self.pause();
        Ok(())
    }

    pub fn results<W: Write>(&mut self, out: &mut W, result: &TrajectoryResult) -> io::Result<()> {
        writeln!(out, "\n{}", self.paint("=== Results ===", Tone::Heading))?;
        self.pause();
        self.metric(out, "Max height:", format!("{:.2} meters", result.max_height_m()))?;
        self.metric(
            out,
            "Distance traveled:",
            format!("{:.2} meters", result.total_distance_m()),
        )?;
        self.metric(
            out,
            "Flight time:",
            format!("{:.2} seconds\n", result.flight_time_s()),
        )
    }

    pub fn analytic<W: Write>(&mut self, out: &mut W, exact: &AnalyticSolution) -> io::Result<()> {
        writeln!(out, "{}", self.paint("=== Closed-form reference ===", Tone::Heading))?;
        writeln!(
            out,
            "Max height {:.2} m | Range {:.2} m | Flight time {:.2} s\n",
            exact.max_height_m, exact.range_m, exact.flight_time_s
        )
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a TrajectoryResult,
    analytic: AnalyticSolution,
}

/// Writes the result, its samples and the closed-form reference as one
/// pretty-printed JSON document followed by a newline.
pub fn write_json<W: Write>(out: &mut W, result: &TrajectoryResult) -> io::Result<()> {
    let report = JsonReport {
        result,
        analytic: AnalyticSolution::for_parameters(result.parameters()),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
