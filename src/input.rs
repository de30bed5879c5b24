use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::core::ballistics::{
    ProjectileParameters, check_angle, check_gravity, check_height, check_speed,
};
use crate::core::error::ValidationError;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Could not read input: {0}")]
    Io(#[from] io::Error),

    #[error("Input ended unexpectedly (EOF).")]
    Eof,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            return Err(InputError::Eof);
        }
        Ok(line.trim().to_string())
    }

    /// Asks until the answer parses as a number.
    pub fn read_f64(&mut self, prompt: &str) -> Result<f64, InputError> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<f64>() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(
                    self.writer,
                    "Please enter a valid number (e.g., 45 or 12.5)."
                )?,
            }
        }
    }

    /// Reads velocity, angle, height and gravity in that order. Each value is
    /// checked as soon as it is entered; the first bad one ends the prompt.
    pub fn read_parameters(&mut self) -> Result<ProjectileParameters, InputError> {
        let speed = check_speed(self.read_f64("\nInitial velocity (m/s): ")?)?;
        let angle = check_angle(self.read_f64("Launch angle (degrees): ")?)?;
        let height = check_height(self.read_f64("Initial height (m): ")?)?;
        let gravity = check_gravity(self.read_f64("Gravity (m/s^2): ")?)?;
        Ok(ProjectileParameters::new(speed, angle, height, gravity)?)
    }

    pub fn confirm(&mut self, prompt: &str) -> Result<bool, InputError> {
        let answer = self.read_line(prompt)?.to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes" | "s"))
    }
}
