//! Scripted pad input.
//!
//! ```json
//! { "steps": [ { "frames": 30, "buttons": ["Up"] }, { "frames": 1, "buttons": ["A"] } ] }
//! ```
//!
//! Each step holds its buttons for `frames` frames. After the last step the
//! pad is released.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use blue_core::input::DigitalButtons;

#[derive(Debug, Clone, Deserialize)]
struct ScriptFile {
    steps: Vec<StepFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct StepFile {
    frames: u32,
    #[serde(default)]
    buttons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    pub frames: u32,
    pub buttons: DigitalButtons,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: ScriptFile = serde_json::from_str(json).context("malformed input script")?;
        let mut steps = Vec::with_capacity(file.steps.len());
        for (i, step) in file.steps.into_iter().enumerate() {
            let mut buttons = DigitalButtons::empty();
            for name in &step.buttons {
                match DigitalButtons::parse_name(name) {
                    Some(button) => buttons |= button,
                    None => bail!("step {i}: unknown button {name:?}"),
                }
            }
            steps.push(ScriptStep {
                frames: step.frames,
                buttons,
            });
        }
        Ok(Self { steps })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading input script {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Total frames covered by the steps.
    pub fn len_frames(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Buttons held on `frame`, counting from zero.
    pub fn buttons_at(&self, frame: u64) -> DigitalButtons {
        let mut start = 0u64;
        for step in &self.steps {
            let end = start + u64::from(step.frames);
            if frame < end {
                return step.buttons;
            }
            start = end;
        }
        DigitalButtons::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = InputScript::from_json(
            r#"{ "steps": [
                { "frames": 2, "buttons": ["up", "A"] },
                { "frames": 1 },
                { "frames": 3, "buttons": ["Right"] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(script.steps().len(), 3);
        assert_eq!(script.len_frames(), 6);
        assert_eq!(script.buttons_at(0), DigitalButtons::UP | DigitalButtons::A);
        assert_eq!(script.buttons_at(1), DigitalButtons::UP | DigitalButtons::A);
        assert_eq!(script.buttons_at(2), DigitalButtons::empty());
        assert_eq!(script.buttons_at(5), DigitalButtons::RIGHT);
    }

    #[test]
    fn test_released_after_last_step() {
        let script = InputScript::new(vec![ScriptStep {
            frames: 4,
            buttons: DigitalButtons::B,
        }]);
        assert_eq!(script.buttons_at(3), DigitalButtons::B);
        assert_eq!(script.buttons_at(4), DigitalButtons::empty());
        assert_eq!(script.buttons_at(1_000), DigitalButtons::empty());
    }

    #[test]
    fn test_unknown_button_rejected() {
        let err = InputScript::from_json(r#"{ "steps": [ { "frames": 1, "buttons": ["Jump"] } ] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("Jump"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{ "steps": [ { "frames": 5, "buttons": ["Down"] } ] }"#).unwrap();

        let script = InputScript::load(&path).unwrap();
        assert_eq!(script.buttons_at(4), DigitalButtons::DOWN);
    }
}
