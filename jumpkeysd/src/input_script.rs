//! # Input Script Parser
//!
//! Line-based scripts that drive a simulated host deterministically.
//!
//! ## Format
//!
//! One step per line. Titles containing spaces are double-quoted.
//!
//! - `open <title> [shadow] [missing] [editing]`: open and display a document
//! - `display <title>`: display a document, opening it if needed
//! - `focus <title>`: focus a document's container
//! - `close <title>`: close a document from the host side
//! - `press <combo>` / `release <combo>` / `tap <combo>`: keyboard input,
//!   combos like `Ctrl`, `J`, `Shift+KeyE`, `ArrowDown`
//! - `click <x> <y>`: pointer down at viewport coordinates
//! - `blur`: the host window loses focus
//! - `jump`: invoke the host's jump command
//! - `theme`: the host stylesheet changed
//! - `# comment`
//!
//! ## Example
//!
//! ```text
//! open Alpha
//! open "Release Notes" editing
//! press Ctrl
//! tap J          # open the overlay
//! tap ArrowDown
//! release Ctrl   # jump
//! ```

use input_types::{KeyCode, Modifiers};
use services_jump_commands::parse_modifier;
use std::collections::VecDeque;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// Document flags for `open`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenFlags {
    pub shadow: bool,
    pub missing: bool,
    pub editing: bool,
}

/// A single scripted step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Open { title: String, flags: OpenFlags },
    Display(String),
    Focus(String),
    Close(String),
    Press(KeyCode, Modifiers),
    Release(KeyCode, Modifiers),
    Tap(KeyCode, Modifiers),
    Click { x: i32, y: i32 },
    Blur,
    Jump,
    Theme,
}

/// Parsed input script
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    steps: VecDeque<ScriptStep>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut steps = VecDeque::new();

        for (index, line) in text.lines().enumerate() {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }
            steps.push_back(Self::parse_line(line, index + 1)?);
        }

        if steps.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }
        Ok(Self { steps })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<ScriptStep, InputScriptError> {
        let parse_error = |message: String| InputScriptError::ParseError {
            line: line_num,
            message,
        };

        let tokens = tokenize(line).map_err(parse_error)?;
        let Some((command, args)) = tokens.split_first() else {
            return Err(parse_error("empty step".to_string()));
        };

        let single_arg = |name: &str| match args {
            [arg] => Ok(arg.clone()),
            _ => Err(parse_error(format!("'{}' takes exactly one argument", name))),
        };

        let step = match command.to_ascii_lowercase().as_str() {
            "open" => {
                let Some((title, flag_names)) = args.split_first() else {
                    return Err(parse_error("'open' needs a title".to_string()));
                };
                let mut flags = OpenFlags::default();
                for flag in flag_names {
                    match flag.to_ascii_lowercase().as_str() {
                        "shadow" => flags.shadow = true,
                        "missing" => flags.missing = true,
                        "editing" => flags.editing = true,
                        other => return Err(parse_error(format!("unknown flag '{}'", other))),
                    }
                }
                ScriptStep::Open {
                    title: title.clone(),
                    flags,
                }
            }
            "display" => ScriptStep::Display(single_arg("display")?),
            "focus" => ScriptStep::Focus(single_arg("focus")?),
            "close" => ScriptStep::Close(single_arg("close")?),
            "press" | "release" | "tap" => {
                let combo = single_arg(command.as_str())?;
                let (code, modifiers) = parse_combo(&combo)?;
                match command.to_ascii_lowercase().as_str() {
                    "press" => ScriptStep::Press(code, modifiers),
                    "release" => ScriptStep::Release(code, modifiers),
                    _ => ScriptStep::Tap(code, modifiers),
                }
            }
            "click" => match args {
                [x, y] => {
                    let coordinate = |value: &String| {
                        value
                            .parse::<i32>()
                            .map_err(|_| parse_error(format!("invalid coordinate '{}'", value)))
                    };
                    ScriptStep::Click {
                        x: coordinate(x)?,
                        y: coordinate(y)?,
                    }
                }
                _ => return Err(parse_error("'click' takes x and y".to_string())),
            },
            "blur" | "jump" | "theme" if !args.is_empty() => {
                return Err(parse_error(format!("'{}' takes no arguments", command)));
            }
            "blur" => ScriptStep::Blur,
            "jump" => ScriptStep::Jump,
            "theme" => ScriptStep::Theme,
            other => return Err(parse_error(format!("unknown command '{}'", other))),
        };
        Ok(step)
    }

    /// Returns the next step, if any
    pub fn next_step(&mut self) -> Option<ScriptStep> {
        self.steps.pop_front()
    }

    pub fn has_more(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (index, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..index],
            _ => {}
        }
    }
    line
}

/// Splits on whitespace, keeping double-quoted runs together
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if quoted || !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if quoted || !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parses a key combo (e.g., "Ctrl+J" → (KeyCode::J, Modifiers::CTRL))
pub fn parse_combo(combo: &str) -> Result<(KeyCode, Modifiers), InputScriptError> {
    let mut parts: Vec<&str> = combo.split('+').map(str::trim).collect();
    let key_name = parts.pop().unwrap_or_default();

    let mut modifiers = Modifiers::none();
    for name in parts {
        let flag = parse_modifier(name)
            .map_err(|_| InputScriptError::InvalidModifier(name.to_string()))?;
        modifiers = modifiers.with(flag);
    }

    Ok((parse_key_name(key_name)?, modifiers))
}

fn parse_key_name(name: &str) -> Result<KeyCode, InputScriptError> {
    let alias = match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyCode::LeftCtrl),
        "alt" | "option" => Some(KeyCode::LeftAlt),
        "shift" => Some(KeyCode::LeftShift),
        "meta" | "super" | "cmd" => Some(KeyCode::LeftMeta),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "esc" => Some(KeyCode::Escape),
        "return" => Some(KeyCode::Enter),
        _ => None,
    };

    let mut chars = name.chars();
    let single_char = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::from_char(c),
        _ => None,
    };

    alias
        .or(single_char)
        .or_else(|| KeyCode::from_code_name(name))
        .ok_or_else(|| InputScriptError::InvalidKeyName(name.to_string()))
}
