//! # Host Runtime
//!
//! Replays a script against a simulated host with jump keys installed,
//! collecting host side effects and rendered overlay frames as output.

use crate::input_script::{InputScript, InputScriptError, OpenFlags, ScriptStep};
use crate::renderer::TextRenderer;
use crate::sim_host::{scripted_document, SimHost};
use input_types::{InputEvent, KeyCode, KeyEvent, Modifiers};
use jump_types::{DocumentId, OpenDocument, Size};
use services_jump_commands::SETTINGS_ID;
use services_jump_keys::{JumpKeys, JumpKeysConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    ScriptError(#[from] InputScriptError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] serde_json::Error),
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    /// Input script text
    pub script: Option<String>,
    pub jump_keys: JumpKeysConfig,
    /// Bindings text stored in the host before install
    pub bindings: Option<String>,
    pub viewport: Size,
    /// Maximum steps to run (0 = unlimited)
    pub max_steps: usize,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            script: None,
            jump_keys: JumpKeysConfig::default(),
            bindings: None,
            viewport: Size::new(1024, 768),
            max_steps: 0,
        }
    }
}

/// Reads a whole text file
pub fn read_text(path: &Path) -> Result<String, HostRuntimeError> {
    fs::read_to_string(path).map_err(|source| HostRuntimeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a JSON adapter configuration file; absent fields take defaults
pub fn load_config(path: &Path) -> Result<JumpKeysConfig, HostRuntimeError> {
    Ok(serde_json::from_str(&read_text(path)?)?)
}

/// Host runtime
pub struct HostRuntime {
    keys: JumpKeys<SimHost>,
    renderer: TextRenderer,
    script: Option<InputScript>,
    /// Modifier keys currently down on the simulated keyboard
    keyboard: Modifiers,
    max_steps: usize,
    steps: usize,
    output: Vec<String>,
}

impl HostRuntime {
    /// Creates a runtime and installs jump keys into its host
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let script = config
            .script
            .as_deref()
            .map(InputScript::from_text)
            .transpose()?;

        let mut host = SimHost::new(config.viewport);
        if let Some(bindings) = config.bindings {
            host.store_settings(SETTINGS_ID, bindings);
        }

        let mut keys = JumpKeys::new(host, config.jump_keys);
        keys.install();

        let mut runtime = Self {
            renderer: TextRenderer::starting_at(keys.overlay().revision()),
            keys,
            script,
            keyboard: Modifiers::none(),
            max_steps: config.max_steps,
            steps: 0,
            output: Vec::new(),
        };
        runtime.collect_output();
        Ok(runtime)
    }

    /// Runs until the script is exhausted or the step limit is reached
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Executes the next script step
    ///
    /// Returns false when there is nothing left to run.
    pub fn step(&mut self) -> bool {
        if self.max_steps > 0 && self.steps >= self.max_steps {
            return false;
        }
        let Some(step) = self.script.as_mut().and_then(InputScript::next_step) else {
            return false;
        };

        debug!(?step, "script step");
        self.apply(step);
        self.steps += 1;
        self.collect_output();
        true
    }

    /// Applies one step to the host and the jump keys adapter
    pub fn apply(&mut self, step: ScriptStep) {
        match step {
            ScriptStep::Open { title, flags } => self.open(&title, flags),
            ScriptStep::Display(title) => {
                let id = DocumentId::new(title);
                if !self.keys.host().is_open(&id) {
                    self.keys.host_mut().open(OpenDocument::new(id.clone()));
                }
                self.keys.host_mut().set_active(&id);
                self.keys.on_document_displayed(&id);
            }
            ScriptStep::Focus(title) => {
                let id = DocumentId::new(title);
                if !self.keys.host().is_open(&id) {
                    warn!(document = %id, "focus on a document that is not open");
                    return;
                }
                self.keys.host_mut().set_active(&id);
                self.keys.on_document_focused(&id);
            }
            ScriptStep::Close(title) => {
                let id = DocumentId::new(title);
                if self.keys.host_mut().close(&id) {
                    self.keys.on_document_closed(&id);
                } else {
                    warn!(document = %id, "close of a document that is not open");
                }
            }
            ScriptStep::Press(code, modifiers) => self.press(code, modifiers),
            ScriptStep::Release(code, modifiers) => self.release(code, modifiers),
            ScriptStep::Tap(code, modifiers) => {
                self.press(code, modifiers);
                self.release(code, modifiers);
            }
            ScriptStep::Click { x, y } => {
                self.keys.handle_event(&InputEvent::pointer_down(x, y));
            }
            ScriptStep::Blur => {
                self.keys.handle_event(&InputEvent::blur());
            }
            ScriptStep::Jump => {
                self.keys.on_jump_command();
            }
            ScriptStep::Theme => self.keys.on_theme_changed(),
        }
    }

    fn open(&mut self, title: &str, flags: OpenFlags) {
        let document = scripted_document(title, flags.shadow, flags.missing, flags.editing);
        let id = document.id.clone();
        if !self.keys.host_mut().open(document) {
            warn!(document = %id, "document already open");
            return;
        }
        self.keys.host_mut().set_active(&id);
        self.keys.on_document_displayed(&id);
    }

    fn press(&mut self, code: KeyCode, modifiers: Modifiers) {
        if let Some(flag) = code.modifier_flag() {
            self.keyboard = self.keyboard.with(flag);
        }
        let event = KeyEvent::pressed(code, self.keyboard.with(modifiers));
        self.keys.handle_event(&InputEvent::key(event));
    }

    fn release(&mut self, code: KeyCode, modifiers: Modifiers) {
        if let Some(flag) = code.modifier_flag() {
            self.keyboard = self.keyboard.without(flag);
        }
        let event = KeyEvent::released(code, self.keyboard.with(modifiers));
        self.keys.handle_event(&InputEvent::key(event));
    }

    fn collect_output(&mut self) {
        let log = self.keys.host_mut().take_log();
        self.output
            .extend(log.into_iter().map(|line| format!("host: {}", line)));

        let revision = self.keys.overlay().revision();
        let frame = self.keys.frame();
        if let Some(text) = self.renderer.render_if_changed(revision, frame.as_ref()) {
            self.output.push(text);
        }
    }

    /// Removes and returns output produced so far
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn keys(&self) -> &JumpKeys<SimHost> {
        &self.keys
    }

    pub fn host(&self) -> &SimHost {
        self.keys.host()
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }
}
