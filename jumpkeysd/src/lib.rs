//! # Jump Keys Host Daemon
//!
//! Deterministic host for the jump-keys services: a simulated document
//! host, a script format to drive it, and a plain-text overlay renderer.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: Services never print; the runtime collects output
//! - **Output is frame rendering**: A frame is printed when its revision
//!   changes, not on every event
//! - **Deterministic mode is first-class**: The same script always yields
//!   the same transcript
//!
//! ## Non-Responsibilities
//!
//! The daemon does NOT:
//! - Read a real keyboard or pointer
//! - Emit ANSI escape codes
//! - Persist settings between runs

pub mod input_script;
pub mod renderer;
pub mod runtime;
pub mod sim_host;

pub use input_script::{InputScript, InputScriptError, OpenFlags, ScriptStep};
pub use renderer::TextRenderer;
pub use runtime::{load_config, read_text, HostRuntime, HostRuntimeConfig, HostRuntimeError};
pub use sim_host::SimHost;
