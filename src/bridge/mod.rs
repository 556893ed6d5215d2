//! One-shot, synchronous script execution against other applications.

pub mod osascript;
pub mod value;

pub use osascript::OsascriptBridge;
pub use value::ScriptValue;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to launch script runner: {0}")]
    Launch(#[from] std::io::Error),

    #[error("script failed ({status}): {stderr}")]
    Script { status: String, stderr: String },

    #[error("unreadable script result: {0}")]
    Parse(String),
}

/// Runs a script to completion and returns its decoded result.
pub trait ScriptBridge {
    fn execute(&self, source: &str) -> Result<ScriptValue, BridgeError>;
}

impl<B: ScriptBridge + ?Sized> ScriptBridge for &B {
    fn execute(&self, source: &str) -> Result<ScriptValue, BridgeError> {
        (**self).execute(source)
    }
}

impl<B: ScriptBridge + ?Sized> ScriptBridge for std::rc::Rc<B> {
    fn execute(&self, source: &str) -> Result<ScriptValue, BridgeError> {
        (**self).execute(source)
    }
}
