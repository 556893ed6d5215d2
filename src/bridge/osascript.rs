use std::process::Command;

use super::{BridgeError, ScriptBridge, ScriptValue};

/// Executes AppleScript through `osascript`, reading results in source form.
#[derive(Debug, Clone)]
pub struct OsascriptBridge {
    program: String,
}

impl OsascriptBridge {
    pub fn new() -> Self {
        Self {
            program: "osascript".to_string(),
        }
    }

    /// Use another runner binary (same command-line contract as osascript).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for OsascriptBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBridge for OsascriptBridge {
    fn execute(&self, source: &str) -> Result<ScriptValue, BridgeError> {
        let output = Command::new(&self.program)
            .arg("-ss")
            .arg("-e")
            .arg(source)
            .output()?;

        if !output.status.success() {
            return Err(BridgeError::Script {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        ScriptValue::parse(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_runner_is_launch_error() {
        let bridge = OsascriptBridge::with_program("definitely-not-a-real-osascript");
        let err = bridge.execute("return 1").unwrap_err();
        assert!(matches!(err, BridgeError::Launch(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_script_reports_stderr() {
        // `false` accepts any arguments and exits non-zero
        let bridge = OsascriptBridge::with_program("false");
        let err = bridge.execute("return 1").unwrap_err();
        assert!(matches!(err, BridgeError::Script { .. }));
    }
}
