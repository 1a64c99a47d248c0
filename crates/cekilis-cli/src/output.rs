use cekilis_core::{resolve_cekilis_config_path, ConfigPathScope, Error, Result};
use serde_json::{json, Value};

use crate::CliError;

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

/// JSON mode prints `payload` on one line; text mode prints `text` lines.
pub(crate) fn emit(output_mode: OutputMode, payload: &Value, text: &[String]) -> Result<()> {
    if output_mode.json {
        let line = serde_json::to_string(payload)
            .map_err(|e| Error::Config(format!("encode output: {e}")))?;
        println!("{line}");
    } else {
        for line in text {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn emit_config_paths(output_mode: OutputMode) -> Result<()> {
    let user = resolve_cekilis_config_path(ConfigPathScope::User);
    let workspace = resolve_cekilis_config_path(ConfigPathScope::Workspace);
    emit(
        output_mode,
        &json!({
            "user": user,
            "workspace": workspace,
        }),
        &[
            format!("user={}", user.display()),
            format!("workspace={}", workspace.display()),
        ],
    )
}

pub(crate) fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
