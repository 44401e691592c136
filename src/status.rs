//! Status report: block state, hosts path, privileges, process backend.

use crate::hosts;
use crate::platform::HostsEditor;
use crate::process::ProcessBackend;

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

/// Run all status checks against `editor`. Read-only.
pub fn run_checks(editor: &dyn HostsEditor, backend: ProcessBackend) -> Vec<CheckResult> {
    let path = editor.path();
    let mut results = Vec::new();

    match hosts::block_active(editor) {
        Ok(true) => results.push(CheckResult {
            ok: true,
            message: format!("Bloqueo ACTIVO en {}", path.display()),
        }),
        Ok(false) => results.push(CheckResult {
            ok: true,
            message: format!("Bloqueo INACTIVO en {}", path.display()),
        }),
        Err(e) => results.push(CheckResult {
            ok: false,
            message: format!("No se pudo leer {}: {e:#}", path.display()),
        }),
    }

    if crate::privilege::has_admin_privileges(path) {
        results.push(CheckResult {
            ok: true,
            message: "Privilegios suficientes para modificar hosts".to_string(),
        });
    } else {
        results.push(CheckResult {
            ok: false,
            message: "Sin privilegios para modificar hosts (usa sudo)".to_string(),
        });
    }

    results.push(CheckResult {
        ok: true,
        message: format!("Cierre de procesos: {backend}"),
    });

    results
}
