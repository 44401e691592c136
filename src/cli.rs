//! CLI definitions and flag dispatch.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::time::Duration;

use crate::config::{AppPaths, Config};
use crate::hosts::{self, BlockChange};
use crate::platform::HostsEditor;
use crate::process::{self, ProcessBackend};
use crate::watch::{self, CancelToken};

#[derive(Parser, Debug)]
#[command(name = "bloqueo")]
#[command(about = "Bloquear/Desbloquear WhatsApp (hosts) y vigilar procesos.")]
pub struct Cli {
    /// Añade dominios de WhatsApp al archivo hosts
    #[arg(long)]
    pub activar: bool,

    /// Elimina el bloqueo del archivo hosts
    #[arg(long)]
    pub desactivar: bool,

    /// Cierra la app de WhatsApp si se abre (Ctrl+C para salir)
    #[arg(long)]
    pub vigilar: bool,

    /// Segundos entre revisiones en modo vigilar (default: 5)
    #[arg(long, value_name = "SEGUNDOS", value_parser = clap::value_parser!(u64).range(1..))]
    pub intervalo: Option<u64>,

    /// Muestra si el bloqueo está activo y los privilegios disponibles
    #[arg(long)]
    pub estado: bool,

    /// Registro detallado en stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn any_action(&self) -> bool {
        self.activar || self.desactivar || self.vigilar || self.estado
    }
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    if !cli.any_action() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let paths = AppPaths::default_paths();
    let config = Config::load(&paths)?;
    let hosts_path = config.hosts_path();
    tracing::debug!(hosts = %hosts_path.display(), config = %paths.config_file.display(), "resolved paths");
    let editor = crate::platform::default_hosts_editor(&hosts_path);

    if (cli.activar || cli.desactivar) && !crate::privilege::has_admin_privileges(&hosts_path) {
        println!(
            "⚠️ Ejecuta este programa con privilegios de administrador (sudo) para modificar el archivo hosts."
        );
        return Ok(());
    }

    if cli.activar {
        cmd_activate(editor.as_ref())?;
    }
    if cli.desactivar {
        cmd_deactivate(editor.as_ref())?;
    }
    if cli.estado {
        cmd_status(editor.as_ref());
    }
    if cli.vigilar {
        let interval = Duration::from_secs(config.interval_secs(cli.intervalo));
        cmd_watch(interval)?;
    }
    Ok(())
}

fn cmd_activate(editor: &dyn HostsEditor) -> Result<()> {
    match hosts::activate(editor)? {
        BlockChange::Applied => println!("Bloqueo de WhatsApp ACTIVADO en hosts."),
        BlockChange::Unchanged => println!("Ya estaba bloqueado."),
    }
    Ok(())
}

fn cmd_deactivate(editor: &dyn HostsEditor) -> Result<()> {
    match hosts::deactivate(editor)? {
        BlockChange::Applied => println!("Bloqueo de WhatsApp DESACTIVADO en hosts."),
        BlockChange::Unchanged => println!("No había bloqueo previo."),
    }
    Ok(())
}

fn cmd_status(editor: &dyn HostsEditor) {
    for check in crate::status::run_checks(editor, ProcessBackend::detect()) {
        let mark = if check.ok { "ok" } else { "!!" };
        println!("[{mark}] {}", check.message);
    }
}

fn cmd_watch(interval: Duration) -> Result<()> {
    let token = CancelToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("could not install Ctrl+C handler")?;

    let killer = process::default_process_killer();
    println!("Vigilando apertura de WhatsApp (Ctrl+C para salir)...");
    watch::watch(killer.as_ref(), interval, &token, |report| {
        if let Some(msg) = report.message() {
            println!("{msg}");
        }
    });
    println!("\nVigilancia detenida.");
    Ok(())
}
