use clap::Parser;
use payctl::{
    Application, Config,
    client::{EmployeeForm, PayrollClient},
    config::{Args, Command, EstimateArgs},
    telemetry,
};

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Load an employee (stored or unsaved) against a running server and print its estimate.
async fn estimate(args: &EstimateArgs) -> anyhow::Result<()> {
    let client = PayrollClient::new(args.server.clone())?;

    let mut form = match (args.employee, &args.name) {
        (Some(id), _) => EmployeeForm::edit(client, id),
        (None, name) => {
            let mut form = EmployeeForm::create(client);
            form.set_employee_name(name.clone().unwrap_or_default());
            for dependent in &args.dependents {
                form.add_dependent(dependent.clone());
            }
            form
        }
    };
    form.load().await?;

    let Some(estimate) = form.estimate() else {
        anyhow::bail!("No estimate available: configuration was not loaded");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(estimate)?);
    } else {
        println!("{estimate}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before anything else that might build a TLS client.
    // An already-installed provider is fine.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    if let Some(Command::Estimate(estimate_args)) = &args.command {
        telemetry::init_telemetry(false)?;
        return estimate(estimate_args).await;
    }

    let config = Config::load(&args)?;

    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry(config.enable_otel_export)?;

    tracing::debug!("{:?}", args);

    let shutdown = shutdown_signal();
    Application::new(config).await?.serve(shutdown).await
}
