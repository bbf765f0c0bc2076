use anyhow::Result;
use serverhealth::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        service = version::NAME,
        version = version::VERSION,
        proc_path = %app_config.paths.proc_path.display(),
        sys_path = %app_config.paths.sys_path.display(),
        "{}",
        version::DESCRIPTION
    );

    let runner: Arc<dyn command::CommandRunner> = Arc::new(command::SystemCommandRunner);
    let bandwidth_cache = bandwidth::BandwidthCache::new();
    let collector = Arc::new(collector::HealthCollector::new(
        procfs_repo::ProcfsRepo::new(
            app_config.paths.proc_path.clone(),
            app_config.paths.sys_path.clone(),
        ),
        docker_repo::DockerRepo::new(runner.clone(), app_config.docker.program.clone()),
        bandwidth_cache.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn_bandwidth_refresher(
        worker::WorkerDeps {
            probe: Arc::new(bandwidth::BandwidthProbe::new(
                runner,
                app_config.bandwidth.probe_config(),
            )),
            cache: bandwidth_cache,
            shutdown_rx: Some(shutdown_rx),
        },
        worker::WorkerConfig {
            refresh_interval_secs: app_config.bandwidth.refresh_interval_secs,
        },
    );

    let app = routes::app(collector, app_config.server.web_root.clone());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    let _ = worker_handle.await;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
