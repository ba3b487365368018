use clap::Parser;
use swot_advisor::adapters::server::{build_router, GENERATE_PATH};
use swot_advisor::utils::error::{ErrorSeverity, SwotError};
use swot_advisor::utils::{logger, validation::Validate};
use swot_advisor::{GeminiInvoker, MediationEndpoint, ServerArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting swot-advisor server");
    if args.verbose {
        tracing::debug!("Server args: {:?}", args);
    }

    // 載入並驗證配置
    let config = match ServerConfig::resolve(&args).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if config.api_key.is_none() {
        tracing::warn!(
            "⚠️ API_KEY is not set; {} will answer with a configuration error",
            GENERATE_PATH
        );
    }

    let invoker = GeminiInvoker::new(config.model.clone(), config.api_base_url.clone());
    let endpoint = MediationEndpoint::new(invoker, config.api_key);
    let router = build_router(endpoint);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("⚡ Listening on http://{}{} (model: {})", addr, GENERATE_PATH, config.model);
    println!("⚡ swot-advisor listening on http://{}{}", addr, GENERATE_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn exit_with(e: SwotError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
