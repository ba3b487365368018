use anyhow::Context;
use clap::Parser;
use swot_advisor::config::cli::load_user_input;
use swot_advisor::config::toml_config::TomlConfig;
use swot_advisor::core::orchestrator::ViewState;
use swot_advisor::core::report::render_report;
use swot_advisor::domain::model::{InputField, UserInput};
use swot_advisor::domain::ports::AnalysisService;
use swot_advisor::utils::{logger, validation::Validate};
use swot_advisor::{
    ClientArgs, GeminiInvoker, HttpAnalysisClient, LocalAnalysisService, MediationEndpoint,
    Orchestrator, ServerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClientArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let file = match &args.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    };
    file.validate()?;

    let input = load_user_input(&args.input)
        .with_context(|| format!("Failed to read input file '{}'", args.input))?;

    let endpoint = args.endpoint.clone().or_else(|| file.client.endpoint.clone());
    let exit_code = match endpoint {
        Some(url) => {
            tracing::info!("🌐 Using remote endpoint: {}", url);
            run(HttpAnalysisClient::new(url), input, &args).await?
        }
        None => {
            let config = ServerConfig::from_sources(None, None, args.model.clone(), None, file);
            config.validate()?;
            tracing::info!("🧠 Running the analysis in-process with model {}", config.model);
            let invoker = GeminiInvoker::from_config(&config);
            let service = LocalAnalysisService::new(MediationEndpoint::new(invoker, config.api_key));
            run(service, input, &args).await?
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run<S: AnalysisService>(
    service: S,
    input: UserInput,
    args: &ClientArgs,
) -> anyhow::Result<i32> {
    let mut orchestrator = Orchestrator::new(service);
    if let Some(form) = orchestrator.form_mut() {
        for field in InputField::ALL {
            form.set_field(field, input.get(field));
        }
    }

    println!("⏳ Analisando dados de mercado e suas informações...");
    if !orchestrator.submit().await {
        eprintln!("❌ Preencha todos os campos antes de gerar a análise:");
        if let Some(form) = orchestrator.form() {
            for (field, error) in form.errors() {
                eprintln!("   - {} ({}): {}", field.label(), field.key(), error);
            }
        }
        return Ok(1);
    }

    match orchestrator.state() {
        ViewState::Result(result) => {
            let report = render_report(result);
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                println!("{}", report);
            }
            if let Some(path) = &args.output {
                std::fs::write(path, &report)
                    .with_context(|| format!("Failed to write report to '{}'", path))?;
                println!("📁 Report saved to: {}", path);
            }
            Ok(0)
        }
        ViewState::Error(message) => {
            eprintln!("❌ {}", message);
            Ok(2)
        }
        other => {
            tracing::error!("Unexpected state after submission: {}", other.name());
            Ok(3)
        }
    }
}
