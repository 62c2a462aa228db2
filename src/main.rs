use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::process::ExitCode;
use tracing::{error, info};

use diagnosis_client::config::Config;
use diagnosis_client::credentials::Provider;
use diagnosis_client::diagnosis::DiagnosisSummary;
use diagnosis_client::{DiagnosisClient, DiagnosisSession, FormState, SubmissionResult};

/// Submit a patient's symptoms to the diagnosis service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Symptom narrative; the first line becomes the chief complaint
    #[arg(short, long, default_value = "")]
    symptoms: String,

    /// Patient age in years
    #[arg(short, long, default_value = "")]
    age: String,

    /// Patient sex or gender
    #[arg(short, long, default_value = "")]
    gender: String,

    /// Past medical history, comma separated
    #[arg(long, default_value = "")]
    history: String,

    /// Enable AI-assisted reasoning with your own provider key
    #[arg(long)]
    ai: bool,

    /// AI provider: "primary" (OpenAI) or "secondary" (OpenRouter)
    #[arg(long, default_value = "primary")]
    provider: Provider,

    /// API key for the selected provider
    #[arg(long, env = "DIAGNOSIS_PROVIDER_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Diagnosis service address (overrides config file and DIAGNOSIS_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Print the raw diagnosis JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Check that the service is reachable and exit
    #[arg(long)]
    status: bool,

    /// Write the resolved settings to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::resolve().with_base_url_override(args.base_url.clone());
    info!("Diagnosis service: {}", config.base_url);

    let client = DiagnosisClient::new(&config).context("Failed to create diagnosis client")?;

    if args.save_config {
        let path = config.save_default()?;
        println!("Saved settings to {:?}", path);
        return Ok(ExitCode::SUCCESS);
    }

    if args.status {
        return Ok(print_status(&client).await);
    }

    let mut form = FormState::new();
    form.symptoms = args.symptoms;
    form.age = args.age;
    form.gender = args.gender;
    form.medical_history = args.history;
    form.ai_enabled = args.ai;
    // Provider first: selecting a provider clears any key already held
    form.select_provider(args.provider);
    if let Some(key) = args.api_key {
        form.set_api_key(key);
    }

    let session = DiagnosisSession::new(client);
    match session.submit(&form).await {
        SubmissionResult::Success(body) => {
            println!("{}", render_diagnosis(&body, args.json)?);
            Ok(ExitCode::SUCCESS)
        }
        SubmissionResult::Failure(message) => {
            error!("Diagnosis failed: {}", message);
            eprintln!("\n{}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Summary report, or pretty JSON when asked for or when the body has nothing to summarize
fn render_diagnosis(body: &Value, raw_json: bool) -> Result<String> {
    if !raw_json {
        let report = DiagnosisSummary::from_body(body).render();
        if !report.is_empty() {
            return Ok(report);
        }
    }
    Ok(serde_json::to_string_pretty(body)?)
}

async fn print_status(client: &DiagnosisClient) -> ExitCode {
    match client.service_info().await {
        Ok(info) => {
            println!("{} {} - {}", info.service, info.version, info.status);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Service check failed: {}", e);
            eprintln!("\nDiagnosis service unreachable at {}: {}", client.base_url(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_summary_for_known_body() {
        let body = json!({"primary_diagnosis": {"condition_name": "Influenza"}});
        let text = render_diagnosis(&body, false).unwrap();
        assert!(text.contains("Primary diagnosis: Influenza"));
    }

    #[test]
    fn test_render_raw_json_when_requested() {
        let body = json!({"primary_diagnosis": {"condition_name": "Influenza"}});
        let text = render_diagnosis(&body, true).unwrap();
        assert!(text.contains("\"condition_name\": \"Influenza\""));
    }

    #[test]
    fn test_render_falls_back_to_json_for_unknown_body() {
        let text = render_diagnosis(&json!({"custom": 1}), false).unwrap();
        assert!(text.contains("\"custom\": 1"));
        assert_eq!(render_diagnosis(&Value::Null, false).unwrap(), "null");
    }

    #[test]
    fn test_save_config_flag_parses() {
        let args = Args::try_parse_from(["diagnose", "--save-config", "--base-url", "http://dx.local"])
            .unwrap();
        assert!(args.save_config);
        assert_eq!(args.base_url.as_deref(), Some("http://dx.local"));
    }
}
