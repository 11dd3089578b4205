use clap::Parser;
use ls_core::{AnalyzeTextRequest, CreateArticleRequest, Result};
use ls_inference::{InferenceConfig, DEFAULT_LOCATION, DEFAULT_MODEL_NAME, DEFAULT_PROJECT};
use ls_web::AppState;
use std::net::{IpAddr, SocketAddr};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Language study article service", long_about = None)]
pub struct Cli {
    /// Document store backend: memory or sqlite
    #[arg(long, env = "LANGSTUDY_STORAGE", default_value = "memory", global = true)]
    storage: String,
    /// Backend location, e.g. the SQLite database path
    #[arg(long, env = "LANGSTUDY_BACKEND_URL", global = true)]
    backend_url: Option<String>,
    #[arg(
        long,
        env = "LANGSTUDY_MODEL",
        default_value = "gemini",
        global = true,
        help = "Model backend to use. Available models: gemini (default), vertex, dummy"
    )]
    model: String,
    #[arg(long, env = "LANGSTUDY_MODEL_NAME", default_value = DEFAULT_MODEL_NAME, global = true)]
    model_name: String,
    /// Endpoint base override, up to and including `/models`
    #[arg(long, env = "LANGSTUDY_MODEL_URL", global = true)]
    model_url: Option<String>,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, env = "VERTEX_ACCESS_TOKEN", hide_env_values = true, global = true)]
    access_token: Option<String>,
    #[arg(long, env = "LANGSTUDY_PROJECT", default_value = DEFAULT_PROJECT, global = true)]
    project: String,
    #[arg(long, env = "LANGSTUDY_LOCATION", default_value = DEFAULT_LOCATION, global = true)]
    location: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the createArticle and analyzeText endpoints
    Serve {
        #[arg(long, env = "LANGSTUDY_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "LANGSTUDY_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Generate and store one article, printing it as JSON
    Create {
        #[arg(long)]
        topic: String,
        #[arg(long)]
        source_lang: String,
        #[arg(long)]
        target_lang: String,
        #[arg(long, default_value = "local")]
        uid: String,
    },
    /// Analyze a span of a stored article, printing the result as JSON
    Analyze {
        #[arg(long)]
        article_id: String,
        #[arg(long)]
        selected_text: String,
        #[arg(long)]
        start: usize,
        #[arg(long)]
        end: usize,
    },
}

impl Cli {
    fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            model: self.model.clone(),
            model_name: self.model_name.clone(),
            model_url: self.model_url.clone(),
            api_key: self.api_key.clone(),
            access_token: self.access_token.clone(),
            project: self.project.clone(),
            location: self.location.clone(),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    info!("💾 Opening {} storage...", cli.storage);
    let storage = ls_storage::create_storage(cli.storage.as_str(), cli.backend_url.as_deref()).await?;

    let model = ls_inference::create_model(&cli.inference_config()).await?;
    info!("🧠 Inference model initialized (using {})", model.name());

    let state = AppState::new(model, storage);

    match cli.command {
        Commands::Serve { host, port } => {
            ls_web::serve(SocketAddr::new(host, port), state).await?;
        }
        Commands::Create { topic, source_lang, target_lang, uid } => {
            let request = CreateArticleRequest {
                topic: Some(topic),
                source_lang: Some(source_lang),
                target_lang: Some(target_lang),
                uid: Some(uid),
            };
            let article = state.generator.create_article(&request).await?;
            println!("{}", serde_json::to_string_pretty(&article)?);
        }
        Commands::Analyze { article_id, selected_text, start, end } => {
            let request = AnalyzeTextRequest {
                article_id: Some(article_id),
                selected_text: Some(selected_text),
                start_index: Some(start),
                end_index: Some(end),
            };
            let response = state.analyzer.analyze_text(&request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["langstudy", "--model", "dummy", "serve"]).unwrap();
        assert_eq!(cli.model, "dummy");
        assert_eq!(cli.model_name, DEFAULT_MODEL_NAME);
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, 8080),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "langstudy",
            "analyze",
            "--article-id",
            "a1",
            "--selected-text",
            "DEF",
            "--start",
            "3",
            "--end",
            "6",
            "--storage",
            "sqlite",
        ])
        .unwrap();
        assert_eq!(cli.storage, "sqlite");
        let config = cli.inference_config();
        assert_eq!(config.project, DEFAULT_PROJECT);
        match cli.command {
            Commands::Analyze { start, end, .. } => assert_eq!((start, end), (3, 6)),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
