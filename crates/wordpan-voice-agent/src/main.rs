//! Wordpan voice quiz worker.
//!
//! Loads the shared deck, builds the quiz agent and runs a session. The
//! `console` subcommand stands in for a LiveKit room: each line typed is a
//! finished user transcript and the agent's replies are printed instead of
//! spoken.

mod console;

use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wordpan_llm::{ChatModel, LlmConfig, OpenAiClient};
use wordpan_store::{SupabaseClient, SupabaseConfig};
use wordpan_voice::{
    agent_attributes, load_public_word_pairs, QuizAgent, QuizWord, AGENT_IDENTITY,
    DEFAULT_AGENT_NAME,
    DEFAULT_TARGET_LANGUAGE, PUBLIC_DECK_LIMIT,
};

#[derive(Parser, Debug)]
#[command(name = "wordpan-voice-agent", version, about = "Spoken vocabulary quiz agent")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Settings {
    /// Supabase project URL; the public deck is skipped when unset
    #[arg(long, env = "SUPABASE_URL", default_value = "")]
    supabase_url: String,

    #[arg(long, env = "SUPABASE_ANON_KEY", default_value = "", hide_env_values = true)]
    supabase_anon_key: String,

    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    openai_api_key: String,

    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    #[arg(long, env = "WORDPAN_LLM_MODEL")]
    model: Option<String>,

    #[arg(long, env = "WORDPAN_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the quiz in the terminal
    Console(ConsoleArgs),
}

#[derive(Args, Debug)]
struct ConsoleArgs {
    /// Identity the typed lines are attributed to
    #[arg(long, default_value = "learner")]
    participant: String,

    /// Language the learner is practising
    #[arg(long, default_value = DEFAULT_TARGET_LANGUAGE)]
    target_language: String,
}

impl Settings {
    fn llm_config(&self) -> LlmConfig {
        let mut config = LlmConfig {
            api_key: self.openai_api_key.clone(),
            ..LlmConfig::default()
        };
        if let Some(base_url) = &self.openai_base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config
    }

    fn supabase_config(&self) -> SupabaseConfig {
        SupabaseConfig::new(&self.supabase_url, &self.supabase_anon_key)
    }
}

async fn load_words(settings: &Settings) -> Vec<QuizWord> {
    let config = settings.supabase_config();
    if !config.is_configured() {
        tracing::warn!("SUPABASE_URL or SUPABASE_ANON_KEY is not set; the model will pick words");
        return Vec::new();
    }
    match SupabaseClient::new(config) {
        Ok(client) => load_public_word_pairs(&client, PUBLIC_DECK_LIMIT).await,
        Err(e) => {
            tracing::error!("failed to create Supabase client: {}", e);
            Vec::new()
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::from_filename(".env.local").ok();
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_new(&cli.settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let model: Arc<dyn ChatModel> = match OpenAiClient::new(cli.settings.llm_config()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("failed to create model client: {}", e);
            std::process::exit(1);
        }
    };

    let words = load_words(&cli.settings).await;
    tracing::info!(count = words.len(), "loaded word pairs for voice quiz");

    match cli.command {
        Command::Console(args) => {
            tracing::info!(
                identity = AGENT_IDENTITY,
                agent_name = DEFAULT_AGENT_NAME,
                attributes = ?agent_attributes(),
                participant = %args.participant,
                "starting console session"
            );
            let mut agent = QuizAgent::new(
                model,
                Arc::new(console::PrintedSpeech),
                &words,
                &args.target_language,
            );
            if let Err(e) = console::run(&mut agent, &args.participant).await {
                tracing::error!("session ended with error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
