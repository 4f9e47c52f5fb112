//! # grompt
//!
//! Rephrase prompts using Groq LLM from the command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, warn};

use grompt::optimizer::estimate_tokens;
use grompt::{craft_system_message, rephrase_prompt, GroqClient, ModelParams, PromptCanvas, Settings};

#[derive(Parser, Debug)]
#[command(name = "grompt", version, about = "Rephrase prompts using Groq LLM.", long_about = None)]
struct Cli {
    /// The prompt to rephrase
    prompt: String,
    /// Model to use [env: GROMPT_DEFAULT_MODEL] [default: llama-3.3-70b-versatile]
    #[arg(long)]
    model: Option<String>,
    /// Sampling temperature [env: GROMPT_DEFAULT_TEMPERATURE] [default: 0.5]
    #[arg(long)]
    temperature: Option<f32>,
    /// Maximum tokens of the reply [env: GROMPT_DEFAULT_MAX_TOKENS] [default: 1024]
    #[arg(long = "max_tokens", visible_alias = "max-tokens")]
    max_tokens: Option<u16>,
    /// JSON file with a prompt canvas (persona, audience, task, steps, context, references, output_format, tonality)
    #[arg(long, value_name = "FILE")]
    canvas: Option<PathBuf>,
    /// Print the system message that would be sent and exit
    #[arg(long)]
    dry_run: bool,
    /// Render the rephrased prompt as markdown
    #[arg(long)]
    markdown: bool,
}

impl Cli {
    fn model_params(&self, settings: &Settings) -> ModelParams {
        let defaults = settings.model_params();
        ModelParams {
            model: self.model.clone().unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
        }
    }
}

fn load_canvas(path: &Path) -> Result<PromptCanvas> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read canvas file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse canvas file {}", path.display()))
}

/// The system message a run would send, followed by its estimated size.
fn dry_run_report(prompt: &str, canvas: Option<&PromptCanvas>, params: &ModelParams) -> Result<String> {
    let system_message = craft_system_message(canvas, prompt)?;
    Ok(format!("{}\n\n(~{} tokens, model {})", system_message, estimate_tokens(&system_message), params.model))
}

fn print_rephrased(rephrased: &str, markdown: bool) -> Result<()> {
    println!("Rephrased prompt:");
    if markdown {
        #[cfg(feature = "terminal_printing")]
        {
            grompt::utils::printing::MarkdownPrinter::for_terminal().print(rephrased)?;
            println!();
            return Ok(());
        }
        #[cfg(not(feature = "terminal_printing"))]
        warn!("built without terminal_printing, printing plain text");
    }
    println!("{}", rephrased);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env()?;
    let params = cli.model_params(&settings);
    let canvas = cli.canvas.as_deref().map(load_canvas).transpose()?;
    debug!("params: {:?}, canvas mode: {}", params, canvas.is_some());

    if cli.dry_run {
        println!("{}", dry_run_report(&cli.prompt, canvas.as_ref(), &params)?);
        return Ok(());
    }

    let client = GroqClient::from_settings(&settings, None)?;
    let rephrased = rephrase_prompt(&client, &cli.prompt, &params, canvas.as_ref()).await?;
    if rephrased.is_empty() {
        warn!("the model replied with whitespace only");
    }
    print_rephrased(&rephrased, cli.markdown)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
