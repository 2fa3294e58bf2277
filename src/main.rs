//! CLI renderer for the VeganChef engine.
//!
//! A deliberately thin front-end: it collects typed input, hands it to the
//! orchestration engine, and prints whatever comes back.  All coordination
//! logic lives in the library.
//!
//! # Startup sequence
//!
//! 1. Initialise logging (`env_logger`, `RUST_LOG` controlled).
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the two service clients and the orchestrator.
//! 4. Detect a local speech command for optional narration.
//! 5. Run the read-eval loop until `:quit` / EOF.
//!
//! # Commands
//!
//! * `:quit` / `:q` - exit.
//! * `:reset`       - clear the conversation log.
//! * `:speak`       - narrate the most recent recipe.
//! * `:stop`        - cancel narration.
//! * anything else  - treated as ingredients or a dish idea.

use std::io::{BufRead, Write};
use std::sync::Arc;

use veganchef::compliance::warning_message;
use veganchef::config::AppConfig;
use veganchef::generate::ChatCompletionsGenerator;
use veganchef::pipeline::RecipeOrchestrator;
use veganchef::search::SpoonacularClient;
use veganchef::session::SessionAggregator;
use veganchef::voice::{LocalCommandSynthesizer, SpeechPlaybackController, SpeechSynthesizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load()?;
    log::info!(
        "veganchef starting (generation={}, search={})",
        config.generation.base_url,
        config.search.base_url
    );

    let orchestrator = RecipeOrchestrator::new(
        Arc::new(ChatCompletionsGenerator::from_config(&config.generation)),
        Arc::new(SpoonacularClient::from_config(&config.search)),
    )
    .with_max_related(config.search.max_results);

    let mut session = SessionAggregator::new();

    // Narration uses the local speech command only; the CLI has no audio
    // sink for the networked provider's byte stream.
    let mut playback = local_playback(&config);

    println!("VeganChef: describe ingredients or a dish idea (:quit to exit)");

    let stdin = std::io::stdin();
    let mut last_narrative: Option<String> = None;

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":reset" => {
                session.reset();
                println!("(session cleared)");
                continue;
            }
            ":stop" => {
                if let Some(playback) = playback.as_mut() {
                    playback.stop();
                }
                continue;
            }
            ":speak" => {
                narrate(playback.as_mut(), last_narrative.as_deref()).await;
                continue;
            }
            _ => {}
        }

        session.push_user(input);

        let artifact = match orchestrator.acquire(input).await {
            Ok(artifact) => artifact,
            Err(e) => {
                // EmptyInput is the only error acquire returns.
                println!("{e}");
                continue;
            }
        };

        if let Some(banner) = warning_message(&artifact.warnings) {
            println!("\n⚠ {banner}");
        }

        println!("\n{}\n", artifact.narrative);

        if artifact.related.is_empty() {
            println!("(no related recipes this time)");
        } else {
            println!("More vegan recipes you can try:");
            for recipe in &artifact.related {
                print!("  - {}", recipe.title);
                if let Some(minutes) = recipe.ready_in_minutes {
                    print!(" ({minutes} min)");
                }
                println!();
                if let Some(summary) = recipe.display_summary() {
                    println!("      {summary}");
                }
                println!("      {}", recipe.source_url());
            }
        }

        session.push_assistant(artifact.narrative.as_str());
        last_narrative = Some(artifact.narrative);

        log::debug!("session turns = {}", session.count());
    }

    println!("Goodbye! ({} turns this session)", session.count());
    Ok(())
}

/// Build a playback controller over the detected local speech command, or
/// the one named in config.  `None` means narration is unavailable.
fn local_playback(config: &AppConfig) -> Option<SpeechPlaybackController> {
    let synth = match &config.voice.local_command {
        Some(program) => LocalCommandSynthesizer::new(program),
        None => LocalCommandSynthesizer::detect()?,
    };
    log::debug!("narration via {}", synth.program());
    let fallback: Arc<dyn SpeechSynthesizer> = Arc::new(synth);
    Some(SpeechPlaybackController::new(None, fallback))
}

/// Narrate `text` if both a playback path and a recipe exist.
async fn narrate(playback: Option<&mut SpeechPlaybackController>, text: Option<&str>) {
    let Some(playback) = playback else {
        println!("(narration unavailable: no local speech command found)");
        return;
    };
    let Some(text) = text else {
        println!("(nothing to narrate yet)");
        return;
    };
    if let Err(e) = playback.speak(text).await {
        // Lost narration is never fatal.
        log::warn!("narration failed: {e}");
        println!("(narration failed)");
    }
}
