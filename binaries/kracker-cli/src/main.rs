//! KrackerXR CLI
//!
//! Command-line access to the cipher wheel and the campaign rules.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kracker_cipher::{analysis, angle_to_shift, shift_to_angle, transform, Mode, Shift};
use kracker_config::Settings;
use kracker_game::progress::format_elapsed;
use kracker_game::{Attempt, Campaign, GateState, Leaderboard, Progress, SubmissionGate};

#[derive(Parser)]
#[command(name = "kracker")]
#[command(about = "KrackerXR - Caesar wheel, puzzles and leaderboard")]
#[command(version)]
struct Cli {
    /// Campaign document (overrides config and KRACKER_CAMPAIGN)
    #[arg(long, global = true)]
    campaign: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text with the wheel at SHIFT
    Encode {
        #[arg(short, long, allow_negative_numbers = true)]
        shift: i64,

        /// Text to encode
        text: String,
    },

    /// Decode text with the wheel at SHIFT
    Decode {
        #[arg(short, long, allow_negative_numbers = true)]
        shift: i64,

        /// Text to decode
        text: String,
    },

    /// Transform using the configured default mode, or --mode
    Transform {
        #[arg(short, long, allow_negative_numbers = true)]
        shift: i64,

        /// encode or decode
        #[arg(short, long)]
        mode: Option<Mode>,

        text: String,
    },

    /// Snap a drag angle (degrees) to a shift
    Snap {
        #[arg(allow_negative_numbers = true)]
        angle: f64,
    },

    /// Resting wheel angle for a shift
    Angle {
        #[arg(allow_negative_numbers = true)]
        shift: i64,
    },

    /// Try every shift and rank by how English the result looks
    Crack {
        /// Ciphertext
        text: String,

        /// Number of candidates to show
        #[arg(short, long, default_value_t = 5)]
        top: usize,
    },

    /// List the campaign's stages
    Stages,

    /// Submit an answer for a stage
    Check {
        /// Stage id
        stage: String,

        /// Answer text
        answer: String,

        /// Wheel position when submitting
        #[arg(short, long, allow_negative_numbers = true)]
        shift: Option<i64>,

        /// Submit even if the wheel disagrees with the puzzle
        #[arg(long)]
        confirm_mismatch: bool,

        /// Override text, used once if the answer is wrong
        #[arg(long = "override")]
        override_text: Option<String>,
    },

    /// Rank players from a progress file (JSON array)
    Leaderboard {
        progress: PathBuf,

        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(path) = cli.campaign {
        settings.campaign_path = path;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(campaign = %settings.campaign_path.display(), "settings loaded");

    match cli.command {
        Commands::Encode { shift, text } => cmd_transform(&text, shift, Mode::Encode),
        Commands::Decode { shift, text } => cmd_transform(&text, shift, Mode::Decode),
        Commands::Transform { shift, mode, text } => {
            cmd_transform(&text, shift, mode.unwrap_or(settings.default_mode))
        }
        Commands::Snap { angle } => cmd_snap(angle),
        Commands::Angle { shift } => cmd_angle(shift),
        Commands::Crack { text, top } => cmd_crack(&text, top),
        Commands::Stages => cmd_stages(&settings.campaign_path),
        Commands::Check {
            stage,
            answer,
            shift,
            confirm_mismatch,
            override_text,
        } => cmd_check(
            &settings.campaign_path,
            &stage,
            answer,
            shift,
            confirm_mismatch,
            override_text,
        ),
        Commands::Leaderboard { progress, top } => {
            cmd_leaderboard(&settings.campaign_path, &progress, top)
        }
    }
}

fn cmd_transform(text: &str, shift: i64, mode: Mode) -> Result<()> {
    let result = transform(text, shift, mode);

    println!("\n  {} (shift {})", mode.name().to_uppercase(), Shift::new(shift));
    println!("  Input:  {}", text);
    println!("  Output: {}", result);
    Ok(())
}

fn cmd_snap(angle: f64) -> Result<()> {
    let shift = angle_to_shift(angle);

    println!("\n  WHEEL SNAP");
    println!("  Angle:   {:.2}°", angle);
    println!("  Shift:   {}", shift);
    println!("  Snap to: {:.2}°", shift_to_angle(shift));
    Ok(())
}

fn cmd_angle(shift: i64) -> Result<()> {
    let shift = Shift::new(shift);

    println!("\n  Shift {} rests at {:.4}°", shift, shift_to_angle(shift));
    Ok(())
}

fn cmd_crack(text: &str, top: usize) -> Result<()> {
    println!("\n  CAESAR CANDIDATES");
    println!("  =================\n");

    if analysis::best_guess(text).is_none() {
        println!("  No letters to analyze.");
        return Ok(());
    }

    for candidate in analysis::rank(text).iter().take(top) {
        println!(
            "  [{:>2}] {:>8.3}  {}",
            candidate.shift, candidate.score, candidate.text
        );
    }
    Ok(())
}

fn load_campaign(path: &Path) -> Result<Campaign> {
    Campaign::load(path).with_context(|| format!("Failed to load campaign {}", path.display()))
}

fn cmd_stages(path: &Path) -> Result<()> {
    let campaign = load_campaign(path)?;

    let title = if campaign.title.is_empty() {
        "CAMPAIGN"
    } else {
        campaign.title.as_str()
    };
    println!("\n  {}", title);
    println!("  {}\n", "=".repeat(40));

    if campaign.is_empty() {
        println!("  No stages.");
    }

    for (i, stage) in campaign.stages.iter().enumerate() {
        println!("  {:>2}. {} [{}] {}", i + 1, stage.id, stage.puzzle.kind(), stage.title);
        if !stage.content.briefing.is_empty() {
            println!("      {}", stage.content.briefing);
        }
        if let Some(prompt) = stage.puzzle.prompt() {
            println!("      > {}", prompt);
        }
        for clue in &stage.content.clues {
            println!("      * {}", clue);
        }
    }
    Ok(())
}

fn cmd_check(
    path: &Path,
    stage_id: &str,
    answer: String,
    shift: Option<i64>,
    confirm_mismatch: bool,
    override_text: Option<String>,
) -> Result<()> {
    let campaign = load_campaign(path)?;
    let stage = campaign
        .stage(stage_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown stage: {}", stage_id))?;

    let mut attempt = Attempt::new(answer);
    if let Some(shift) = shift {
        attempt = attempt.with_shift(Shift::new(shift));
    }

    let mut gate = SubmissionGate::new(stage);
    let mut state = gate.submit(attempt)?;

    if let GateState::ConfirmMismatch { expected, actual } = state {
        println!("\n  The wheel shows shift {}, this puzzle expects {}.", actual, expected);
        if !confirm_mismatch {
            println!("  Re-run with --confirm-mismatch to submit anyway.");
            gate.cancel()?;
            return Ok(());
        }
        state = gate.confirm_mismatch()?;
    }

    if state == GateState::AwaitingOverride {
        match override_text {
            Some(text) => state = gate.submit_override(&text)?,
            None => {
                println!("\n  INCORRECT");
                println!("  An override is available: re-run with --override <TEXT>.");
                return Ok(());
            }
        }
    }

    match state {
        GateState::Solved => println!("\n  SOLVED: {}", stage.id),
        _ => println!("\n  INCORRECT"),
    }
    Ok(())
}

fn cmd_leaderboard(campaign_path: &Path, progress_path: &Path, top: usize) -> Result<()> {
    let campaign = load_campaign(campaign_path)?;
    let raw = std::fs::read_to_string(progress_path)
        .with_context(|| format!("Failed to read {}", progress_path.display()))?;
    let progresses: Vec<Progress> = serde_json::from_str(&raw).context("Invalid progress file")?;

    let now = chrono::Utc::now();
    let board = Leaderboard::rank(&progresses, &campaign, now);
    let shown = Leaderboard {
        entries: board.top(top).to_vec(),
    };

    println!();
    println!("{}", shown.render(campaign.len()));

    if let Some(leader) = board.entries.first() {
        println!(
            "\n  Leader: {} ({})",
            leader.player,
            format_elapsed(chrono::Duration::seconds(leader.elapsed_secs))
        );
    }
    Ok(())
}
