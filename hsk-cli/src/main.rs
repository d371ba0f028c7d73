use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use hsk::tracing::prefix;
use hsk::AppConfig;
use hsk_core::practice::PracticeController;
use hsk_core::session::{EndPolicy, LevelFilter, SessionMode, SessionSequencer};
use hsk_core::srs::ReviewScheduler;
use hsk_core::vocabulary::{fallback_words, JsonVocabulary, VocabularyItem, VocabularyStore};

mod app;
mod progress;

use app::App;
use progress::ProgressFile;

#[derive(Parser, Debug)]
#[command(name = "hsk-practice")]
#[command(about = "HSK vocabulary flashcards with spaced repetition")]
#[command(version)]
struct Args {
    /// JSON config file (missing file means defaults)
    #[arg(short, long, default_value = "hsk.json")]
    config: PathBuf,

    /// Vocabulary JSON file (bundled HSK 1 starter words if omitted)
    #[arg(short, long)]
    vocabulary: Option<PathBuf>,

    /// Progress file
    #[arg(short, long)]
    progress: Option<PathBuf>,

    /// HSK level to practice (1-6)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
    level: Option<u8>,

    /// Which words to practice
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Start over from the first word instead of ending the session
    #[arg(long)]
    wrap: bool,

    /// Maximum number of words per session
    #[arg(long)]
    limit: Option<usize>,

    /// Seed for a reproducible word order
    #[arg(long)]
    seed: Option<u64>,

    /// Multiple-choice quiz instead of self-graded flashcards
    #[arg(short, long)]
    quiz: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Every word of the selected level
    All,
    /// Only words due for review
    Due,
}

impl Args {
    /// Command-line flags take precedence over the config file.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.vocabulary {
            config.vocabulary_path = Some(path.clone());
        }
        if let Some(path) = &self.progress {
            config.progress_path = path.clone();
        }
        if let Some(level) = self.level {
            config.session.level = LevelFilter::Level(level);
        }
        if let Some(mode) = self.mode {
            config.session.mode = match mode {
                ModeArg::All => SessionMode::All,
                ModeArg::Due => SessionMode::DueOnly,
            };
        }
        if self.wrap {
            config.session.end_policy = EndPolicy::Wrap;
        }
        if self.limit.is_some() {
            config.session.limit = self.limit;
        }
        if self.seed.is_some() {
            config.session.seed = self.seed;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    hsk::tracing::init_with_filter(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "hsk-practice failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> hsk::Result<()> {
    let mut config = AppConfig::load_or_default(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    let words = load_words(&config);
    info!("{} {} words available", prefix::SESSION, words.len());

    let store = ProgressFile::open(&config.progress_path)?;
    let scheduler = ReviewScheduler::with_config(config.scheduler.clone())?;
    let sequencer = match config.session.seed {
        Some(seed) => SessionSequencer::with_seed(seed),
        None => SessionSequencer::new(),
    };

    let practice = PracticeController::new(words, store)
        .with_scheduler(scheduler)
        .with_sequencer(sequencer);

    let mut app = App::new(practice, now_ms).with_quiz(args.quiz);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    app.run(config.session.clone(), stdin.lock(), &mut stdout)
}

/// Read the configured word list, falling back to the bundled words when it
/// is missing or unreadable.
fn load_words(config: &AppConfig) -> Vec<VocabularyItem> {
    let Some(path) = &config.vocabulary_path else {
        return fallback_words();
    };

    match fs::read_to_string(path) {
        Ok(text) => {
            let words = JsonVocabulary::new(text)
                .with_fallback(fallback_words())
                .load();
            if words.is_empty() {
                warn!(path = %path.display(), "vocabulary file has no usable words, using starter list");
                return fallback_words();
            }
            words
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "vocabulary unavailable, using starter list");
            fallback_words()
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "hsk-practice",
            "--level",
            "2",
            "--mode",
            "due",
            "--wrap",
            "--progress",
            "p.json",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.session.level, LevelFilter::Level(2));
        assert_eq!(config.session.mode, SessionMode::DueOnly);
        assert_eq!(config.session.end_policy, EndPolicy::Wrap);
        assert_eq!(config.progress_path, PathBuf::from("p.json"));
        assert_eq!(config.vocabulary_path, None);
    }

    #[test]
    fn test_level_out_of_range_rejected() {
        assert!(Args::try_parse_from(["hsk-practice", "--level", "7"]).is_err());
    }

    #[test]
    fn test_load_words_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        assert_eq!(load_words(&config), fallback_words());

        config.vocabulary_path = Some(dir.path().join("missing.json"));
        assert_eq!(load_words(&config), fallback_words());

        let path = dir.path().join("words.json");
        fs::write(
            &path,
            r#"{"words": [{"hanzi": "猫", "pinyin": "māo", "english": "cat", "hsk": 1}]}"#,
        )
        .unwrap();
        config.vocabulary_path = Some(path);
        let words = load_words(&config);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].id, "hsk1-猫");
    }
}
