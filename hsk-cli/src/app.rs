//! Interactive terminal practice loop
//!
//! Reads one command per line and renders the controller state after each
//! one. Input and output are generic so the loop runs against in-memory
//! buffers in tests.

use std::io::{BufRead, Write};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use hsk::tracing::prefix;
use hsk::Result;
use hsk_core::practice::{CardPhase, GradeOutcome, PracticeController, PracticeEvent, SessionStatus};
use hsk_core::quiz::{build_question, QuizQuestion, DEFAULT_CHOICES};
use hsk_core::session::{LevelFilter, SessionConfig, SessionMode};
use hsk_core::srs::Grade;
use hsk_core::storage::ProgressStore;

/// One parsed line of input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Empty line: reveal, advance, or start over depending on the card
    Continue,
    Number(u8),
    Known(bool),
    Stats,
    Reset,
    Level(LevelFilter),
    Mode(SessionMode),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or("");
        let arg = words.next();

        match (head, arg) {
            ("", _) => Command::Continue,
            ("q" | "quit" | "exit", None) => Command::Quit,
            ("s" | "stats", None) => Command::Stats,
            ("r" | "reset", None) => Command::Reset,
            ("y" | "yes", None) => Command::Known(true),
            ("n" | "no", None) => Command::Known(false),
            ("h" | "help" | "?", None) => Command::Help,
            ("l" | "level", Some("all" | "0")) => Command::Level(LevelFilter::All),
            ("l" | "level", Some(n)) => match n.parse::<u8>() {
                Ok(level) if hsk_core::vocabulary::is_valid_level(level) => {
                    Command::Level(LevelFilter::Level(level))
                }
                _ => Command::Unknown(line.clone()),
            },
            ("m" | "mode", Some("all")) => Command::Mode(SessionMode::All),
            ("m" | "mode", Some("due")) => Command::Mode(SessionMode::DueOnly),
            (n, None) => match n.parse::<u8>() {
                Ok(n) => Command::Number(n),
                Err(_) => Command::Unknown(line.clone()),
            },
            _ => Command::Unknown(line.clone()),
        }
    }
}

const HELP: &str = "\
Commands:
  Enter      reveal the answer / next card
  1-4        grade: 1 again, 2 hard, 3 good, 4 easy (quiz: pick an answer)
  y / n      knew it / didn't know it
  s          show statistics
  r          reset statistics
  l <1-6|all> change HSK level
  m <all|due> practice all words or only due ones
  q          quit";

/// Terminal front end over a practice controller
pub struct App<S: ProgressStore> {
    practice: PracticeController<S>,
    clock: fn() -> i64,
    quiz_mode: bool,
    question: Option<QuizQuestion>,
    /// The current card has no distractors and is shown as a flashcard
    flashcard_only: bool,
    last_outcome: Option<GradeOutcome>,
}

impl<S: ProgressStore> App<S> {
    pub fn new(practice: PracticeController<S>, clock: fn() -> i64) -> Self {
        Self {
            practice,
            clock,
            quiz_mode: false,
            question: None,
            flashcard_only: false,
            last_outcome: None,
        }
    }

    /// Answer multiple-choice questions instead of self-grading.
    pub fn with_quiz(mut self, quiz_mode: bool) -> Self {
        self.quiz_mode = quiz_mode;
        self
    }

    pub fn practice(&self) -> &PracticeController<S> {
        &self.practice
    }

    /// Run until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        config: SessionConfig,
        mut input: R,
        out: &mut W,
    ) -> Result<()> {
        writeln!(
            out,
            "HSK practice: {} words loaded. Type h for help.",
            self.practice.pool().len()
        )?;
        self.practice.start_session(config, (self.clock)());

        loop {
            self.print_events(out)?;
            self.render(out)?;
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            match Command::parse(&line) {
                Command::Quit => break,
                command => self.handle(command, &mut input, out)?,
            }
        }

        self.print_events(out)?;
        writeln!(out)?;
        self.print_stats(out)?;
        Ok(())
    }

    fn handle<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        debug!(?command, "command");
        let now = (self.clock)();
        let phase = self.practice.card().phase;
        let has_card = self.practice.card().current_item.is_some();

        match command {
            Command::Continue => match self.practice.status() {
                SessionStatus::Complete | SessionStatus::Idle => {
                    let config = self.practice.session_config().clone();
                    self.practice.start_session(config, now);
                }
                SessionStatus::Empty => writeln!(out, "Try another level or mode (h for help).")?,
                SessionStatus::Active => match phase {
                    CardPhase::Hidden if self.quizzing() => {
                        writeln!(out, "Pick an answer (1-{}).", self.choice_count())?
                    }
                    CardPhase::Hidden => report(out, self.practice.reveal())?,
                    CardPhase::Revealed => writeln!(out, "Grade the card first (1-4, y/n).")?,
                    CardPhase::Graded => {
                        let advanced = self.practice.advance_to_next().map(|_| ());
                        self.clear_card();
                        report(out, advanced)?;
                    }
                },
            },
            Command::Number(n) if self.quizzing() && has_card && phase == CardPhase::Hidden => {
                self.answer_quiz(n, now, out)?;
            }
            Command::Number(n) => match n.to_string().parse::<Grade>() {
                Ok(grade) => self.grade(grade, now, out)?,
                Err(_) => writeln!(out, "Grades are 1-4.")?,
            },
            Command::Known(known) => self.grade(Grade::from_known(known), now, out)?,
            Command::Stats => self.print_stats(out)?,
            Command::Reset => {
                write!(out, "Reset all statistics? [y/N] ")?;
                out.flush()?;
                let mut answer = String::new();
                input.read_line(&mut answer)?;
                if Command::parse(&answer) == Command::Known(true) {
                    self.practice.reset_stats();
                    writeln!(out, "Statistics reset.")?;
                } else {
                    writeln!(out, "Kept statistics.")?;
                }
            }
            Command::Level(level) => {
                self.clear_card();
                self.practice.change_level(level, now);
            }
            Command::Mode(mode) => {
                self.clear_card();
                self.practice.change_mode(mode, now);
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Unknown(text) => writeln!(out, "Unknown command '{}' (h for help).", text)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn grade<W: Write>(&mut self, grade: Grade, now: i64, out: &mut W) -> Result<()> {
        match self.practice.grade(grade, now) {
            Ok(outcome) => {
                info!(
                    "{} {} graded {}, next in {} days",
                    prefix::SRS,
                    outcome.item_id,
                    grade,
                    outcome.review.interval_days
                );
                self.last_outcome = Some(outcome);
                Ok(())
            }
            Err(e) => {
                writeln!(out, "{}", e)?;
                Ok(())
            }
        }
    }

    fn answer_quiz<W: Write>(&mut self, choice: u8, now: i64, out: &mut W) -> Result<()> {
        let Some(question) = self.question.as_ref() else {
            return Ok(writeln!(out, "No question to answer.")?);
        };
        let index = usize::from(choice);
        if index == 0 || index > question.choices.len() {
            return Ok(writeln!(out, "Pick an answer (1-{}).", question.choices.len())?);
        }
        let grade = match question.answer(index - 1) {
            Ok(grade) => grade,
            Err(e) => return Ok(writeln!(out, "{}", e)?),
        };

        if grade.is_success() {
            writeln!(out, "Correct!")?;
        } else {
            writeln!(out, "Wrong, it was: {}", question.correct_choice())?;
        }
        if let Err(e) = self.practice.reveal() {
            return Ok(writeln!(out, "{}", e)?);
        }
        self.grade(grade, now, out)
    }

    fn choice_count(&self) -> usize {
        self.question
            .as_ref()
            .map(|q| q.choices.len())
            .unwrap_or(DEFAULT_CHOICES)
    }

    /// Whether the current card is asked as a multiple-choice question
    fn quizzing(&self) -> bool {
        self.quiz_mode && !self.flashcard_only
    }

    fn clear_card(&mut self) {
        self.question = None;
        self.flashcard_only = false;
        self.last_outcome = None;
    }

    fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.practice.status() {
            SessionStatus::Idle => {}
            SessionStatus::Empty => {
                let config = self.practice.session_config();
                let mode = match config.mode {
                    SessionMode::All => "all words",
                    SessionMode::DueOnly => "due words",
                };
                writeln!(out, "No {} for {}.", mode, config.level)?;
            }
            SessionStatus::Complete => {
                writeln!(out, "Session complete! Press Enter for another round.")?;
            }
            SessionStatus::Active => self.render_card(out)?,
        }
        Ok(())
    }

    fn render_card<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(item) = self.practice.card().current_item.clone() else {
            return Ok(());
        };
        let (position, size) = self
            .practice
            .queue()
            .map(|q| (q.position() + 1, q.len()))
            .unwrap_or((0, 0));

        writeln!(out)?;
        writeln!(out, "[{}/{}] HSK {}    {}", position, size, item.hsk_level, item.character)?;

        match self.practice.card().phase {
            CardPhase::Hidden if self.quizzing() => {
                if self.question.is_none() {
                    self.question = build_question(
                        &item,
                        self.practice.pool(),
                        DEFAULT_CHOICES,
                        &mut rand::thread_rng(),
                    )
                    .ok();
                }
                match &self.question {
                    Some(question) => {
                        for (i, choice) in question.choices.iter().enumerate() {
                            writeln!(out, "  {}. {}", i + 1, choice)?;
                        }
                    }
                    None => {
                        // No distractors for this word; flashcard until the next card
                        self.flashcard_only = true;
                        writeln!(out, "(Enter to reveal)")?;
                    }
                }
            }
            CardPhase::Hidden => writeln!(out, "(Enter to reveal)")?,
            CardPhase::Revealed => {
                writeln!(out, "  {}  {}", item.pinyin, item.translation())?;
                writeln!(out, "How well did you know it? 1 again  2 hard  3 good  4 easy")?;
            }
            CardPhase::Graded => {
                writeln!(out, "  {}  {}", item.pinyin, item.translation())?;
                if let Some(outcome) = &self.last_outcome {
                    writeln!(
                        out,
                        "Next review in {} day{} ({}).",
                        outcome.review.interval_days,
                        if outcome.review.interval_days == 1 { "" } else { "s" },
                        format_date(outcome.review.due_at)
                    )?;
                }
                writeln!(out, "(Enter for the next card)")?;
            }
        }
        Ok(())
    }

    fn print_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for event in self.practice.drain_events() {
            match event {
                PracticeEvent::SessionStarted { size, level, .. } => {
                    writeln!(out, "Session: {} words, {}.", size, level)?
                }
                PracticeEvent::Warning { warning } => writeln!(out, "warning: {}", warning)?,
                PracticeEvent::SessionComplete { stats } => writeln!(
                    out,
                    "Studied {} words so far, {:.0}% correct.",
                    stats.total_studied,
                    stats.accuracy()
                )?,
                _ => {}
            }
        }
        Ok(())
    }

    fn print_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let stats = self.practice.stats();
        writeln!(out, "Studied:     {}", stats.total_studied)?;
        writeln!(out, "Correct:     {}", stats.correct_answers)?;
        writeln!(out, "Wrong:       {}", stats.wrong_answers)?;
        writeln!(out, "Accuracy:    {:.1}%", stats.accuracy())?;
        writeln!(out, "Streak:      {} (best {})", stats.current_streak, stats.best_streak)?;
        Ok(())
    }
}

fn report<W: Write>(
    out: &mut W,
    result: std::result::Result<(), hsk_core::PracticeError>,
) -> Result<()> {
    if let Err(e) = result {
        writeln!(out, "{}", e)?;
    }
    Ok(())
}

fn format_date(ms: i64) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => "unknown date".to_string(),
    }
}
