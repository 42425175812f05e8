//! Observers used by the command line front end

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Result,
    board::{GameOutcome, Token},
    ports::Observer,
    q_learning::BatchReport,
};

fn styled_bar(total: usize, unit: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {unit} ({{msg}})"
            ))
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Progress bar over the games of a series, tallied by token
#[derive(Default)]
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Observer for ProgressObserver {
    fn on_start(&mut self, total: usize) -> Result<()> {
        self.progress_bar = Some(styled_bar(total, "games")?);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome, _board: &str) -> Result<()> {
        match outcome {
            GameOutcome::Win(Token::X) => self.x_wins += 1,
            GameOutcome::Win(Token::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Progress bar over training batches showing the latest evaluation
#[derive(Default)]
pub struct BatchProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl BatchProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for BatchProgressObserver {
    fn on_start(&mut self, total: usize) -> Result<()> {
        self.progress_bar = Some(styled_bar(total, "batches")?);
        Ok(())
    }

    fn on_batch_end(&mut self, report: &BatchReport) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(report.batch as u64);
            pb.set_message(format!(
                "W:{:.1}% D:{:.1}% L:{:.1}%",
                report.evaluation.win_rate * 100.0,
                report.evaluation.draw_rate * 100.0,
                report.evaluation.loss_rate * 100.0
            ));
        }
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish();
        }
        Ok(())
    }
}

/// Prints the final position and result of every game
#[derive(Debug, Default)]
pub struct BoardPrinter;

impl BoardPrinter {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for BoardPrinter {
    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome, board: &str) -> Result<()> {
        println!("Game {game_num}");
        println!("{board}");
        match outcome {
            GameOutcome::Win(token) => println!("Player {token} wins!"),
            GameOutcome::Draw => println!("The game ended in a tie."),
        }
        Ok(())
    }
}
