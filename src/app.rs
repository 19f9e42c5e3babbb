use std::{thread::sleep, time::{Duration, Instant}};

use tracing::{debug, info};

use gridsnake::config::{GameConfig, FRAME_INTERVAL_MS};
use gridsnake::game::{TickOutcome, UpdateLoop};
use gridsnake::input::{command_for, Command};
use gridsnake::render::{game_over_screen, render, score_line, start_screen};
use gridsnake::state::RunState;
use gridsnake::term::TermManager;
use gridsnake::Result;

/// Frame driver: input, then tick, then draw, once per frame.
pub struct App {
    game: UpdateLoop,
    term: TermManager,
    epoch: Instant,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(App { game: UpdateLoop::new(config)?, term: TermManager::new()?, epoch: Instant::now() })
    }

    /// Takes over the terminal until the player quits.
    pub fn run(&mut self) -> Result<()> {
        bracket(self, |app| app.term.setup(), App::play, |app| app.term.restore())
    }

    fn play(&mut self) -> Result<()> {
        self.term.clear()?;
        self.draw()?;
        self.term.show_message(&start_screen())?;

        loop {
            sleep(Duration::from_millis(FRAME_INTERVAL_MS));
            let now = self.now_ms();

            for key_ev in self.term.read_key_events_queue()? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => {
                        info!(score = self.game.score(), "quit");
                        return Ok(());
                    },
                    Some(Command::Start) if self.game.run_state() != RunState::Running => {
                        self.game.start(now);
                        self.term.clear()?;
                    },
                    Some(Command::Turn(dir)) => self.game.set_pending_direction(dir),
                    _ => {}
                }
            }

            match self.game.tick(now) {
                // Nothing running: the last screen stays up untouched
                TickOutcome::Idle => {},
                TickOutcome::GameOver(reason) => {
                    self.draw()?;
                    self.term.show_message(&game_over_screen(reason, self.game.score()))?;
                },
                TickOutcome::Ate { score } => {
                    debug!(score, "score display updated");
                    self.draw()?;
                },
                TickOutcome::Waiting | TickOutcome::Moved => self.draw()?,
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let snap = self.game.snapshot();
        let frame = render(&snap, self.now_ms());
        self.term.draw(&frame, &score_line(snap.score))
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// `restore` runs on every path, including a `setup` that failed half way.
/// The first error wins.
fn bracket<C>(
    ctx: &mut C,
    setup: fn(&mut C) -> Result<()>,
    body: fn(&mut C) -> Result<()>,
    restore: fn(&mut C) -> Result<()>,
) -> Result<()> {
    let res = setup(ctx).and_then(|()| body(ctx));
    let restored = restore(ctx);
    res.and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsnake::Error;

    fn fail(log: &mut Vec<&'static str>) -> Result<()> {
        log.push("setup");
        Err(Error::InvalidConfig("no tty".to_string()))
    }

    fn ok_setup(log: &mut Vec<&'static str>) -> Result<()> {
        log.push("setup");
        Ok(())
    }

    fn body(log: &mut Vec<&'static str>) -> Result<()> {
        log.push("body");
        Ok(())
    }

    fn restore(log: &mut Vec<&'static str>) -> Result<()> {
        log.push("restore");
        Ok(())
    }

    #[test]
    fn failed_setup_still_restores() {
        let mut log = vec![];
        let res = bracket(&mut log, fail, body, restore);

        assert!(matches!(res, Err(Error::InvalidConfig(_))));
        assert_eq!(log, vec!["setup", "restore"]);
    }

    #[test]
    fn body_runs_between_setup_and_restore() {
        let mut log = vec![];
        assert!(bracket(&mut log, ok_setup, body, restore).is_ok());
        assert_eq!(log, vec!["setup", "body", "restore"]);
    }
}
