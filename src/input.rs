use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::maze::Direction;

pub const INPUT_HOLD_MS: u64 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    TogglePause,
    NewGame,
    ToggleAuto,
    EnterSeed,
    Quit,
}

pub fn command_for(code: KeyCode) -> Option<Command> {
    let cmd = match code {
        KeyCode::Up | KeyCode::Char('k') => Command::Move(Direction::Up),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(Direction::Right),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(Direction::Left),
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::NewGame,
        KeyCode::Char(' ') => Command::ToggleAuto,
        KeyCode::Char('s') | KeyCode::Char('S') => Command::EnterSeed,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Terminals rarely report key releases, so a direction counts as held while
/// its press or auto-repeat events keep arriving within the hold window.
///
/// The first press of a direction moves at once (the caller acts on
/// [`HeldKeys::press`] returning `true`). Tick-driven movement only follows
/// once repeat events show the key is really down, so a tap is one step.
pub struct HeldKeys {
    last_seen: [Option<Instant>; 4],
    repeating: [bool; 4],
    last_pressed: Option<Direction>,
    hold: Duration,
}

impl HeldKeys {
    pub fn new(hold: Duration) -> Self {
        Self {
            last_seen: [None; 4],
            repeating: [false; 4],
            last_pressed: None,
            hold,
        }
    }

    fn is_fresh(&self, dir: Direction, now: Instant) -> bool {
        self.last_seen[dir as usize].map_or(false, |t| now.saturating_duration_since(t) <= self.hold)
    }

    /// Records a press. Returns `true` for a new press that should move
    /// right away; `false` when the key was already held, which plain
    /// terminals report for auto-repeat.
    pub fn press(&mut self, dir: Direction, now: Instant) -> bool {
        let fresh = self.is_fresh(dir, now);
        self.last_seen[dir as usize] = Some(now);
        self.repeating[dir as usize] = fresh;
        self.last_pressed = Some(dir);
        !fresh
    }

    /// Records an explicit auto-repeat event.
    pub fn repeat(&mut self, dir: Direction, now: Instant) {
        self.last_seen[dir as usize] = Some(now);
        self.repeating[dir as usize] = true;
        self.last_pressed = Some(dir);
    }

    pub fn release(&mut self, dir: Direction) {
        self.last_seen[dir as usize] = None;
        self.repeating[dir as usize] = false;
        if self.last_pressed == Some(dir) {
            self.last_pressed = None;
        }
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; 4];
        self.repeating = [false; 4];
        self.last_pressed = None;
    }

    /// Direction to repeat on this tick: the last pressed one if still held
    /// and repeating, else the most recently seen repeating direction.
    pub fn active(&self, now: Instant) -> Option<Direction> {
        let held = |dir: Direction| self.repeating[dir as usize] && self.is_fresh(dir, now);
        if let Some(dir) = self.last_pressed {
            if held(dir) {
                return Some(dir);
            }
        }
        let mut best: Option<(Direction, Instant)> = None;
        for dir in Direction::ALL {
            let Some(t) = self.last_seen[dir as usize] else {
                continue;
            };
            if held(dir) {
                match best {
                    None => best = Some((dir, t)),
                    Some((_, bt)) if t > bt => best = Some((dir, t)),
                    _ => {}
                }
            }
        }
        best.map(|(dir, _)| dir)
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new(Duration::from_millis(INPUT_HOLD_MS))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Editing,
    Submit(String),
    Cancel,
}

/// One-line seed entry shown in the status line.
#[derive(Debug, Default)]
pub struct SeedPrompt {
    buf: String,
}

impl SeedPrompt {
    pub const MAX_LEN: usize = 64;

    pub fn text(&self) -> &str {
        &self.buf
    }

    pub fn key(&mut self, code: KeyCode) -> PromptEvent {
        match code {
            KeyCode::Enter => PromptEvent::Submit(std::mem::take(&mut self.buf)),
            KeyCode::Esc => PromptEvent::Cancel,
            KeyCode::Backspace => {
                self.buf.pop();
                PromptEvent::Editing
            }
            KeyCode::Char(c) if !c.is_control() && self.buf.chars().count() < Self::MAX_LEN => {
                self.buf.push(c);
                PromptEvent::Editing
            }
            _ => PromptEvent::Editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_arrows_and_vi_keys() {
        assert_eq!(command_for(KeyCode::Up), Some(Command::Move(Direction::Up)));
        assert_eq!(command_for(KeyCode::Char('h')), Some(Command::Move(Direction::Left)));
        assert_eq!(command_for(KeyCode::Char(' ')), Some(Command::ToggleAuto));
        assert_eq!(command_for(KeyCode::Char('R')), Some(Command::NewGame));
        assert_eq!(command_for(KeyCode::Char('s')), Some(Command::EnterSeed));
        assert_eq!(command_for(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(command_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn tap_moves_once() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::default();
        assert!(keys.press(Direction::Right, t0));
        for ms in [10, 140, 270] {
            assert_eq!(keys.active(t0 + Duration::from_millis(ms)), None);
        }
    }

    #[test]
    fn repeated_presses_count_as_held() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::default();
        assert!(keys.press(Direction::Down, t0));
        assert!(!keys.press(Direction::Down, t0 + Duration::from_millis(30)));
        assert_eq!(keys.active(t0 + Duration::from_millis(100)), Some(Direction::Down));
        assert_eq!(keys.active(t0 + Duration::from_millis(500)), None);
        assert!(keys.press(Direction::Down, t0 + Duration::from_millis(600)));
    }

    #[test]
    fn last_pressed_wins() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::default();
        keys.repeat(Direction::Up, t0);
        keys.repeat(Direction::Left, t0 + Duration::from_millis(10));
        assert_eq!(keys.active(t0 + Duration::from_millis(20)), Some(Direction::Left));
        keys.release(Direction::Left);
        assert_eq!(keys.active(t0 + Duration::from_millis(20)), Some(Direction::Up));
        keys.clear();
        assert_eq!(keys.active(t0 + Duration::from_millis(20)), None);
    }

    #[test]
    fn seed_prompt_edits_and_submits() {
        let mut prompt = SeedPrompt::default();
        for c in "abcx".chars() {
            assert_eq!(prompt.key(KeyCode::Char(c)), PromptEvent::Editing);
        }
        prompt.key(KeyCode::Backspace);
        assert_eq!(prompt.text(), "abc");
        assert_eq!(prompt.key(KeyCode::Enter), PromptEvent::Submit("abc".into()));
        assert_eq!(prompt.text(), "");
        assert_eq!(prompt.key(KeyCode::Esc), PromptEvent::Cancel);
    }

    #[test]
    fn seed_prompt_caps_length() {
        let mut prompt = SeedPrompt::default();
        for _ in 0..100 {
            prompt.key(KeyCode::Char('z'));
        }
        assert_eq!(prompt.text().len(), SeedPrompt::MAX_LEN);
    }
}
