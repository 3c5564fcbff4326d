use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

use maze25::config::{log_level, Cli, Speed};
use maze25::game::Game;
use maze25::input::{command_for, Command, HeldKeys, PromptEvent, SeedPrompt};
use maze25::render::{render_text, Renderer};
use maze25::{derive_generator, find_path, generate, Coord};

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    if cli.print {
        return print_maze(&cli);
    }

    let mut rng = rand::thread_rng();
    let game = Game::new(cli.seed.clone(), cli.rows, cli.cols, &mut rng)
        .context("failed to build maze")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game, Speed::from_env());

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn print_maze(cli: &Cli) -> Result<()> {
    let mut prng = derive_generator(cli.seed.as_deref());
    let maze = generate(cli.rows, cli.cols, &mut prng).context("failed to build maze")?;
    let path = if cli.solve {
        let goal = Coord::new(maze.rows() - 1, maze.cols() - 1);
        find_path(&maze, Coord::new(0, 0), goal)?
    } else {
        Vec::new()
    };
    let mut out = io::stdout().lock();
    out.write_all(render_text(&maze, &path).as_bytes())?;
    if cli.solve {
        writeln!(out, "route: {} steps", path.len().saturating_sub(1))?;
    }
    Ok(())
}

fn run(stdout: &mut Stdout, mut game: Game, speed: Speed) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut renderer = Renderer::new(game.maze());
    let mut held = HeldKeys::default();
    let mut prompt: Option<SeedPrompt> = None;
    let mut last_tick = Instant::now();
    let tick = Duration::from_millis(speed.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / speed.render_fps.max(1));
    log::info!(
        "tick {} ms, {} fps, seed {:?}",
        speed.tick_ms,
        speed.render_fps,
        game.seed()
    );

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if prompt.is_some() => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    let Some(editor) = prompt.as_mut() else {
                        continue;
                    };
                    match editor.key(key.code) {
                        PromptEvent::Editing => {}
                        PromptEvent::Cancel => prompt = None,
                        PromptEvent::Submit(seed) => {
                            prompt = None;
                            game.set_seed(seed.trim(), &mut rng)?;
                            held.clear();
                            renderer.invalidate();
                        }
                    }
                }
                Event::Key(key) => {
                    let Some(cmd) = command_for(key.code) else {
                        continue;
                    };
                    let now = Instant::now();
                    match (key.kind, cmd) {
                        (KeyEventKind::Release, Command::Move(dir)) => held.release(dir),
                        (KeyEventKind::Release, _) => {}
                        (KeyEventKind::Repeat, Command::Move(dir)) => held.repeat(dir, now),
                        (_, Command::Move(dir)) => {
                            if held.press(dir, now) {
                                game.try_move(dir)?;
                            }
                        }
                        (KeyEventKind::Press, Command::Quit) => return Ok(()),
                        (KeyEventKind::Press, Command::TogglePause) => {
                            game.toggle_pause();
                        }
                        (KeyEventKind::Press, Command::NewGame) => {
                            game.new_game(&mut rng)?;
                            held.clear();
                            renderer.invalidate();
                        }
                        (KeyEventKind::Press, Command::ToggleAuto) => {
                            game.toggle_auto()?;
                        }
                        (KeyEventKind::Press, Command::EnterSeed) => {
                            held.clear();
                            prompt = Some(SeedPrompt::default());
                        }
                        _ => {}
                    }
                }
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            step(&mut game, &held)?;
        }
        renderer.render(stdout, &game, prompt.as_ref().map(SeedPrompt::text))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn step(game: &mut Game, held: &HeldKeys) -> Result<()> {
    if let Some(dir) = held.active(Instant::now()) {
        game.try_move(dir)?;
    } else {
        game.advance_auto();
    }
    Ok(())
}
