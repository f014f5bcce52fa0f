mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use one_hit_man::boss::{clamp_level, is_heavy, money_reward, vehicle_name};
use one_hit_man::compute::{init_state, tick};
use one_hit_man::config::GameConfig;
use one_hit_man::entities::{GameState, GameStatus, PlayerInput};

use display::Viewport;

/// One simulation tick at the nominal 60 Hz, in milliseconds.
const NOMINAL_TICK_MS: f32 = 1000.0 / 60.0;
/// Longest frame fed to the simulation, in nominal ticks.
const MAX_DT: f32 = 3.0;
const MAX_MENU_LEVEL: i32 = 99;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Config & logging ──────────────────────────────────────────────────────────

fn config_path() -> PathBuf {
    std::env::var("ONE_HIT_MAN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("assets/config.ron"))
}

/// Log to a file so records never land on top of the game frame.
fn init_logging() {
    let Ok(file) = File::create("one_hit_man.log") else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(i32),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut level: i32,
) -> std::io::Result<MenuResult> {
    loop {
        draw_menu(out, level)?;

        // Block until the user makes a choice
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Char(c @ '1'..='9') => {
                    return Ok(MenuResult::Start(c as i32 - '0' as i32));
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    level = (level - 1).max(1);
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    level = (level + 1).min(MAX_MENU_LEVEL);
                }
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start(level)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

fn draw_menu<W: Write>(out: &mut W, level: i32) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  ONE  HIT  MAN  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let level = clamp_level(level);
    let heavy = is_heavy(level);
    let lines: [(String, Color); 3] = [
        (format!("◄  Level {:>2}  ►", level), Color::White),
        (
            vehicle_name(level),
            if heavy { Color::Red } else { Color::Yellow },
        ),
        (
            format!(
                "{}Reward ${}",
                if heavy { "MEGA BOSS  " } else { "" },
                money_reward(level, heavy)
            ),
            Color::DarkGrey,
        ),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(text.chars().count() as u16 / 2), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }

    let rules: &[&str] = &[
        "You have 1 HP: one hit and it's over.",
        "The boss has 1 HP: ram it while it glows.",
        "Crosshairs and dotted lines are warnings.",
    ];
    for (i, rule) in rules.iter().enumerate() {
        let row = cy + 2 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(21), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*rule))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(21), cy + 6))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("1-9 / ← → + ENTER : Start   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu,
    Restart,
}

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and turn them into one `PlayerInput`, so
/// diagonals work with any terminal.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> std::io::Result<LoopExit> {
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(LoopExit::Quit),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Esc => return Ok(LoopExit::Menu),
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status != GameStatus::Playing =>
                        {
                            return Ok(LoopExit::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = PlayerInput {
            up: any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            left: any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
        };

        // Elapsed time as a multiple of the nominal tick.
        let now = Instant::now();
        let dt = (now.duration_since(last_tick).as_secs_f32() * 1000.0 / NOMINAL_TICK_MS).min(MAX_DT);
        last_tick = now;

        if state.status == GameStatus::Playing {
            *state = tick(state, input, dt, &mut rng);
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, state, Viewport { cols, rows })?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let config = match GameConfig::load_or_default(&config_path()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let frame_time = Duration::from_millis(config.frame_ms);
    let mut rng = thread_rng();
    let mut level = config.start_level.max(1);

    loop {
        match show_menu(out, rx, level)? {
            MenuResult::Quit => break,
            MenuResult::Start(chosen) => {
                level = chosen;
                loop {
                    let mut state = init_state(config, level, &mut rng);
                    match game_loop(out, &mut state, rx, frame_time)? {
                        LoopExit::Quit => return Ok(()),
                        LoopExit::Menu => break,
                        LoopExit::Restart => continue,
                    }
                }
            }
        }
    }
    Ok(())
}
