//! Egg Storm entry point
//!
//! Owns the terminal, the input thread, and the fixed 60 Hz loop. The
//! simulation itself lives in `egg_storm::sim` and knows nothing about any
//! of this.

use std::collections::HashMap;
use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use egg_storm::Settings;
use egg_storm::audio::{AudioManager, SoundEffect};
use egg_storm::consts::TICK_HZ;
use egg_storm::render::{compose, term::TermRenderer};
use egg_storm::sim::{GameEvent, GamePhase, GameState, TickInput, spawn_wave, tick};

/// One simulation tick per frame
const FRAME: Duration = Duration::from_micros(1_000_000 / TICK_HZ as u64);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals without key-release events: OS
/// key-repeat is >= 15 Hz, so the window is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut settings = Settings::load();
    let mut audio = AudioManager::new(
        settings.master_volume,
        settings.sfx_volume,
        settings.music_volume,
        settings.muted,
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events where the terminal supports them; classic
    // terminals fall back to the hold-window heuristic.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, &mut audio, &mut settings);

    audio.stop_music();

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
    audio: &mut AudioManager,
    settings: &mut Settings,
) -> std::io::Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    spawn_wave(&mut state);
    log::info!("session started with seed {seed}");

    audio.start_music();

    let renderer = TermRenderer::new();
    let start = Instant::now();
    let mut show_diagnostics = settings.show_diagnostics;

    // Maps each held key to the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    // FPS over a one-second window of frame timestamps
    let mut frame_times = [0.0f64; TICK_HZ as usize];
    let mut frame_index = 0usize;
    let mut fps = 0u32;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = TickInput::default();

        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') => input.shoot = true,
                        KeyCode::Char('q') | KeyCode::Char('Q')
                            if state.phase == GamePhase::GameOver =>
                        {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.phase == GamePhase::GameOver =>
                        {
                            input.restart = true;
                        }
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            show_diagnostics = !show_diagnostics;
                            settings.show_diagnostics = show_diagnostics;
                            settings.save();
                        }
                        _ => {}
                    }
                }
                // Repeat refreshes the hold window but is not a new edge
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.move_left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        input.move_right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);

        let now = start.elapsed().as_secs_f64();
        tick(&mut state, &input, now);

        for game_event in state.take_events() {
            match game_event {
                GameEvent::ShotFired => audio.play(SoundEffect::Shoot),
                GameEvent::EnemyDestroyed => audio.play(SoundEffect::Explosion),
                GameEvent::PlayerHit => audio.play(SoundEffect::Hit),
                GameEvent::PowerUpCollected => audio.play(SoundEffect::PowerUp),
                GameEvent::GameOver => audio.play(SoundEffect::Explosion),
                GameEvent::WaveCleared => log::debug!("wave cleared"),
            }
        }

        let t = start.elapsed().as_secs_f64();
        frame_times[frame_index] = t;
        frame_index = (frame_index + 1) % frame_times.len();
        let oldest = frame_times[frame_index];
        if oldest > 0.0 {
            let elapsed = t - oldest;
            if elapsed > 0.0 {
                fps = (frame_times.len() as f64 / elapsed).round() as u32;
            }
        }

        let scene = compose(&state, now, show_diagnostics.then_some(fps));
        renderer.draw(out, &scene)?;

        // Sleep out the remainder of the frame
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
