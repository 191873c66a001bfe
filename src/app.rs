use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::fire::{FireEngine, RngDecay};
use crate::palette::Palette;
use crate::poll::{self, Cmd};
use crate::render::{self, Raster, Screen};

// Frame budget doubles as the input-poll timeout, so the effect runs at
// roughly 30 fps while keys still land promptly.
const FRAME_BUDGET: Duration = Duration::from_millis(33);

struct Hud {
    grip: f64,
    max: f64,
    last_error: Option<String>,
    visible: bool,
}

pub async fn run(cfg: Config) -> Result<()> {
    let engine = FireEngine::new(
        cfg.width,
        cfg.height,
        cfg.hard_cap,
        cfg.idle_floor,
        Palette::heat_ramp(),
        RngDecay::new(cfg.seed),
    );

    let (tx, rx) = mpsc::channel::<Cmd>(16);
    let poller = poll::spawn_poller(tx, cfg.url.clone(), cfg.poll_every);

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, DisableLineWrap, cursor::Hide)?;

    let result = drive(&mut out, &cfg, engine, rx).await;

    // Unwind the terminal even if the loop errored.
    poller.abort();
    execute!(
        out,
        ResetColor,
        cursor::Show,
        EnableLineWrap,
        LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    result
}

async fn drive(
    out: &mut io::Stdout,
    cfg: &Config,
    mut engine: FireEngine<RngDecay>,
    mut rx: mpsc::Receiver<Cmd>,
) -> Result<()> {
    let mut raster = Raster::new(cfg.width, cfg.height);
    let mut screen = Screen::new(cfg.width, cfg.height);
    let mut hud = Hud {
        grip: 0.0,
        max: 0.0,
        last_error: None,
        visible: true,
    };
    let mut paused = false;

    loop {
        // Readings arrive at the poller's cadence, frames at ours; the
        // source row just keeps whatever the latest reading set.
        while let Ok(cmd) = rx.try_recv() {
            match cmd {
                Cmd::Sample(s) => {
                    hud.grip = s.grip;
                    hud.max = s.max;
                    hud.last_error = None;
                    engine.apply_reading(s.grip);
                }
                Cmd::PollFailed(e) => hud.last_error = Some(e),
            }
        }

        if !paused {
            engine.step();
        }
        render::render(engine.grid(), engine.palette(), &mut raster);

        queue!(out, BeginSynchronizedUpdate)?;
        screen.flush(out, &raster, 0, 0)?;
        draw_hud(out, &hud, paused, cfg.width as u16, screen.rows())?;
        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;

        if event::poll(FRAME_BUDGET)? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => match k.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => paused = !paused,
                    KeyCode::Char('h') => hud.visible = !hud.visible,
                    _ => {}
                },
                Event::Resize(..) => {
                    execute!(out, Clear(ClearType::All))?;
                    screen.invalidate();
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw_hud(out: &mut io::Stdout, hud: &Hud, paused: bool, width: u16, y: u16) -> io::Result<()> {
    let line = if hud.visible {
        let mut s = format!(
            "gripfire  grip: {:6.2} lbs  max: {:6.2} lbs",
            hud.grip, hud.max
        );
        if paused {
            s.push_str("  [PAUSED]");
        }
        if let Some(e) = &hud.last_error {
            s.push_str("  ERR: ");
            s.push_str(e);
        }
        s
    } else {
        String::new()
    };

    let width = usize::from(width);
    let mut line: String = line.chars().take(width).collect();
    let pad = width - line.chars().count();
    line.extend(std::iter::repeat(' ').take(pad));

    queue!(
        out,
        cursor::MoveTo(0, y),
        SetBackgroundColor(Color::Black),
        SetForegroundColor(if hud.last_error.is_some() {
            Color::Red
        } else {
            Color::Grey
        }),
        Print(line)
    )?;
    Ok(())
}
