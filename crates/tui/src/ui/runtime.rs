//! Runtime: terminal lifecycle and the unified event loop.
//!
//! Responsibilities
//! - Own the terminal (raw mode, alternate screen, bracketed paste).
//! - Run a single event loop over input, ticks, and Ctrl+C.
//! - Route events to the form component and execute returned [`Effect`]s.
//!
//! A dedicated OS thread blocks on `crossterm::event::read()` and forwards
//! events over a channel; keeping the blocking read on its own thread
//! makes delivery reliable across terminals. Ticks run slow while idle and
//! speed up only while a status message is counting down.

use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::warn;

use centavo_types::{Effect, Msg};
use centavo_util::{form_payload, money_format::format_brl, preferences::UserPreferences};

use crate::app::App;
use crate::ui::components::budget_form::BudgetFormComponent;
use crate::ui::components::component::Component;
use crate::ui::theme::Theme;

/// Options assembled by the CLI before handing control to the TUI.
#[derive(Debug)]
pub struct RunOptions {
    /// Budget payload file to open and save.
    pub budget_file: Option<std::path::PathBuf>,
    /// Theme identifier overriding the saved preference.
    pub theme_override: Option<String>,
    pub preferences: UserPreferences,
}

/// Spawn the dedicated input thread. The blocking `read()` stays on one
/// OS thread for its whole life.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read terminal event: {error}");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Rebuild focus (structure may have changed) and draw one frame.
fn render(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    form: &mut BudgetFormComponent,
) -> Result<()> {
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = Rc::new(FocusBuilder::rebuild_for(app, Some(Rc::unwrap_or_clone(old_focus))));
    if app.focus.focused().is_none() {
        app.focus.first();
        app.form.sync_focus_transitions();
    }
    terminal.draw(|frame| form.render(frame, frame.area(), app))?;
    Ok(())
}

/// Route one raw crossterm event into the component tree.
fn handle_input_event(app: &mut App, form: &mut BudgetFormComponent, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => form.handle_key_events(app, key_event),
        Event::Paste(pasted) => form.handle_paste(app, &pasted),
        Event::Resize(width, height) => app.update(&Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// Entry point for the TUI runtime: setup, event loop, teardown.
pub async fn run_app(options: RunOptions) -> Result<()> {
    let RunOptions {
        budget_file,
        theme_override,
        preferences,
    } = options;
    let theme_name = theme_override
        .or_else(|| preferences.preferred_theme())
        .unwrap_or_default();
    let mut app = App::new(Theme::by_name(&theme_name), preferences, budget_file);

    if let Some(path) = app.budget_file.clone()
        && path.exists()
    {
        match form_payload::load(&path) {
            Ok(budget) => app.form.load_budget(&budget),
            Err(error) => app.set_status(format!("Could not load {}: {error}", path.display())),
        }
    }

    let mut form = BudgetFormComponent::default();
    form.init(&mut app)?;

    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;

    // Ticking strategy: slow while idle, fast only while a status message
    // needs to expire.
    let fast_interval = Duration::from_millis(1000);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut effects: Vec<Effect> = Vec::new();
    render(&mut terminal, &mut app, &mut form)?;

    loop {
        let target_interval = if app.status.is_some() { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(Event::Key(key_event))
                        if key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        break;
                    }
                    Some(input_event) => {
                        effects.extend(handle_input_event(&mut app, &mut form, input_event));
                        needs_render = true;
                    }
                    // Input channel closed; shut down cleanly.
                    None => break,
                }
            }
            _ = ticker.tick() => {
                effects.extend(app.update(&Msg::Tick));
                needs_render = true;
            }
            _ = signal::ctrl_c() => break,
        }

        if process_effects(&mut app, &mut effects) {
            break;
        }
        if needs_render {
            render(&mut terminal, &mut app, &mut form)?;
        }
    }

    cleanup_terminal(&mut terminal)?;
    if let Err(error) = app.preferences.set_last_budget_file(app.budget_file.clone()) {
        warn!("Failed to persist last budget file: {error}");
    }
    Ok(())
}

/// Executes queued effects. Returns `true` when the app should exit.
fn process_effects(app: &mut App, effects: &mut Vec<Effect>) -> bool {
    let mut quit = false;
    for effect in effects.drain(..) {
        match effect {
            Effect::Quit => quit = true,
            Effect::SaveRequested => save_budget(app),
            Effect::CopyTotalRequested => copy_total(app),
            Effect::Status(text) => app.set_status(text),
        }
    }
    quit
}

fn save_budget(app: &mut App) {
    let Some(path) = app.budget_file.clone() else {
        app.set_status("No budget file; restart with --file <path> to save");
        return;
    };
    match form_payload::save(&app.form.current_budget(), &path) {
        Ok(()) => {
            app.unsaved = false;
            app.set_status(format!("Saved {}", path.display()));
        }
        Err(error) => app.set_status(format!("Save failed: {error}")),
    }
}

fn copy_total(app: &mut App) {
    let total = format_brl(app.grand_total().cents());
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(total.clone())) {
        Ok(()) => app.set_status(format!("Copied {total}")),
        Err(error) => {
            warn!("Clipboard unavailable: {error}");
            app.set_status("Clipboard unavailable");
        }
    }
}
