use anyhow::{Result, bail};
use clap::Args;
use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use is_terminal::IsTerminal;
use log::info;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::form::{FormDocument, FormRenderer, FormValues};
use crate::tui::apps::{FormApp, FormParams};
use crate::tui::{Runtime, Theme};

#[derive(Args, Default)]
pub struct RunCommands {
    /// Form file (defaults to the configured form, then form.json)
    pub form: Option<PathBuf>,
}

pub async fn run_command(args: RunCommands, config: &Config) -> Result<()> {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        bail!(
            "The interactive form needs a terminal; use `form-cli check` to submit values headlessly"
        );
    }

    let path = config.resolve_form_path(args.form);
    let document = FormDocument::load(&path)?;
    info!("Running form {:?} with {} fields", path, document.len());

    let params = FormParams {
        form: FormRenderer::new(document, config.settings.render_options()),
        submit_label: config.settings.submit_label.clone(),
    };
    let runtime = Runtime::<FormApp>::new(params, Theme::new(config.settings.theme))?;

    let submitted = launch_tui(runtime).await?;

    // Leave the last accepted values on the normal screen
    if let Some(values) = submitted {
        print_values(&values);
    }
    Ok(())
}

pub(crate) fn print_values(values: &FormValues) {
    let mut lines = values.display_lines().into_iter();
    if let Some(heading) = lines.next() {
        println!("{}", heading.bright_green().bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

async fn launch_tui(mut runtime: Runtime<FormApp>) -> Result<Option<FormValues>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui(&mut terminal, &mut runtime).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(runtime.get_state().form().submitted().cloned())
}

async fn run_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &mut Runtime<FormApp>,
) -> Result<()> {
    // First frame fills the focus registry before any key arrives
    terminal.draw(|frame| runtime.render(frame))?;

    loop {
        let frame_start = Instant::now();

        // Process all pending events first for minimal input latency
        let mut should_quit = false;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    should_quit = true;
                    break;
                }

                if !runtime.handle_key(key)? {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        terminal.draw(|frame| runtime.render(frame))?;

        // Sleep for remainder of 16ms frame
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = Duration::from_millis(16).checked_sub(elapsed) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}
