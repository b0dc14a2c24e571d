mod app;
mod theme;
mod tree_item;
mod ui;
mod util;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use std::{env, fs};

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::SetTitle;

use crate::app::App;

const USAGE: &str = "usage: treepick [path]";

fn main() -> ExitCode {
    let root = match parse_args() {
        Ok(Some(root)) => root,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(root);
    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture, SetTitle(app.window_title()))
        .and_then(|()| run(&mut terminal, &mut app));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `treepick [path]`: one optional root, defaulting to the working
/// directory. The root is canonicalized; a bad path is a startup error.
fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut args = env::args().skip(1);
    let arg = args.next();
    if args.next().is_some() {
        return Err(format!("too many arguments\n{USAGE}"));
    }
    let raw = match arg {
        Some(s) if s == "-h" || s == "--help" => return Ok(None),
        Some(s) => PathBuf::from(s),
        None => env::current_dir()
            .map_err(|err| format!("cannot determine working directory: {err}"))?,
    };
    fs::canonicalize(&raw)
        .map(Some)
        .map_err(|err| format!("invalid path {}: {err}", raw.display()))
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;
        // The 250ms tick lets notices expire without user input.
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key)?,
                Event::Mouse(mouse) => app.handle_mouse(mouse)?,
                _ => {}
            }
        }
    }
    Ok(())
}
