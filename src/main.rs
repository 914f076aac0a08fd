//! specplot - a terminal spectrum viewer.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use specplot::app::{format_table, App, ViewOptions};
use specplot::data::{ReadOptions, SpectrumReader};
use specplot::plot::{PlotContainer, PlotStyle};
use specplot::ui;
use specplot::util::LayoutConfig;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "specplot")]
#[command(about = "A terminal spectrum viewer with unit conversion", long_about = None)]
struct Args {
    /// Spectrum file (.nc or whitespace separated text)
    file: PathBuf,

    /// Dispersion unit to display, e.g. nm
    #[arg(long)]
    x_unit: Option<String>,

    /// Flux unit to display, e.g. erg/s/cm^2/nm
    #[arg(long)]
    y_unit: Option<String>,

    /// Display mode: line, step or scatter
    #[arg(long, default_value = "line")]
    style: PlotStyle,

    /// Start with error bars hidden
    #[arg(long)]
    hide_errors: bool,

    /// Print the converted table instead of opening the viewer
    #[arg(long)]
    dump: bool,

    /// NetCDF variable holding the dispersion
    #[arg(long, default_value = "dispersion")]
    dispersion_var: String,

    /// NetCDF variable holding the flux
    #[arg(long, default_value = "flux")]
    flux_var: String,

    /// NetCDF variable holding the uncertainty
    #[arg(long, default_value = "uncertainty")]
    uncertainty_var: String,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting specplot");
    }

    if !args.file.exists() {
        eprintln!("Error: Path not found: {}", args.file.display());
        std::process::exit(1);
    }

    let read_options = ReadOptions {
        dispersion_var: args.dispersion_var.clone(),
        flux_var: args.flux_var.clone(),
        uncertainty_var: args.uncertainty_var.clone(),
        ..ReadOptions::default()
    };
    let layer = SpectrumReader::read_file(&args.file, &read_options)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    if args.dump {
        let mut container = PlotContainer::builder(Rc::new(layer))
            .style(args.style)
            .build()?;
        container.change_units_str(args.x_unit.as_deref(), args.y_unit.as_deref(), None)?;
        print!("{}", format_table(&container)?);
        return Ok(());
    }

    let options = ViewOptions {
        x_unit: args.x_unit.clone(),
        y_unit: args.y_unit.clone(),
        style: args.style,
        hide_errors: args.hide_errors,
    };
    let app = App::new(layer, args.file.clone(), &options, LayoutConfig::default())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("specplot exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Char('q'))
                    | (KeyModifiers::NONE, KeyCode::Esc)
                    | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),

                    // Visibility
                    (KeyModifiers::NONE, KeyCode::Char('v')) => app.toggle_series(),
                    (KeyModifiers::NONE, KeyCode::Char('e')) => app.toggle_errors(),
                    (KeyModifiers::NONE, KeyCode::Char('i')) => app.toggle_inactive(),

                    // Units
                    (KeyModifiers::NONE, KeyCode::Char('u')) => app.cycle_flux_units(),
                    (KeyModifiers::NONE, KeyCode::Char('w')) => app.cycle_dispersion_units(),

                    // Appearance
                    (KeyModifiers::NONE, KeyCode::Char('s')) => app.cycle_style(),
                    (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
                    (KeyModifiers::NONE, KeyCode::Char('a')) => app.autoscale(),

                    _ => {}
                }
            }
        }
    }
}
