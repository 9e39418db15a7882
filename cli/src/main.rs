use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use synthstock::{
    api::{
        chart_dataset, formatters, metric_cards, session_csv, DashboardView, GeneratedData,
        SeriesRequest,
    },
    models::TickerRegistry,
    services::{to_csv_bytes, CsvExportService},
    state_machine::{SessionEvent, SessionMachine, MAX_RECOMMENDED_WINDOW, MIN_RECOMMENDED_WINDOW},
    utils::{format_duration, init_logger, parse_date, Logger},
    SynthError, CRASH_NOTICE,
};

#[derive(Parser)]
#[command(name = "synthstock")]
#[command(about = "Synthetic stock price viewer with moving-average trendline and CSV export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Ticker symbol (AAPL, GOOGL, NVDA, AMZN, TSLA)
    #[arg(short, long, default_value = "AAPL")]
    pub ticker: String,
    /// Start date (YYYY-MM-DD)
    #[arg(short, long, default_value = "2020-01-01")]
    pub start: String,
    /// End date (YYYY-MM-DD), inclusive
    #[arg(short, long, default_value = "2023-01-01")]
    pub end: String,
    /// Moving average window in days
    #[arg(short, long, default_value_t = 20)]
    pub window: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available synthetic tickers
    Tickers,
    /// Generate a price series with its moving average
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print max, min, mean and spread of the close price
    Stats {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Print the chart dataset (long-form records plus title and colours) as JSON
    Chart {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Write the series to a CSV file
    Export {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output path (default: {TICKER}_stock_data.csv in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive dashboard session on stdin
    Interactive {
        /// Simulated fetch pause before each execute, in milliseconds
        #[arg(long, default_value_t = 0)]
        fetch_delay_ms: u64,
    },
}

fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        report_failure(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Tickers => {
            writeln!(out, "{}", formatters::format_tickers(TickerRegistry::all()))?;
        }
        Commands::Generate { selection, format } => {
            let data = run_selection(&selection)?;
            match format {
                OutputFormat::Table => {
                    writeln!(out, "{}", formatters::format_table(&data.series))?;
                    writeln!(out)?;
                    writeln!(out, "{}", formatters::format_metrics(&metric_cards(&data.stats)))?;
                }
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &data)?;
                    writeln!(out)?;
                }
                OutputFormat::Csv => {
                    out.write_all(&to_csv_bytes(&data.series)?)?;
                }
            }
        }
        Commands::Stats { selection } => {
            let data = run_selection(&selection)?;
            writeln!(out, "{}", formatters::format_metrics(&metric_cards(&data.stats)))?;
        }
        Commands::Chart { selection } => {
            let data = run_selection(&selection)?;
            serde_json::to_writer_pretty(&mut out, &chart_dataset(&data.series)?)?;
            writeln!(out)?;
        }
        Commands::Export { selection, output } => {
            let data = run_selection(&selection)?;
            let service = CsvExportService::new(".")?;
            let path = match output {
                Some(path) => {
                    service.export_to(&data.series, &path)?;
                    path
                }
                None => service.export(&data.series)?,
            };
            writeln!(out, "✅ Wrote {} rows to {}", data.series.len(), path.display())?;
        }
        Commands::Interactive { fetch_delay_ms } => {
            let stdin = io::stdin();
            let mut repl = Repl::new(Duration::from_millis(fetch_delay_ms));
            repl.run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

fn run_selection(selection: &SelectionArgs) -> anyhow::Result<GeneratedData> {
    warn_if_unusual_window(selection.window);
    let request = SeriesRequest::builder()
        .ticker(&selection.ticker)
        .start_str(&selection.start)
        .end_str(&selection.end)
        .window(selection.window)
        .build()?;
    Ok(request.run()?)
}

fn warn_if_unusual_window(window: usize) {
    if !(MIN_RECOMMENDED_WINDOW..=MAX_RECOMMENDED_WINDOW).contains(&window) {
        Logger::new("CLI").warn(&format!(
            "Window {} is outside the recommended {}-{} day band",
            window, MIN_RECOMMENDED_WINDOW, MAX_RECOMMENDED_WINDOW
        ));
    }
}

/// Outermost failure report: validation errors keep their message, anything
/// else becomes the generic crash notice
fn report_failure(error: &anyhow::Error) {
    match error.downcast_ref::<SynthError>() {
        Some(e) if e.is_user_error() => eprintln!("❌ {}", e),
        _ => {
            tracing::error!("Unhandled failure: {:#}", error);
            eprintln!("{}", CRASH_NOTICE);
        }
    }
}

/// Parsed interactive command
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Event(SessionEvent),
    Show,
    List,
    Export(Option<PathBuf>),
    History,
    Help,
    Quit,
}

const REPL_HELP: &str = "Commands:
  ticker SYMBOL        select a stock (resets the plot)
  range START END      set the date range (resets the plot)
  start DATE | end DATE
  window N             set the moving average window
  execute              generate and plot the data
  show                 print the dashboard
  list                 print the data table
  export [PATH]        write the CSV export
  reset                clear the plot
  history              show state transitions
  help | quit";

/// Line-oriented dashboard session
struct Repl {
    machine: SessionMachine,
    fetch_delay: Duration,
}

impl Repl {
    fn new(fetch_delay: Duration) -> Self {
        Self {
            machine: SessionMachine::new(),
            fetch_delay,
        }
    }

    fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", self.render()?)?;
        writeln!(out, "Type 'help' for commands.")?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.parse(&line) {
                Ok(ReplCommand::Quit) => break,
                Ok(command) => {
                    if let Err(e) = self.dispatch(command, out) {
                        // Reported and swallowed: the session keeps going
                        match e.downcast_ref::<SynthError>() {
                            Some(err) if err.is_user_error() => writeln!(out, "❌ {}", err)?,
                            _ => {
                                tracing::error!("Command failed: {:#}", e);
                                writeln!(out, "{}", CRASH_NOTICE)?;
                            }
                        }
                    }
                }
                Err(message) => writeln!(out, "❌ {}", message)?,
            }
        }

        Ok(())
    }

    fn parse(&self, line: &str) -> Result<ReplCommand, String> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();
        let state = self.machine.state();

        let date_arg = |i: usize| -> Result<chrono::NaiveDate, String> {
            let raw = args.get(i).ok_or_else(|| format!("'{}' needs a date", command))?;
            parse_date(raw).map_err(|e| e.to_string())
        };

        let parsed = match command.as_str() {
            "ticker" | "stock" => ReplCommand::Event(SessionEvent::TickerChanged {
                ticker: args.first().ok_or("'ticker' needs a symbol")?.to_string(),
            }),
            "range" => ReplCommand::Event(SessionEvent::RangeChanged {
                start: date_arg(0)?,
                end: date_arg(1)?,
            }),
            "start" => ReplCommand::Event(SessionEvent::RangeChanged {
                start: date_arg(0)?,
                end: state.range.end(),
            }),
            "end" => ReplCommand::Event(SessionEvent::RangeChanged {
                start: state.range.start(),
                end: date_arg(0)?,
            }),
            "window" | "ma" => {
                let raw = args.first().ok_or("'window' needs a number")?;
                let window = raw
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid window: {}", raw))?;
                ReplCommand::Event(SessionEvent::WindowChanged { window })
            }
            "execute" | "run" => ReplCommand::Event(SessionEvent::Execute),
            "reset" => ReplCommand::Event(SessionEvent::Reset),
            "show" => ReplCommand::Show,
            "list" => ReplCommand::List,
            "export" => ReplCommand::Export(args.first().map(PathBuf::from)),
            "history" => ReplCommand::History,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };

        Ok(parsed)
    }

    fn dispatch<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> anyhow::Result<()> {
        match command {
            ReplCommand::Event(event) => {
                if let SessionEvent::WindowChanged { window } = &event {
                    warn_if_unusual_window(*window);
                }
                if event == SessionEvent::Execute && !self.fetch_delay.is_zero() {
                    writeln!(
                        out,
                        "Fetching data ({})...",
                        format_duration(self.fetch_delay.as_secs_f64() * 1000.0)
                    )?;
                    std::thread::sleep(self.fetch_delay);
                }
                self.machine.handle(event)?;
                writeln!(out, "{}", self.render()?)?;
            }
            ReplCommand::Show => writeln!(out, "{}", self.render()?)?,
            ReplCommand::List => match &self.machine.state().series {
                Some(series) if self.machine.is_ready() => {
                    writeln!(out, "{}", formatters::format_table(series))?
                }
                _ => return Err(SynthError::NotExecuted.into()),
            },
            ReplCommand::Export(path) => {
                let (file_name, bytes) = session_csv(self.machine.state())?;
                let path = path.unwrap_or_else(|| PathBuf::from(file_name));
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing {}", path.display()))?;
                writeln!(out, "✅ Wrote {}", path.display())?;
            }
            ReplCommand::History => {
                for entry in self.machine.transition_history() {
                    writeln!(
                        out,
                        "[{}] {} → {} ({})",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.from,
                        entry.to,
                        entry.reason
                    )?;
                }
            }
            ReplCommand::Help => writeln!(out, "{}", REPL_HELP)?,
            ReplCommand::Quit => {}
        }
        Ok(())
    }

    fn render(&self) -> anyhow::Result<String> {
        let view = DashboardView::from_state(self.machine.state())?;
        Ok(formatters::format_dashboard(&view))
    }
}
