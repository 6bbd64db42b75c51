use chrono::Local;
use clap::{ArgAction, Parser, ValueEnum};
use leaching::calculator::{Action, CalculatorState};
use leaching::currency::Currency;
use leaching::input::Field;
use leaching::report::ReportFormat;
use leaching::LoanError;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{error::Error, fs, path::PathBuf, process};

/// Monthly installment calculator
#[derive(Parser)]
#[command(
    name = "leaching-calc",
    version,
    about = "Monthly installment calculator with amortization schedule"
)]
struct Cli {
    /// Total amount borrowed
    #[arg(short, long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// Loan term in years (fractional months are dropped)
    #[arg(short, long, allow_hyphen_values = true)]
    years: Option<String>,

    /// Annual percentage rate, in percent
    #[arg(short, long, allow_hyphen_values = true)]
    rate: Option<String>,

    /// Display currency code
    #[arg(short, long, default_value = "USD")]
    currency: String,

    /// Print the full amortization schedule
    #[arg(long)]
    schedule: bool,

    /// Print the breakdown of a single payment (1-based)
    #[arg(long)]
    month: Option<usize>,

    /// Write a report to this path ("-" for stdout)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Report format used by --export
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// List the supported currencies and exit
    #[arg(long)]
    list_currencies: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Html => ReportFormat::Html,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("logger unavailable: {}", err);
    }

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.list_currencies {
        for currency in Currency::all() {
            println!("{}", currency);
        }
        return Ok(());
    }

    let currency: Currency = cli.currency.parse()?;
    let state = CalculatorState::new()
        .apply(Action::SetCurrency(currency))
        .apply(Action::SetField(Field::Principal, cli.amount.unwrap_or_default()))
        .apply(Action::SetField(Field::Years, cli.years.unwrap_or_default()))
        .apply(Action::SetField(Field::Rate, cli.rate.unwrap_or_default()))
        .apply(Action::Calculate);

    if let Some(err) = state.error() {
        return Err(err.clone().into());
    }
    let loan = state.loan().ok_or(LoanError::ComputationFailure)?;
    let pmt = loan.get_payment();

    println!("Monthly Payment: {}", currency.format_amount(pmt.monthly));
    println!("Total Payment:   {}", currency.format_amount(pmt.total));
    println!("Total Interest:  {}", currency.format_amount(pmt.interest));

    if let Some(pmt_number) = cli.month {
        println!();
        println!("{}", loan.get_pmt_info(pmt_number));
    }

    let report = state
        .export_report(Local::now().naive_local())
        .ok_or(LoanError::ComputationFailure)?;

    if cli.schedule {
        println!();
        println!("{}", report.schedule_table());
    }

    if let Some(path) = cli.export {
        let body = report.render(cli.format.into());
        if path.as_os_str() == "-" {
            print!("{}", body);
        } else {
            fs::write(&path, body)?;
            info!("report written to {}", path.display());
            println!("Report written to {}", path.display());
        }
    }

    Ok(())
}
