use clap::{Parser, Subcommand};

/// Calendar arithmetic on iCalendar DATE-TIME values
#[derive(Parser, Debug)]
#[command(name = "timeshift")]
#[command(version, about = "Calendar arithmetic on iCalendar DATE-TIME values")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shift timestamps by calendar and clock deltas
    Advance(AdvanceArgs),
    /// Override fields of timestamps
    Change(ChangeArgs),
    /// Compute a period boundary (start/end of minute, day, week, month, ...)
    Boundary(BoundaryArgs),
    /// Move timestamps to the same day in another month of the year
    InMonth(InMonthArgs),
    /// Show the ISO year and week numbering of timestamps
    Iso(IsoArgs),
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Input file path, one timestamp per line (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// IANA timezone for timestamps without an offset (e.g., Europe/Berlin)
    #[arg(short, long)]
    pub tz: Option<String>,

    /// Gregorian reform: italy, england, gregorian, julian
    #[arg(long, default_value = "italy")]
    pub calendar_start: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct AdvanceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, allow_negative_numbers = true)]
    pub years: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub months: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub weeks: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub hours: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub minutes: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub seconds: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ChangeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i32>,

    #[arg(long)]
    pub month: Option<u32>,

    #[arg(long)]
    pub day: Option<u32>,

    /// New hour; resets minute and second unless they are given too
    #[arg(long)]
    pub hour: Option<u32>,

    /// New minute; resets second unless it is given too
    #[arg(long)]
    pub minute: Option<u32>,

    #[arg(long)]
    pub second: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct BoundaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Boundary to compute (e.g., start-of-day, end-of-month, end-of-iso-year)
    #[arg(short, long)]
    pub query: String,

    /// Week start day: mo, tu, we, th, fr, sa, su
    #[arg(long, default_value = "mo")]
    pub wkst: String,
}

#[derive(clap::Args, Debug)]
pub struct InMonthArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Target month (1-12)
    #[arg(long)]
    pub month: u32,
}

#[derive(clap::Args, Debug)]
pub struct IsoArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Week start day: mo, tu, we, th, fr, sa, su
    #[arg(long, default_value = "mo")]
    pub wkst: String,
}
