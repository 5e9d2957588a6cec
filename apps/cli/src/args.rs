use std::env;

use chrono::NaiveDate;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub date: Option<NaiveDate>,
    pub status: bool,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(env::args().skip(1))
}

fn parse_from(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--date" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --date".to_string())?;
                let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| format!("invalid date value: {value}"))?;
                parsed.date = Some(date);
            }
            "--status" => {
                parsed.status = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        "Daybook CLI\n\n\
Usage:\n  daybook [--date <YYYY-MM-DD>] [--status]\n\n\
Options:\n  --date <date>  Analyze this day instead of today\n  --status       Print the token budget status and exit\n  -h, --help     Show this help message\n\n\
Environment:\n  GROQ_API_KEY       API credential (required for analysis)\n  GROQ_VISION_MODEL  Override the vision model\n  DAYBOOK_DATA_DIR   Override the data directory\n"
    );
}
