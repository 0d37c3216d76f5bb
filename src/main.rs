use clap::Parser;
use miniform::cli::Cli;
use miniform::config::Settings;
use miniform::driver::{self, HeadlessForm, SignupProps};
use miniform::snapshot::{render_props, PropsConvention};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_max_level(settings.log.level()?)
        .with_writer(io::stderr)
        .init();

    let props: Value = serde_json::from_str(&cli.props)?;
    let convention = settings.props.convention();
    let mut form = driver::signup(&SignupProps { min_age: cli.min_age })?;

    info!(?convention, min_age = cli.min_age, "Signup form mounted");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_props(&mut out, &form, &props, &convention)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match form.run_line(&line) {
            Ok(true) => print_props(&mut out, &form, &props, &convention)?,
            Ok(false) => {}
            Err(e) => warn!("Skipping '{}': {}", line.trim(), e),
        }
    }

    Ok(())
}

fn print_props(
    out: &mut impl Write,
    form: &HeadlessForm,
    props: &Value,
    convention: &PropsConvention,
) -> anyhow::Result<()> {
    let rendered = render_props(props.clone(), &form.binding().snapshot(), convention)?;
    writeln!(out, "{}", serde_json::to_string(&rendered)?)?;
    Ok(())
}
