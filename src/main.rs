use jogkit::{
    init_logging, spawn_position_poller, AxisGroup, DispatchOutcome, Error, FilePreferences,
    JogAction, JogCommandDispatcher, MemoryPreferences, PositionDisplaySync, PreferenceStore,
    SimulatedDriver, BUILD_DATE, VERSION,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// How often the position readout is refreshed in the background
const POLL_PERIOD: Duration = Duration::from_millis(250);

/// One line typed at the console
enum ConsoleCommand {
    Action(JogAction),
    Status,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = Error;

    fn from_str(s: &str) -> jogkit::Result<Self> {
        match s.trim() {
            "status" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            "" => Err(Error::other("empty command")),
            line => Ok(ConsoleCommand::Action(line.parse()?)),
        }
    }
}

fn open_preferences() -> Arc<dyn PreferenceStore> {
    match FilePreferences::open_default() {
        Ok(prefs) => {
            tracing::info!("Preferences: {}", prefs.path().display());
            Arc::new(prefs)
        }
        Err(e) => {
            tracing::warn!("Preferences will not be saved: {}", e);
            Arc::new(MemoryPreferences::new())
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  X+ X- Y+ Y- Z+ Z-     jog one axis by the active step");
    println!("  Center X|Y|Z          move one axis to 0");
    println!("  Zero                  make the current position the origin");
    println!("  Stop                  stop all motion");
    println!("  jog size <label>      select a step (0.01mm ... 50mm)");
    println!("  feed xy|z <value>     set a jog feedrate in mm/min");
    println!("  status                show position, step and feedrates");
    println!("  quit");
}

fn print_status(dispatcher: &JogCommandDispatcher<SimulatedDriver>, position: &str) {
    let xy = dispatcher.feedrate(AxisGroup::Xy);
    let z = dispatcher.feedrate(AxisGroup::Z);
    println!("position  {}", position);
    println!("step      {}", dispatcher.catalog().active_label());
    println!(
        "feedrate  XY {} ({}..={})  Z {} ({}..={})",
        xy.displayed_text(),
        xy.bounds().start(),
        xy.bounds().end(),
        z.displayed_text(),
        z.bounds().start(),
        z.bounds().end()
    );
}

fn describe(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Moved { target, feedrate } => {
            format!("moving to {} at {} mm/min", target, feedrate)
        }
        DispatchOutcome::OriginReset => "origin reset".to_string(),
        DispatchOutcome::Stopped => "stopped".to_string(),
        DispatchOutcome::JogDistanceSelected(distance) => format!("step {} mm", distance),
        DispatchOutcome::FeedrateChanged { group, value } => {
            format!("{} feedrate {} mm/min", group, value)
        }
        DispatchOutcome::Ignored => "ignored".to_string(),
        DispatchOutcome::Dropped(e) => format!("dropped: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!("jogkit {} (built {})", VERSION, BUILD_DATE);

    let driver = Arc::new(SimulatedDriver::new());
    let mut dispatcher = JogCommandDispatcher::new(driver.clone(), open_preferences());
    let display = Arc::new(PositionDisplaySync::new(driver));
    display.refresh();
    let poller = spawn_position_poller(display.clone(), POLL_PERIOD);

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(Error::Input(e)) => {
                dispatcher.reject_input(e);
                println!("unknown command, type `help`");
                continue;
            }
            Err(_) => continue,
        };

        match command {
            ConsoleCommand::Action(action) => {
                let outcome = dispatcher.handle(action);
                println!("{}", describe(&outcome));
                println!("position  {}", display.refresh());
            }
            ConsoleCommand::Status => print_status(&dispatcher, &display.displayed().to_string()),
            ConsoleCommand::Help => print_help(),
            ConsoleCommand::Quit => break,
        }
    }

    poller.stop().await;
    Ok(())
}
