// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small apps driving smart plugs through the Presence cloud.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example presence_app -- <app> --user <email> --password <password>
//! ```
//!
//! Credentials can also come from `PRESENCE_USER` and `PRESENCE_PASSWORD`.
//!
//! # Apps
//!
//! - `allon` / `alloff`: switch every plug on or off
//! - `morse`: blink every plug with a message in Morse code
//! - `timer`: switch every plug off a few minutes after its last change
//!
//! # Example
//!
//! ```bash
//! PRESENCE_USER=me@example.com PRESENCE_PASSWORD=secret \
//!     cargo run --example presence_app -- morse --message "HI" -v
//! ```

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use clap::{Parser, ValueEnum};
use presence_lib::protocol::{HttpClient, HttpConfig, Server};
use presence_lib::{Cloud, Device, Parameter, User};
use tracing_subscriber::EnvFilter;

const OUTLET_STATUS: &str = "outletStatus";
const ON: &str = "ON";
const OFF: &str = "OFF";

/// One week.
const MAX_MINUTES: i64 = 7 * 24 * 60;

const SHORT: Duration = Duration::from_millis(500);
const LONG: Duration = Duration::from_secs(2);

/// Presence cloud demo apps
#[derive(Parser, Debug)]
#[command(name = "presence_app")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// App to run
    #[arg(value_enum)]
    app: App,

    /// Presence username / email address
    #[arg(long, env = "PRESENCE_USER")]
    user: String,

    /// Presence password
    #[arg(long, env = "PRESENCE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Print more debug information to the console
    #[arg(short, long)]
    verbose: bool,

    /// Cloud server: developer or esp
    #[arg(short, long, default_value_t = Server::Developer)]
    server: Server,

    /// Product id of the plugs to drive
    #[arg(long, default_value_t = 2012)]
    product_id: u32,

    /// Message blinked by the morse app
    #[arg(long, default_value = "SOS")]
    message: String,

    /// Minutes after the last change before the timer app switches off
    #[arg(
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(i64).range(0..=MAX_MINUTES)
    )]
    minutes: i64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum App {
    /// Switch every plug on
    Allon,
    /// Switch every plug off
    Alloff,
    /// Blink a message in Morse code
    Morse,
    /// Switch plugs off after a delay
    Timer,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    let cloud = match Cloud::http(HttpConfig::for_server(cli.server)) {
        Ok(cloud) => cloud,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut user = match cloud.login(&cli.user, &cli.password, None).await {
        Ok(user) => user,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.verbose {
        println!("{user}");
    }

    let result = match cli.app {
        App::Allon => switch_all(&user, cli.product_id, ON).await,
        App::Alloff => switch_all(&user, cli.product_id, OFF).await,
        App::Morse => morse(&user, cli.product_id, &cli.message).await,
        App::Timer => timer(&mut user, cli.product_id, cli.minutes).await,
    };

    if let Err(e) = result {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn switch_all(
    user: &User<HttpClient>,
    product_id: u32,
    value: &str,
) -> presence_lib::Result<()> {
    for device in user.devices_by_product_id(product_id) {
        device.send_command(OUTLET_STATUS, None, value).await?;
    }
    Ok(())
}

// ============================================================================
// Morse
// ============================================================================

async fn morse(
    user: &User<HttpClient>,
    product_id: u32,
    message: &str,
) -> presence_lib::Result<()> {
    let code = to_morse(message);
    for device in user.devices_by_product_id(product_id) {
        device.send_command(OUTLET_STATUS, None, OFF).await?;

        print!("{message}: ");
        for symbol in code.chars() {
            blink(device, symbol).await?;
            print!("{symbol}");
            let _ = std::io::stdout().flush();
        }
        println!();
    }
    Ok(())
}

async fn blink(device: &Device<HttpClient>, symbol: char) -> presence_lib::Result<()> {
    let hold = match symbol {
        '.' => SHORT,
        '-' => LONG,
        _ => {
            tokio::time::sleep(SHORT).await;
            return Ok(());
        }
    };
    device.send_command(OUTLET_STATUS, None, ON).await?;
    tokio::time::sleep(hold).await;
    device.send_command(OUTLET_STATUS, None, OFF).await
}

fn to_morse(message: &str) -> String {
    message
        .chars()
        .filter_map(|c| {
            let code = morse_code(c);
            if code.is_none() {
                eprintln!("Character {c:?} is not supported by morse code");
            }
            code
        })
        .collect()
}

fn morse_code(c: char) -> Option<&'static str> {
    Some(match c.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        ',' => "--..--",
        '.' => ".-.-.-",
        '?' => "..--..",
        ';' => "-.-.-.",
        ':' => "---...",
        '\'' => ".----.",
        '-' => "-....-",
        '/' => "-..-.",
        '(' | ')' => "-.--.-",
        '_' => "..--.-",
        ' ' => " ",
        _ => return None,
    })
}

// ============================================================================
// Timer
// ============================================================================

async fn timer(
    user: &mut User<HttpClient>,
    product_id: u32,
    minutes: i64,
) -> presence_lib::Result<()> {
    let ids: Vec<String> = user
        .devices_by_product_id(product_id)
        .map(|d| d.id().to_string())
        .collect();

    for id in ids {
        let Some(device) = user.device_mut(&id) else {
            continue;
        };
        let report = device.populate_parameters(Some(&[OUTLET_STATUS])).await?;
        device.apply_parameters(&report);

        let last_update = device
            .parameter(OUTLET_STATUS, None)
            .and_then(Parameter::last_update);
        if let Some(off_at) = last_update.and_then(|last| switch_off_at(last, minutes)) {
            let remaining = off_at.signed_duration_since(Utc::now());
            println!("{id}: off in {}s", remaining.num_seconds().max(0));
            if let Ok(wait) = remaining.to_std() {
                tokio::time::sleep(wait).await;
            }
        }

        device.send_command(OUTLET_STATUS, None, OFF).await?;
    }
    Ok(())
}

/// Time at which a plug last changed at `last` is due to switch off.
///
/// `None` when the delay is out of range.
fn switch_off_at(last: DateTime<FixedOffset>, minutes: i64) -> Option<DateTime<FixedOffset>> {
    TimeDelta::try_minutes(minutes).and_then(|delay| last.checked_add_signed(delay))
}
