//! Example: Interactive shipping delay form
//!
//! Usage:
//!   cargo run --example predict_form -- [--model PATH] [--strict] [--delay-ms N]
//!
//! Prompts for the twelve shipment fields on stdin, submits them, and prints
//! the verdict. Categorical fields accept either the code or the label.
//! Exits with status 1 if the model cannot be loaded.

use shipping_delay::form::{form_fields, parse_form, render_prompt, render_state};
use shipping_delay::{Predictor, PredictorConfig};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut config = PredictorConfig::default();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--model" => {
                let v = args.first().ok_or("--model requires a path")?.clone();
                args.remove(0);
                config.model_path = v.into();
            }
            "--strict" => config.strict_labels = true,
            "--delay-ms" => {
                let v = args
                    .first()
                    .ok_or("--delay-ms requires a value")?
                    .parse::<u64>()?;
                args.remove(0);
                config.submit_delay_ms = v;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: predict_form [--model PATH] [--strict] [--delay-ms N]\n\
                     \n\
                     --model PATH   Model artifact (default: predictshipping.json)\n\
                     --strict       Treat labels other than 0/1 as errors\n\
                     --delay-ms N   Pause before showing the verdict\n"
                );
                return Ok(());
            }
            other => {
                eprintln!("ERROR: unknown argument '{}'. Use --help for usage.", other);
                std::process::exit(2);
            }
        }
    }

    let predictor = match Predictor::load(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Shipping Delay Predictor");
    println!("Estimate shipping delays using ML predictions\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers: Vec<(&'static str, String)> = Vec::new();

    for field in form_fields() {
        print!("{}: ", render_prompt(&field));
        io::stdout().flush()?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        answers.push((field.key, answer));
    }

    let state = match parse_form(answers) {
        Ok(raw) => {
            let delay_ms = predictor.config().submit_delay_ms;
            if delay_ms > 0 {
                println!("\nCalculating estimated delivery delay...");
                std::thread::sleep(Duration::from_millis(delay_ms));
            }
            predictor.submit(&raw)
        }
        Err(e) => shipping_delay::PredictionState::PredictionFailed(e),
    };

    println!("\n{}", render_state(&state));

    Ok(())
}
