//! Example: Predict from a JSON submission
//!
//! Usage:
//!   cargo run --example predict_json -- [--model PATH] [submission.json]
//!
//! Reads one JSON object with the twelve shipment fields (from the file
//! argument, or stdin when omitted) and prints the prediction as JSON.

use shipping_delay::{Predictor, PredictorConfig, PredictorError, RawShipmentInput};
use std::env;
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut config = PredictorConfig::default();
    let mut input_path: Option<String> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--model" => {
                let v = args.first().ok_or("--model requires a path")?.clone();
                args.remove(0);
                config.model_path = v.into();
            }
            _ => input_path = Some(a),
        }
    }

    let predictor = match Predictor::load(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let text = match input_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    match RawShipmentInput::from_json(&text).and_then(|raw| predictor.predict_raw(&raw)) {
        Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &PredictorError) -> ! {
    println!(
        "{}",
        serde_json::json!({ "error": e.to_string(), "field": e.field() })
    );
    std::process::exit(3);
}
