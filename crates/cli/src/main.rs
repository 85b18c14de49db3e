use clap::{Parser, Subcommand};
use std::process::ExitCode;
use vitals_core::{bmi, calculate_risk};

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Vitals tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score risk from age and systolic blood pressure
    Risk {
        /// Age in years (0-120)
        age: f64,
        /// Systolic blood pressure in mmHg (70-250)
        systolic: f64,
    },
    /// Body mass index from weight and height
    Bmi {
        /// Weight in kilograms
        weight: f64,
        /// Height in metres
        height: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Risk { age, systolic }) => match calculate_risk(age, systolic) {
            Ok(result) => {
                println!("Risk score: {:.1}", result.risk_score);
                println!("Risk level: {}", result.risk_level);
            }
            Err(e) => {
                eprintln!("Error calculating risk: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Some(Commands::Bmi { weight, height }) => {
            if !(height.is_finite() && height > 0.0) {
                eprintln!("Error: height must be greater than 0, got {}", height);
                return ExitCode::FAILURE;
            }
            println!("BMI: {:.2}", bmi(weight, height));
        }
        None => {
            println!("Use 'vitals --help' for commands");
        }
    }

    ExitCode::SUCCESS
}
