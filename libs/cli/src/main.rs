//! Command-line front end for the print tuning calculators.
//!
//! Each subcommand reads raw values exactly as a form would supply them,
//! runs one calculator and prints its message. Validation failures exit
//! non-zero.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::constants::{
    CalculatorConfig, DEFAULT_DECIMAL_PLACES, LAYER_STEP_MM, MAX_LAYER_RATIO, MIN_LAYER_RATIO,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tuning_calc::{
    CalculationRequest, CalculationResponse, Calculator, FlowInput, LayerHeightInput,
    OverhangInput, SlicerConvention, VolumetricInput, VolumetricMode,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Overhang, flow, layer height and volumetric speed calculators for 3D printing"
)]
struct Args {
    #[arg(long, global = true, help = "Print the full JSON response")]
    json: bool,

    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_DECIMAL_PLACES,
        help = "Decimal places results are rounded to"
    )]
    decimal_places: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Maximum unsupported overhang angle
    Overhang {
        #[arg(short = 'n', long, help = "Nozzle diameter (mm)")]
        nozzle_diameter: String,

        #[arg(short = 'l', long, help = "Layer height (mm)")]
        layer_height: String,

        #[arg(short = 's', long, default_value = "orca", help = "Slicer convention: orca or cura")]
        slicer: SlicerConvention,
    },

    /// Corrected flow percentage from 20 wall measurements
    Flow {
        #[arg(
            short = 'm',
            long,
            num_args = 1..,
            required = true,
            help = "Wall thickness measurements (mm), row by row"
        )]
        measurements: Vec<String>,

        #[arg(short = 'w', long, help = "Configured extrusion width (mm)")]
        extrusion_width: String,

        #[arg(short = 'f', long, default_value = "100", help = "Configured flow (%)")]
        flow: String,
    },

    /// Layer height for a target wall angle
    LayerHeight {
        #[arg(short = 'a', long, help = "Target wall angle (1-89°)")]
        angle: String,

        #[arg(short = 's', long, default_value = "orca", help = "Slicer convention: orca or cura")]
        slicer: SlicerConvention,

        #[arg(short = 'n', long, default_value = "0.4", help = "Nozzle diameter (mm)")]
        nozzle_diameter: String,
    },

    /// Volumetric flow from print speed, or print speed from volumetric flow
    Volumetric {
        #[arg(short = 'l', long, help = "Layer height (mm)")]
        layer_height: Option<String>,

        #[arg(short = 'n', long, help = "Nozzle diameter (mm)")]
        nozzle_diameter: Option<String>,

        #[arg(
            long,
            conflicts_with = "flow",
            required_unless_present = "flow",
            help = "Print speed (mm/s); solves for volumetric flow"
        )]
        speed: Option<String>,

        #[arg(long, help = "Volumetric flow (mm³/s); solves for print speed")]
        flow: Option<String>,
    },
}

impl Command {
    /// Maps parsed arguments onto a calculator request.
    fn into_request(self) -> CalculationRequest {
        match self {
            Command::Overhang {
                nozzle_diameter,
                layer_height,
                slicer,
            } => CalculationRequest::Overhang(OverhangInput::new(
                nozzle_diameter,
                layer_height,
                slicer,
            )),
            Command::Flow {
                measurements,
                extrusion_width,
                flow,
            } => CalculationRequest::Flow(FlowInput::new(measurements, extrusion_width, flow)),
            Command::LayerHeight {
                angle,
                slicer,
                nozzle_diameter,
            } => CalculationRequest::LayerHeight(LayerHeightInput::new(
                angle,
                slicer,
                nozzle_diameter,
            )),
            Command::Volumetric {
                layer_height,
                nozzle_diameter,
                speed,
                flow,
            } => {
                let (mode, known) = match (speed, flow) {
                    (Some(speed), _) => (VolumetricMode::SolveForFlow, Some(speed)),
                    (None, flow) => (VolumetricMode::SolveForSpeed, flow),
                };
                CalculationRequest::Volumetric(VolumetricInput::new(
                    layer_height,
                    nozzle_diameter,
                    mode,
                    known,
                ))
            }
        }
    }
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = CalculatorConfig::new(
        args.decimal_places,
        MIN_LAYER_RATIO,
        MAX_LAYER_RATIO,
        LAYER_STEP_MM,
    )
    .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let request = args.command.into_request();
    debug!(calculator = request.name(), "Evaluating request");
    let response = Calculator::with_config(config).evaluate(&request);

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .context("Failed to serialize response")?;
        println!("{json}");
    } else {
        report(&response);
    }

    if !response.is_ok() {
        bail!("{}", response.message());
    }
    Ok(())
}

fn report(response: &CalculationResponse) {
    match response {
        CalculationResponse::Ok {
            message,
            diagnostics,
            ..
        } => {
            println!("{message}");
            for diagnostic in diagnostics {
                println!("  {diagnostic}");
            }
        }
        CalculationResponse::Error { diagnostics, .. } => {
            for diagnostic in diagnostics {
                eprintln!("  {diagnostic}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(argv: &[&str]) -> CalculationRequest {
        Args::try_parse_from(argv)
            .expect("arguments parse")
            .command
            .into_request()
    }

    #[test]
    fn overhang_arguments_map_to_request() {
        let req = request(&["tuning-cli", "overhang", "-n", "0.4", "-l", "0.2", "-s", "cura"]);
        assert_eq!(
            req,
            CalculationRequest::Overhang(OverhangInput::new("0.4", "0.2", SlicerConvention::Cura))
        );
    }

    #[test]
    fn flow_accepts_many_measurements() {
        let mut argv = vec!["tuning-cli", "flow", "-w", "0.4", "-m"];
        argv.extend(std::iter::repeat("0.42").take(20));

        let response = Calculator::default().evaluate(&request(&argv));
        assert!(response.is_ok());
        assert!(response.message().contains("95.24%"));
    }

    #[test]
    fn volumetric_speed_selects_flow_mode() {
        let req = request(&["tuning-cli", "volumetric", "-l", "0.2", "-n", "0.4", "--speed", "60"]);
        let CalculationRequest::Volumetric(input) = req else {
            panic!("expected volumetric request");
        };
        assert_eq!(input.mode, VolumetricMode::SolveForFlow);
    }

    #[test]
    fn volumetric_requires_speed_or_flow() {
        assert!(Args::try_parse_from(["tuning-cli", "volumetric", "-l", "0.2"]).is_err());
        assert!(Args::try_parse_from([
            "tuning-cli", "volumetric", "--speed", "60", "--flow", "4.8"
        ])
        .is_err());
    }

    #[test]
    fn decimal_places_round_results_only() {
        let args = Args::try_parse_from([
            "tuning-cli", "--decimal-places", "0", "overhang", "-n", "0.4", "-l", "0.2",
        ])
        .unwrap();
        let config = CalculatorConfig::new(
            args.decimal_places,
            MIN_LAYER_RATIO,
            MAX_LAYER_RATIO,
            LAYER_STEP_MM,
        )
        .unwrap();

        let response = Calculator::with_config(config).evaluate(&args.command.into_request());
        assert!(response.is_ok());
        assert!(response.message().contains("45.00°"));
    }

    #[test]
    fn unknown_slicer_is_a_parse_error() {
        assert!(Args::try_parse_from(["tuning-cli", "layer-height", "-a", "45", "-s", "prusa"]).is_err());
    }

    #[test]
    fn global_json_flag_parses_after_subcommand() {
        let args = Args::try_parse_from(["tuning-cli", "layer-height", "-a", "45", "--json"]).unwrap();
        assert!(args.json);
        assert_eq!(args.decimal_places, DEFAULT_DECIMAL_PLACES);
    }
}
