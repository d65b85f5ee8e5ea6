use std::io;
use std::process::ExitCode;

use clap::Parser;

use uvcc::commands::{self, Command};
use uvcc::{CameraFactory, CameraHelper, ControlTable, UsbOpener, UvcError};

const EXAMPLES: &str = "\
EXAMPLES:
    uvcc controls
    uvcc get brightness
    uvcc set brightness 128
    uvcc set absolute_pan_tilt -3600 7200
    uvcc --vendor 0x046d --product 0x0825 ranges
    uvcc export > camera.json
    uvcc import camera.json
    uvcc devices";

#[derive(Debug, Parser)]
#[command(
    name = "uvcc",
    version,
    about = "USB Video Class (UVC) device configurator",
    arg_required_else_help = true,
    after_help = EXAMPLES
)]
struct Cli {
    /// USB vendor id of the camera (decimal or 0x hex).
    #[arg(long, global = true, env = "UVCC_VENDOR", value_parser = parse_id::<u16>)]
    vendor: Option<u16>,

    /// USB product id of the camera (decimal or 0x hex).
    #[arg(long, global = true, env = "UVCC_PRODUCT", value_parser = parse_id::<u16>)]
    product: Option<u16>,

    /// USB device address of the camera.
    #[arg(long, global = true, env = "UVCC_ADDRESS", value_parser = parse_id::<u8>)]
    address: Option<u8>,

    /// More output; repeat for more detail.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Parse a decimal or `0x`-prefixed hexadecimal id.
fn parse_id<T: TryFrom<u32>>(s: &str) -> Result<T, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    }
    .map_err(|e| format!("invalid id {:?}: {}", s, e))?;

    T::try_from(parsed).map_err(|_| format!("id {} is out of range", s))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), UvcError> {
    // Read import input before touching the device
    let configuration = match &cli.command {
        Command::Import { file } => Some(commands::read_configuration(file.as_deref())?),
        _ => None,
    };

    let mut stdout = io::stdout().lock();

    if !cli.command.needs_camera() {
        return commands::devices(&mut stdout);
    }

    let camera = CameraFactory::new(UsbOpener).get(cli.vendor, cli.product, cli.address)?;
    let helper = CameraHelper::new(ControlTable::default(), camera);

    commands::execute(&cli.command, &helper, configuration.as_ref(), &mut stdout)
}

/// Every error's display text already carries its cause.
fn error_message(error: &UvcError) -> String {
    format!("Error: {}", error)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_and_hex_ids() {
        assert_eq!(parse_id::<u16>("1133"), Ok(1133));
        assert_eq!(parse_id::<u16>("0x046d"), Ok(0x046d));
        assert_eq!(parse_id::<u16>("0X046D"), Ok(0x046d));
        assert_eq!(parse_id::<u8>("0"), Ok(0));
    }

    #[test]
    fn reject_bad_ids() {
        assert!(parse_id::<u16>("0x10000").is_err());
        assert!(parse_id::<u8>("256").is_err());
        assert!(parse_id::<u16>("webcam").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn set_accepts_negative_values() {
        let cli = Cli::try_parse_from(["uvcc", "set", "absolute_pan_tilt", "-3600", "7200"]).unwrap();
        match cli.command {
            Command::Set { control, values } => {
                assert_eq!(control, "absolute_pan_tilt");
                assert_eq!(values, [-3600, 7200]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn construction_error_names_its_cause_once() {
        let error = uvcc::classify_open_error(
            uvcc::ConnectionFilter::new(Some(0x046d), None, None),
            uvcc::OpenError::Usb(rusb::Error::Access),
        );
        let message = error_message(&error);
        assert!(message.starts_with("Error: Could not open UVC device"), "{message}");
        assert_eq!(message.matches("USB error: Access denied").count(), 1, "{message}");
    }

    #[test]
    fn global_filter_flags() {
        let cli = Cli::try_parse_from(["uvcc", "get", "brightness", "--vendor", "0x046d", "-vv"]).unwrap();
        assert_eq!(cli.vendor, Some(0x046d));
        assert_eq!(cli.product, None);
        assert_eq!(cli.verbose, 2);
    }
}
