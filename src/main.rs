//! lsb-stego - hide text in the red-channel LSBs of an image.
//!
//! Without a subcommand the interactive menu is started.

use clap::{ArgAction, Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use lsb_stego::files::{capacity_of_file, hide_in_file, reveal_from_file};
use lsb_stego::{CodecConfig, Result};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lsb-stego")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide text in the least significant bits of an image",
    long_about = "Hides a short message in the red-channel least significant bits of a PNG or JPEG image and recovers it. Only lossless (PNG) output keeps the message intact."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML file with codec settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JPEG quality used when the output is .jpg/.jpeg (1-100)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: Option<u8>,

    /// Refuse to write a hidden message into a lossy format
    #[arg(long, global = true)]
    lossless_only: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide text in an image
    Encode {
        /// Carrier image (PNG or JPEG)
        input: PathBuf,

        /// Output image; the extension picks the format
        output: PathBuf,

        /// Text to hide
        #[arg(long, conflicts_with = "text_file")]
        text: Option<String>,

        /// File containing the text to hide
        #[arg(long, conflicts_with = "text")]
        text_file: Option<PathBuf>,
    },

    /// Recover text hidden in an image
    Decode {
        /// Image carrying a hidden message
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show how much text an image can carry
    Capacity {
        /// Carrier image
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive menu
    Menu,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(cli: &Cli) -> Result<CodecConfig> {
    let mut config = match &cli.config {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::default(),
    };

    if let Some(quality) = cli.jpeg_quality {
        config.jpeg_quality = quality;
    }
    if cli.lossless_only {
        config.allow_lossy_output = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Encode {
            input,
            output,
            text,
            text_file,
        } => cmd_encode(&input, &output, text, text_file, &config),

        Commands::Decode { input, output } => cmd_decode(&input, output, &config),

        Commands::Capacity { input, json } => cmd_capacity(&input, json, &config),

        Commands::Menu => cmd_menu(&config),
    }
}

fn cmd_encode(
    input: &Path,
    output: &Path,
    text: Option<String>,
    text_file: Option<PathBuf>,
    config: &CodecConfig,
) -> Result<()> {
    let text = match (text, text_file) {
        (Some(s), None) => s,
        (None, Some(path)) => std::fs::read_to_string(&path)?,
        (None, None) => {
            // Read from stdin
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        (Some(_), Some(_)) => unreachable!(),
    };

    let report = hide_in_file(input, output, &text, config)?;
    println!(
        "Hid {} characters ({} bits) in {}",
        report.chars,
        report.payload_bits,
        report.output.display()
    );
    if report.lossy {
        println!("Warning: {} is lossy, the message may not be recoverable", report.format);
    }

    Ok(())
}

fn cmd_decode(input: &Path, output: Option<PathBuf>, config: &CodecConfig) -> Result<()> {
    let message = reveal_from_file(input, config)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &message)?;
            println!(
                "Wrote {} characters to {}",
                message.chars().count(),
                path.display()
            );
        }
        None => println!("{}", message),
    }

    Ok(())
}

fn cmd_capacity(input: &Path, json: bool, config: &CodecConfig) -> Result<()> {
    let report = capacity_of_file(input, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Image Capacity");
    println!("==============");
    println!("Dimensions:       {}x{}", report.width, report.height);
    println!("Carrier pixels:   {}", report.pixels);
    println!("Payload bits:     {}", report.payload_bits);
    println!("Max characters:   {}", report.max_chars);

    Ok(())
}

/// Print a prompt and read one line without its terminator.
///
/// Returns `None` at end of input.
fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn cmd_menu(config: &CodecConfig) -> Result<()> {
    let separator = "-".repeat(40);

    loop {
        print!("\x1b[H\x1b[2J");
        println!("LSB STEGANOGRAPHY");
        println!("{}", separator);
        println!("1. Encode text");
        println!("2. Decode image");
        println!("3. Exit");
        println!("{}", separator);

        let choice = match prompt_line("> ")? {
            Some(choice) => choice,
            None => return Ok(()),
        };

        // Failures are reported and the menu is shown again.
        let outcome = match choice.trim() {
            "1" => menu_encode(config),
            "2" => menu_decode(config),
            "3" => return Ok(()),
            _ => {
                println!("This isn't a valid option");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("Error: {}", e);
        }

        if prompt_line("Press Enter to continue...")?.is_none() {
            return Ok(());
        }
    }
}

fn menu_encode(config: &CodecConfig) -> Result<()> {
    let Some(input) = prompt_line("Input file (with extension): ")? else {
        return Ok(());
    };
    let Some(output) = prompt_line("Output file (with extension): ")? else {
        return Ok(());
    };
    let Some(text) = prompt_line("The text to encode: ")? else {
        return Ok(());
    };

    let report = hide_in_file(Path::new(input.trim()), Path::new(output.trim()), &text, config)?;
    println!(
        "Hid {} characters in {}",
        report.chars,
        report.output.display()
    );
    Ok(())
}

fn menu_decode(config: &CodecConfig) -> Result<()> {
    let Some(input) = prompt_line("File to decode (with extension): ")? else {
        return Ok(());
    };

    let message = reveal_from_file(Path::new(input.trim()), config)?;
    println!("Hidden message: {}", message);
    Ok(())
}
