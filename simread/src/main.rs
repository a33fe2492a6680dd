//! Display an IAR Simple Code firmware image in a human-readable form.
//!
//! # Usage
//!
//! ```text
//! simread <FILE> [-h | --hide-bytes] [--max-size <BYTES>]
//! ```
//!
//! Prints the file size, the header fields, one block per record, and the
//! checksum recomputed over the file next to the stored value. `-h` keeps
//! program bytes out of the output without affecting decoding; `--help`
//! prints usage.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use simplecode::avec::{self, FromImage, FromProgramBytes, slice};
use simplecode::sans::check::{self, Check};
use simplecode::sans::header::Header;
use simplecode::sans::record::{Data, Entry};

/// Display an IAR Simple Code firmware image in a human-readable form.
#[derive(Parser, Debug)]
#[command(name = "simread", version, about, disable_help_flag = true)]
struct Cli {
    /// Image file to display.
    file: PathBuf,

    /// Hide program bytes.
    #[arg(short = 'h', long)]
    hide_bytes: bool,

    /// Largest file size accepted, in bytes.
    #[arg(long, default_value_t = 1_000_000)]
    max_size: u64,

    /// Print help.
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // The cap is enforced from metadata, before the file is read or parsed.
    let size = fs::metadata(&cli.file)
        .with_context(|| format!("could not open {}", cli.file.display()))?
        .len();

    println!();
    println!("File size = {size}");

    if size > cli.max_size {
        anyhow::bail!("file size too large ({size} > {})", cli.max_size);
    }

    let data = fs::read(&cli.file)
        .with_context(|| format!("could not read {}", cli.file.display()))?;

    let mut presenter = Presenter::new(cli.hide_bytes);

    match avec::decode_slice(&data, &mut presenter) {
        Ok(check) => {
            presenter.close_line();
            print_checksum(check);

            Ok(())
        }
        Err(err) => {
            presenter.close_line();

            // An incomplete header leaves nothing worth summing. Any later
            // failure still gets a checksum, computed independently of the
            // record walk.
            if !matches!(err, slice::Error::IncompleteHeader) {
                let calculated = check::checksum(&data);

                println!();
                println!("----");
                println!("Calculated checksum = 0x{calculated:08x}");
            }

            Err(err.into())
        }
    }
}

fn print_checksum(check: Check) {
    let verdict = if check.matches() { "match" } else { "MISMATCH" };

    println!();
    println!("----");
    println!("Calculated checksum = 0x{:08x}", check.calculated);
    println!("Stored checksum = 0x{:08x} ({verdict})", check.found);
}

/// Prints decoded image parts as they arrive.
struct Presenter {
    hide_bytes: bool,
    /// Whether a program byte line is open and needs a terminating newline.
    in_bytes: bool,
}

impl Presenter {
    fn new(hide_bytes: bool) -> Self {
        Self {
            hide_bytes,
            in_bytes: false,
        }
    }

    /// Terminate an open program byte line.
    fn close_line(&mut self) {
        if std::mem::take(&mut self.in_bytes) {
            println!();
        }
    }
}

impl FromImage for Presenter {
    fn add_header(&mut self, header: Header) {
        println!();
        println!("Header");
        println!("Magic number = 0x{:08x}", header.magic_number);
        println!("Program flags = 0x{:08x}", header.program_flags);
        println!("Number of program bytes = {}", header.program_bytes);
        println!("Version information = 0x{:04x}", header.version);
    }

    fn add_data(&mut self, data: Data) -> Option<&mut dyn FromProgramBytes> {
        self.close_line();

        println!();
        println!("Data record");
        println!("Segment type = 0x{:02x}", data.segment_type);
        println!("Record flags = 0x{:04x}", data.record_flags);
        println!("Record start address = 0x{:08x}", data.start_address);
        println!("Number of program bytes = {}", data.program_bytes);

        if self.hide_bytes {
            println!("[Program bytes hidden]");

            None
        } else {
            print!("Program bytes =");
            self.in_bytes = true;

            Some(self)
        }
    }

    fn add_entry(&mut self, entry: Entry) {
        self.close_line();

        println!();
        println!("Entry record");
        println!("Entry address = 0x{:08x}", entry.entry_address);
        println!("Segment type = 0x{:02x}", entry.segment_type);
    }

    fn add_end(&mut self, checksum: u32) {
        self.close_line();

        println!();
        println!("End record");
        println!("Checksum = 0x{checksum:08x}");
    }
}

impl FromProgramBytes for Presenter {
    fn add_program_byte(&mut self, value: u8) {
        print!(" 0x{value:02x}");
    }
}
