//! charfreq - character and bigram frequency counter
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use charfreq::cli::Args;
use charfreq::output::{clean_json, render, OutputWriter};
use charfreq::processor::{Processor, ProcessorConfig};
use charfreq::progress::{print_error, print_header, print_info, print_warning};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG still wins when set
    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    // Run the application
    if let Err(e) = run(args) {
        log::debug!("charfreq failed: {:?}", e);
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    args.validate()?;

    let config = ProcessorConfig::from_args(&args)?;
    log::debug!("{:?}", args);

    if args.debug {
        print_config(&args, &config);
    }

    let processor = Processor::new(config);
    let frequencies = processor.run(&args.files)?;

    let mut text = render(&frequencies, args.format);
    if args.clean {
        text = clean_json(&text);
    }

    let mut writer = OutputWriter::open(args.output.as_deref())?;
    writer.write(&text)?;
    writer.flush()?;

    let stats = processor.stats();
    if args.stats {
        stats.print_summary(frequencies.len());
    }
    if !args.quiet && stats.had_failures() {
        print_warning(&format!(
            "{} of {} files could not be read",
            stats.get_decode_errors() + stats.get_io_errors(),
            stats.get_requested_files()
        ));
    }

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Files:        {}", args.files.len()));
    print_info(&format!("Tokens:       {:?}", config.shape));
    print_info(&format!("Filter:       {:?}", config.filter));
    print_info(&format!("Parallel:     {}", config.parallel));
    print_info(&format!(
        "Threads:      {}",
        config
            .threads
            .unwrap_or_else(charfreq::partition::default_worker_count)
    ));
    print_info(&format!("Format:       {:?}", args.format));
}
