use std::fs;

use clap::{value_parser, Arg, ArgAction, Command};
use tracing::{error, info, Level};

use minic::c_codegen::{GeneratorOptions, DEFAULT_INDENT_WIDTH};
use minic::error::CompileResult;

fn main() {
    let matches = Command::new("minic")
        .version("0.1.0")
        .about("Translates minic source into C")
        .arg(
            Arg::new("input")
                .help("Input source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("File to write the generated output to")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("emit")
                .long("emit")
                .help("What to write to the output file")
                .value_parser(["c", "tokens", "ast"])
                .default_value("c"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per indentation level in generated C")
                .value_parser(value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Also print the generated output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // All arguments below are required or defaulted.
    let input = matches.get_one::<String>("input").cloned().unwrap_or_default();
    let output = matches.get_one::<String>("output").cloned().unwrap_or_default();
    let emit = matches
        .get_one::<String>("emit")
        .map(String::as_str)
        .unwrap_or("c");
    let options = GeneratorOptions {
        indent_width: matches
            .get_one::<usize>("indent")
            .copied()
            .unwrap_or(DEFAULT_INDENT_WIDTH),
    };

    if let Err(e) = run(&input, &output, emit, &options, matches.get_flag("stdout")) {
        error!(%input, "translation failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(
    input: &str,
    output: &str,
    emit: &str,
    options: &GeneratorOptions,
    print: bool,
) -> CompileResult<()> {
    let source = fs::read_to_string(input)?;
    info!(%input, bytes = source.len(), %emit, "read source");

    let generated = match emit {
        "tokens" => minic::dump_tokens(&source)?,
        "ast" => minic::dump_ast(&source)?,
        _ => minic::compile_with_options(&source, options)?,
    };

    if print {
        println!("{}", generated);
    }

    fs::write(output, &generated)?;
    info!(%output, bytes = generated.len(), "wrote output");
    if emit == "c" {
        println!("C code generated and saved to {}", output);
    } else {
        println!("{} dump saved to {}", emit, output);
    }

    Ok(())
}
