#[macro_use]
extern crate clap;

use clap::Arg;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use metaii_masm::LoaderError;
use metaii_vm::error::ProgramError;
use metaii_vm::program::Program;
use metaii_vm::vm::{Outcome, Vm};

#[derive(Debug)]
enum IOErrorContext {
    ReadMasm,
    ReadInput,
    CreateOutput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Io(io::Error, IOErrorContext, PathBuf),
    Load(LoaderError),
    Program(ProgramError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => write!(
                f,
                "{} \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadMasm => "Reading masm file",
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::CreateOutput => "Creating output file",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Load(err) => write!(f, "Loading masm program failed:\n{}", err),
            Error::Program(err) => write!(f, "Building program failed: {}", err),
        }
    }
}

const EXIT_OK: i32 = 0;
const EXIT_RECOGNITION_ERROR: i32 = 1;
const EXIT_LOAD_ERROR: i32 = 2;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("MASM_FILE")
                .help("Sets the masm program file to run")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("INPUT_FILE")
                .help("Sets the input file to recognize; '-' or omitted reads stdin")
                .index(2),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .help("Sets the file to write translated output to (defaults to stdout)"),
        )
        .arg(
            Arg::with_name("trace")
                .long("trace")
                .help("Prints a per-step diagnostic line to stderr as the VM runs"),
        )
        .get_matches();

    let masm_path = matches.value_of("MASM_FILE").unwrap();
    let input_path = matches.value_of("INPUT_FILE");
    let output_path = matches.value_of("output");
    let trace = matches.is_present("trace");

    match run(masm_path, input_path, output_path, trace) {
        Ok(Outcome::Halted) => process::exit(EXIT_OK),
        Ok(Outcome::RecognitionError) => {
            eprintln!("recognition failed: input does not match the masm program");
            process::exit(EXIT_RECOGNITION_ERROR);
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(EXIT_LOAD_ERROR);
        }
    }
}

fn run(
    masm_path: &str,
    input_path: Option<&str>,
    output_path: Option<&str>,
    trace: bool,
) -> Result<Outcome, Error> {
    let masm_source = read_file(masm_path, IOErrorContext::ReadMasm)?;

    let instructions = metaii_masm::load(&masm_source)
        .map_err(|err| Error::Load(err.with_path(masm_path.to_owned())))?;
    let program = Program::new(instructions).map_err(Error::Program)?;

    let input = match input_path {
        None | Some("-") => read_stdin()?,
        Some(path) => read_file(path, IOErrorContext::ReadInput)?,
    };

    let mut sink: Box<dyn Write> = match output_path {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|err| {
            Error::Io(err, IOErrorContext::CreateOutput, PathBuf::from(path))
        })?)),
        None => Box::new(io::stdout()),
    };

    let mut vm = Vm::new(&input, &mut sink);
    let outcome = if trace {
        vm.run_traced(&program, &mut |line| eprintln!("{}", line))
    } else {
        vm.run(&program)
    };

    outcome.map_err(|err| {
        Error::Io(
            err,
            IOErrorContext::WriteOutput,
            output_path.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("<stdout>")),
        )
    })
}

fn read_file(path: &str, context: IOErrorContext) -> Result<String, Error> {
    let mut buf = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut buf))
        .map_err(|err| Error::Io(err, context, PathBuf::from(path)))?;
    Ok(buf)
}

fn read_stdin() -> Result<String, Error> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, PathBuf::from("-")))?;
    Ok(buf)
}
