use bft::{
    AsmLabelEmitter, Emit, IndentedEmitter, InstructionMapping, TemplateLabelEmitter, convert,
};
use clap::Parser;
use std::env;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [--asm|--label] [-m <MAPFILE>] [--header <PATH>] [--tail <PATH>] <FILE>

Options:
  --asm               Emit generated loop labels for '['/']'; in the map values
                      for '[' and ']', the last ']' and '[' are placeholders
                      for the jump targets
  --label             Rewrite the openlabel/closelabel tokens in the map values
                      for '['/']' to generated loop labels
  --map,   -m <PATH>  JSON map file overriding the built-in instruction mapping
  --header <PATH>     File copied verbatim to stdout before the program
  --tail <PATH>       File copied verbatim to stdout after the program
  --indent <TEXT>     Indentation unit for generic mode (default four spaces;
                      an empty value disables indentation)
  --help,  -h         Show this help

Description:
  Transpiles the Brainfuck program in FILE to stdout, replacing each
  instruction character with its mapped text. Without a mode flag the output
  is indented to follow the loop structure. Characters outside the mapping
  are skipped; unbalanced brackets are tolerated.

Examples:
- Transpile with the built-in pseudo-assembly mapping:
    {0} ./program.bf
- Emit 6502-style assembly with loop labels:
    {0} --asm -m 6502.json --header prelude.s ./program.bf
"#,
        program
    );
    let _ = io::stderr().flush();
    process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bft", disable_help_flag = true)]
struct Cli {
    /// Emit generated loop labels, substituting the last ']'/'[' placeholder
    /// in the bracket map values
    #[arg(long = "asm", conflicts_with = "label")]
    asm: bool,

    /// Rewrite openlabel/closelabel tokens in the bracket map values to
    /// generated loop labels
    #[arg(long = "label")]
    label: bool,

    /// JSON map file overriding the built-in instruction mapping
    #[arg(short = 'm', long = "map", value_name = "PATH")]
    map: Option<String>,

    /// File copied verbatim to stdout before the transformed program
    #[arg(long = "header", value_name = "PATH")]
    header: Option<String>,

    /// File copied verbatim to stdout after the transformed program
    #[arg(long = "tail", value_name = "PATH")]
    tail: Option<String>,

    /// Indentation unit for generic mode (empty disables indentation)
    #[arg(long = "indent", value_name = "TEXT", default_value = "    ")]
    indent: String,

    /// Brainfuck source file
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn run(program: &str, cli: Cli) -> i32 {
    if cli.help {
        usage_and_exit(program, 0);
    }

    // Exactly one source file; anything else is a usage error.
    let [file] = cli.files.as_slice() else {
        usage_and_exit(program, 1);
    };

    let mapping = match &cli.map {
        Some(path) => match InstructionMapping::from_path(path) {
            Ok(mapping) => {
                let missing = mapping.missing();
                if !missing.is_empty() {
                    let listed = missing
                        .iter()
                        .map(|ch| format!("'{ch}'"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    eprintln!("Warning: Missing keys in map file: {listed}");
                    let _ = io::stderr().flush();
                }
                mapping
            }
            Err(e) => {
                eprintln!("{program}: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        None => InstructionMapping::default(),
    };

    let mut emitter: Box<dyn Emit> = if cli.asm {
        Box::new(AsmLabelEmitter::new(&mapping))
    } else if cli.label {
        Box::new(TemplateLabelEmitter::new(&mapping))
    } else {
        Box::new(IndentedEmitter::with_unit(&mapping, cli.indent.as_str()))
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = convert(
        cli.header.as_deref().map(Path::new),
        Path::new(file),
        cli.tail.as_deref().map(Path::new),
        emitter.as_mut(),
        &mut out,
    );

    // Streamed output stays on stdout even when a later file fails.
    let flushed = out.flush();

    match (result, flushed) {
        (Ok(()), Ok(())) => 0,
        (Err(e), _) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            1
        }
        (Ok(()), Err(e)) => {
            eprintln!("{program}: failed to write output: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

fn main() {
    let program = env::args().next().unwrap_or_else(|| String::from("bft"));
    let cli = Cli::parse();
    let code = run(&program, cli);
    process::exit(code);
}
