use clap::Args;
use std::fs;
use std::io::{self, Read, Write};
use bf_tape::cli_util::print_engine_error;
use bf_tape::config::{self, Config, DEFAULT_TAPE_SIZE};
use bf_tape::Engine;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Feed `,` from the file at PATH instead of stdin
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<String>,

    /// Tape length in cells (fallback BF_TAPE_SIZE, then bf-tape.toml; default 1024)
    #[arg(short = 't', long = "tape-size", value_name = "N")]
    pub tape_size: Option<usize>,

    /// Memoize bracket matches after their first scan (fallback BF_JUMP_CACHE)
    #[arg(long = "jump-cache")]
    pub jump_cache: bool,

    /// Print a step-by-step table of operations to stderr while executing
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Do not print a newline after the program output
    #[arg(short = 'n', long = "no-newline")]
    pub no_newline: bool,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        file,
        input,
        tape_size,
        jump_cache,
        debug,
        no_newline,
        code,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let code_str = if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else {
        code.join("")
    };

    let source: Box<dyn Read> = match input {
        Some(path) => match fs::File::open(&path) {
            Ok(f) => Box::new(io::BufReader::new(f)),
            Err(e) => {
                eprintln!("{program}: failed to open input file: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        None => Box::new(io::stdin()),
    };

    // Resolve settings: flags -> env -> user config -> defaults
    let defaults = config::load_user_defaults();
    let tape_size = tape_size
        .or_else(|| std::env::var("BF_TAPE_SIZE").ok().and_then(|s| s.parse::<usize>().ok()))
        .or(defaults.tape_size)
        .unwrap_or(DEFAULT_TAPE_SIZE);
    let jump_cache = jump_cache
        || std::env::var("BF_JUMP_CACHE").ok().and_then(|s| config::parse_bool(&s))
            .or(defaults.jump_cache)
            .unwrap_or(false);

    let cfg = Config::new(io::stdout().lock(), source)
        .with_tape_size(tape_size)
        .with_jump_cache(jump_cache);

    let engine = match Engine::from_config(&code_str, cfg) {
        Ok(engine) => engine,
        Err(err) => {
            print_engine_error(Some(program), &code_str, &err);
            return 2;
        }
    };

    let result = if debug {
        engine.execute_traced(&mut io::stderr().lock())
    } else {
        engine.execute()
    };

    let exit_code = match result {
        Ok(_) => 0,
        Err(err) => {
            print_engine_error(Some(program), &code_str, &err);
            1
        }
    };

    // For readability, ensure output ends with a newline
    if !no_newline {
        println!();
    }
    let _ = io::stdout().flush();
    exit_code
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [OPTIONS] "<code>"...
  {0} [OPTIONS] --file <PATH>

Options:
  --file,       -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --input,      -i <PATH>  Feed `,` from PATH instead of stdin
  --tape-size,  -t <N>     Tape length in cells (default 1024, or BF_TAPE_SIZE / bf-tape.toml)
  --jump-cache             Memoize bracket matches after their first scan
  --debug,      -d         Print a step-by-step table of operations to stderr
  --no-newline, -n         Do not print a newline after the program output
  --help,       -h         Show this help

Notes:
- Input (`,`) reads a single byte; when input is exhausted the current cell is left unchanged.
- Characters outside of Brainfuck's ><+-.,[] are ignored.
- Moving the data pointer off either end of the tape is an error; cell values wrap.

Examples:
- Load Brainfuck code from a file:
    {0} --file ./program.bf
- Read bytes from a file as stdin (`,` will consume file input):
    {0} ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
