use std::io::{Stdin, Stdout, Write};

use crate::brackets::{self, Direction, JumpCache};
use crate::config::Config;
use crate::error::EngineError;
use crate::io::{InputSource, OutputSink};

/// A single-use Brainfuck engine.
///
/// The engine owns:
/// - the program as a sequence of `char`s,
/// - a fixed-length tape of zeroed cells,
/// - the data pointer into that tape,
/// - the output sink and input source.
///
/// [`execute`](Engine::execute) consumes the engine, so each instance runs
/// its program at most once.
pub struct Engine<O = Stdout, I = Stdin> {
    program: Vec<char>,
    tape: Vec<u8>,
    pointer: usize,
    output: O,
    input: I,
    jumps: Option<JumpCache>,
}

/// Final state of a program that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Halted {
    pub tape: Vec<u8>,
    pub pointer: usize,
    /// Number of instructions dispatched, no-ops included.
    pub steps: u64,
}

impl Halted {
    /// Value of the cell under the data pointer.
    pub fn current_cell(&self) -> u8 {
        self.tape[self.pointer]
    }
}

impl Engine<Stdout, Stdin> {
    /// Create an engine on stdout/stdin with a 1024-cell tape.
    pub fn create(program: &str) -> Result<Self, EngineError> {
        Self::from_config(program, Config::default())
    }
}

impl<O: OutputSink, I: InputSource> Engine<O, I> {
    /// Create an engine with explicit collaborators and tape size.
    pub fn create_with(program: &str, output: O, input: I, tape_size: usize) -> Result<Self, EngineError> {
        Self::from_config(program, Config::new(output, input).with_tape_size(tape_size))
    }

    pub fn from_config(program: &str, config: Config<O, I>) -> Result<Self, EngineError> {
        if program.is_empty() {
            return Err(EngineError::InvalidArgument("program must not be empty"));
        }
        if config.tape_size < 1 {
            return Err(EngineError::InvalidArgument("tape size must be at least 1"));
        }

        let program: Vec<char> = program.chars().collect();
        let jumps = config.jump_cache.then(|| JumpCache::new(program.len()));
        Ok(Self {
            program,
            tape: vec![0; config.tape_size],
            pointer: 0,
            output: config.output,
            input: config.input,
            jumps,
        })
    }

    /// Number of cells on the tape.
    pub fn tape_len(&self) -> usize {
        self.tape.len()
    }

    /// Number of characters in the program, no-ops included.
    pub fn program_len(&self) -> usize {
        self.program.len()
    }

    /// Run the program until the program pointer leaves the program.
    pub fn execute(self) -> Result<Halted, EngineError> {
        self.run(None)
    }

    /// Same as [`execute`](Engine::execute), additionally writing one table
    /// row per dispatched instruction to `trace`.
    ///
    /// A failed write to `trace` aborts the run with
    /// [`EngineError::IoFailure`] just like a failing output sink. The header
    /// is written before any instruction, so its failure reports `ip` 0.
    pub fn execute_traced<W: Write>(self, trace: &mut W) -> Result<Halted, EngineError> {
        self.run(Some(trace))
    }

    fn run(mut self, mut trace: Option<&mut dyn Write>) -> Result<Halted, EngineError> {
        let code_len = self.program.len();
        let mut code_ptr: usize = 0;
        let mut steps: u64 = 0;

        if let Some(t) = trace.as_deref_mut() {
            writeln!(t, "STEP | IP  | PTR | CELL | INSTR | ACTION")
                .and_then(|_| writeln!(t, "-----+-----+-----+------+-------+------------------------------------------------"))
                .map_err(|source| EngineError::IoFailure { ip: 0, source })?;
        }

        while code_ptr < code_len {
            let instr = self.program[code_ptr];
            let (ptr_before, cell_before) = (self.pointer, self.tape[self.pointer]);
            let mut action: Option<String> = trace.as_ref().map(|_| String::new());
            let mut next_ptr = code_ptr + 1;

            match instr {
                '>' => {
                    if self.pointer + 1 >= self.tape.len() {
                        return Err(EngineError::OutOfBounds { ip: code_ptr, ptr: self.pointer, op: instr });
                    }
                    self.pointer += 1;
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                '<' => {
                    if self.pointer == 0 {
                        return Err(EngineError::OutOfBounds { ip: code_ptr, ptr: self.pointer, op: instr });
                    }
                    self.pointer -= 1;
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                '+' => {
                    let after = cell_before.wrapping_add(1);
                    self.tape[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Increment cell[{}] from {} to {}", ptr_before, cell_before, after); }
                }
                '-' => {
                    let after = cell_before.wrapping_sub(1);
                    self.tape[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Decrement cell[{}] from {} to {}", ptr_before, cell_before, after); }
                }
                '.' => {
                    self.output
                        .write_byte(cell_before)
                        .map_err(|source| EngineError::IoFailure { ip: code_ptr, source })?;
                    if let Some(a) = action.as_mut() { *a = format!("Output byte {}", cell_before); }
                }
                ',' => {
                    let read = self
                        .input
                        .read_byte()
                        .map_err(|source| EngineError::IoFailure { ip: code_ptr, source })?;
                    // Exhausted input leaves the cell as it was.
                    if let Some(b) = read {
                        self.tape[self.pointer] = b;
                    }
                    if let Some(a) = action.as_mut() {
                        *a = match read {
                            Some(b) => format!("Read byte {} into cell[{}]", b, self.pointer),
                            None => format!("Input exhausted; cell[{}] kept at {}", self.pointer, cell_before),
                        };
                    }
                }
                '[' => {
                    if cell_before == 0 {
                        let close = self.matching(code_ptr, Direction::Forward)?;
                        if let Some(a) = action.as_mut() { *a = format!("Cell is 0; jump forward to matching ']' at IP {}", close); }
                        next_ptr = close + 1;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Enter loop (cell != 0)".to_string();
                    }
                }
                ']' => {
                    if cell_before != 0 {
                        // Land on the '[' itself so it re-tests the cell.
                        let open = self.matching(code_ptr, Direction::Backward)?;
                        if let Some(a) = action.as_mut() { *a = format!("Cell != 0; jump back to matching '[' at IP {}", open); }
                        next_ptr = open;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Exit loop (cell is 0)".to_string();
                    }
                }
                _ => {
                    if let Some(a) = action.as_mut() { *a = "No-op".to_string(); }
                }
            }

            if let Some(t) = trace.as_deref_mut() {
                writeln!(
                    t,
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    steps,
                    code_ptr,
                    ptr_before,
                    cell_before,
                    instr.escape_debug(),
                    action.unwrap_or_default()
                )
                .map_err(|source| EngineError::IoFailure { ip: code_ptr, source })?;
            }

            steps += 1;
            code_ptr = next_ptr;
        }

        self.output
            .flush_output()
            .map_err(|source| EngineError::IoFailure { ip: code_len - 1, source })?;

        Ok(Halted {
            tape: self.tape,
            pointer: self.pointer,
            steps,
        })
    }

    fn matching(&mut self, start: usize, direction: Direction) -> Result<usize, EngineError> {
        match self.jumps.as_mut() {
            Some(cache) => cache.resolve(&self.program, start, direction),
            None => brackets::find_match(&self.program, start, direction),
        }
    }
}

impl<O, I> std::fmt::Debug for Engine<O, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("program_len", &self.program.len())
            .field("tape_len", &self.tape.len())
            .field("pointer", &self.pointer)
            .field("jump_cache", &self.jumps.is_some())
            .finish()
    }
}
