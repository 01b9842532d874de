//! A bounded-tape Brainfuck execution engine.
//!
//! The engine runs a program against a fixed-length tape of byte cells with a
//! single data pointer.
//!
//! Features and behaviors:
//! - Tape initialized to 0; default length 1024, minimum 1.
//! - Strict pointer bounds: moving left from cell 0 or right past the end
//!   returns [`EngineError::OutOfBounds`]. Cell values wrap modulo 256.
//! - `,` reads one byte from the input source; on exhaustion the current cell
//!   keeps its value.
//! - `.` writes the current cell to the output sink.
//! - Loops are matched by scanning from the bracket that jumps, so an
//!   unbalanced program only fails when a jump actually needs the missing side.
//! - Every character outside `><+-.,[]` is a no-op.
//!
//! Quick start:
//!
//! ```no_run
//! use bf_tape::Engine;
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let engine = Engine::create(code).expect("valid program");
//! engine.execute().expect("program should run");
//! println!(); // ensure a trailing newline for readability
//! ```
//!
//! With explicit collaborators:
//!
//! ```
//! use bf_tape::Engine;
//!
//! let mut out = Vec::new();
//! let input: &[u8] = b"A";
//! let halted = Engine::create_with(",+.", &mut out, input, 8)?.execute()?;
//! assert_eq!(out, b"B");
//! assert_eq!(halted.current_cell(), b'B');
//! # Ok::<(), bf_tape::EngineError>(())
//! ```

pub mod brackets;
pub mod cli_util;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod theme;

/// Engine construction parameters and the default tape length.
pub use config::{Config, DEFAULT_TAPE_SIZE};
pub use engine::{Engine, Halted};
pub use error::{EngineError, ErrorKind, UnmatchedBracketKind};
pub use io::{FnSink, FnSource, InputSource, OutputSink};
