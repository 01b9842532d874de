use bf_tape::{Config, Engine, EngineError, ErrorKind, FnSource, Halted};
use proptest::prelude::*;
use std::io;

fn run_with_input(code: &str, input: &[u8], tape_size: usize) -> Result<(Vec<u8>, Halted), EngineError> {
    let mut out = Vec::new();
    let halted = Engine::create_with(code, &mut out, input, tape_size)?.execute()?;
    Ok((out, halted))
}

fn run(code: &str, tape_size: usize) -> Result<(Vec<u8>, Halted), EngineError> {
    run_with_input(code, &[], tape_size)
}

#[test]
fn three_increments_then_output_writes_three() {
    let (out, _) = run("+++.", 1).unwrap();
    assert_eq!(out, vec![3]);
}

#[test]
fn clear_loop_zeroes_cell() {
    let (_, halted) = run("+++++[-]", 1).unwrap();
    assert_eq!(halted.current_cell(), 0);
}

#[test]
fn move_right_on_single_cell_tape_is_out_of_bounds() {
    let err = run(">", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

#[test]
fn move_left_first_is_out_of_bounds() {
    let err = run("<", 1024).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

#[test]
fn lone_open_bracket_is_unmatched() {
    let err = run("[", 16).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnmatchedBracket);
}

#[test]
fn exhausted_input_keeps_prior_value() {
    let (_, halted) = run("+++++,", 1).unwrap();
    assert_eq!(halted.current_cell(), 5);
}

#[test]
fn decrement_from_zero_wraps_to_255() {
    let (_, halted) = run("-", 1).unwrap();
    assert_eq!(halted.current_cell(), 255);
}

#[test]
fn transfer_idiom_on_two_cells() {
    let (_, halted) = run("++[>+<-]", 2).unwrap();
    assert_eq!(halted.tape, vec![0, 2]);
    assert_eq!(halted.pointer, 0);
}

#[test]
fn echo_every_byte_value() {
    for x in 0..=255u8 {
        let (out, _) = run_with_input(",.", &[x], 1).unwrap();
        assert_eq!(out, vec![x], "echo of {x}");
    }
}

#[test]
fn hello_world() {
    let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
    let (out, _) = run(code, 8).unwrap();
    assert_eq!(out, b"Hello World!\n");
}

#[test]
fn closure_source_and_sink() {
    let mut bytes = vec![b'x', b'y'].into_iter();
    let mut seen = Vec::new();
    let config = Config::new(bf_tape::FnSink(|b: u8| seen.push(b)), FnSource(move || bytes.next())).with_tape_size(1);
    Engine::from_config(",.,.,.", config).unwrap().execute().unwrap();
    // Third read is exhausted, so 'y' is written twice.
    assert_eq!(seen, b"xyy");
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device gone"))
    }
}

#[test]
fn sink_failure_is_io_failure() {
    let err = Engine::create_with("+.", BrokenPipe, io::empty(), 1).unwrap().execute().unwrap_err();
    assert!(matches!(err, EngineError::IoFailure { ip: 1, .. }));
}

struct FlushRefused(Vec<u8>);

impl io::Write for FlushRefused {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("flush refused"))
    }
}

#[test]
fn final_flush_failure_is_io_failure_at_last_instruction() {
    let engine = Engine::create_with("+.+", FlushRefused(Vec::new()), io::empty(), 1).unwrap();
    let last = engine.program_len() - 1;
    let err = engine.execute().unwrap_err();
    assert!(matches!(err, EngineError::IoFailure { ip, .. } if ip == last));
    assert!(err.to_string().contains("flush refused"));
}

#[test]
fn read_error_is_io_failure() {
    let err = Engine::create_with("+,", Vec::<u8>::new(), FailingReader, 1).unwrap().execute().unwrap_err();
    assert!(matches!(err, EngineError::IoFailure { ip: 1, .. }));
}

#[test]
fn engines_run_on_separate_threads() {
    let handles: Vec<_> = (1..=4u8)
        .map(|n| {
            std::thread::spawn(move || {
                let code = "+".repeat(n as usize) + ".";
                let mut out = Vec::new();
                Engine::create_with(&code, &mut out, io::empty(), 1).unwrap().execute().unwrap();
                out
            })
        })
        .collect();
    let outputs: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outputs, vec![vec![1], vec![2], vec![3], vec![4]]);
}

/// Programs that terminate for every input on an 8-cell tape.
const TERMINATING: &[&str] = &[
    ",[.[-],]",
    ",[>+<-]>.",
    ",>,<[->+<]>.",
    ",[>,]<[.<]",
    ",[-]]+[",
    "+]",
    "][",
    "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.",
];

fn outcome(code: &str, input: &[u8], jump_cache: bool) -> Result<(Vec<u8>, Vec<u8>, usize), ErrorKind> {
    let mut out = Vec::new();
    let config = Config::new(&mut out, input).with_tape_size(8).with_jump_cache(jump_cache);
    let halted = Engine::from_config(code, config)
        .and_then(|engine| engine.execute())
        .map_err(|e| e.kind())?;
    Ok((out, halted.tape, halted.pointer))
}

proptest! {
    #[test]
    fn increments_wrap_modulo_256(start in any::<u8>(), extra in 0usize..512) {
        let code = format!(",{}", "+".repeat(256 + extra));
        let (_, halted) = run_with_input(&code, &[start], 1).unwrap();
        prop_assert_eq!(halted.current_cell(), start.wrapping_add((extra % 256) as u8));
    }

    #[test]
    fn echo_any_byte(x in any::<u8>()) {
        let (out, _) = run_with_input(",.", &[x], 1).unwrap();
        prop_assert_eq!(out, vec![x]);
    }

    #[test]
    fn jump_cache_does_not_change_behaviour(
        idx in 0..TERMINATING.len(),
        input in prop::collection::vec(any::<u8>(), 0..12),
    ) {
        let code = TERMINATING[idx];
        prop_assert_eq!(outcome(code, &input, false), outcome(code, &input, true));
    }
}
