use bf_tape::Engine;

fn main() {
    // Classic Brainfuck "Hello World!" program
    let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";

    let result = Engine::create(code).and_then(|engine| engine.execute());

    if let Err(err) = result {
        eprintln!("Brainfuck engine error: {err}");
        std::process::exit(1);
    }

    // Tip: to inspect execution, trace each step to stderr:
    // let engine = Engine::create(">+.<").unwrap();
    // let _ = engine.execute_traced(&mut std::io::stderr());
}
