pub mod catppuccin {
    use nu_ansi_term::Color;
    pub struct Mocha;
    impl Mocha {
        pub const SURFACE2: Color = Color::Rgb(108, 112, 134);  // context window

        pub const RED: Color = Color::Rgb(243, 139, 168);       // error header
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);    // caret
        pub const PEACH: Color = Color::Rgb(250, 179, 135);     // offending instruction
    }
}
