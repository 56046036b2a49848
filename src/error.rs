//! Application error type.
//!
//! Every failure the binary can hit is mapped to a message plus a process exit
//! code. Library functions return `Result<_, AppError>` and propagate with `?`;
//! `main` prints the message and exits with the code.
//!
//! | code | meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | success                                                   |
//! | 2    | input/IO: missing file, malformed row, failed SVG write   |
//! | 3    | empty dataset: header only, or `--limit` leaves no rows   |
//! | 4    | terminal or rendering failure                             |
//!
//! clap's own usage errors keep clap's exit code (2).

/// Input/IO failure: missing file, malformed row, failed write.
pub const EXIT_INPUT: u8 = 2;
/// The input parsed, but contained no data rows.
pub const EXIT_EMPTY: u8 = 3;
/// Terminal or chart rendering failure.
pub const EXIT_RENDER: u8 = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(EXIT_EMPTY, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(EXIT_RENDER, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_exit_codes() {
        assert_eq!(AppError::input("x").exit_code(), EXIT_INPUT);
        assert_eq!(AppError::empty("x").exit_code(), EXIT_EMPTY);
        assert_eq!(AppError::render("x").exit_code(), EXIT_RENDER);
        assert_eq!(AppError::input("no file").to_string(), "no file");
    }
}
