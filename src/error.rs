use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Terminal too small: need {need_w}x{need_h}, have {have_w}x{have_h}")]
    TerminalTooSmall { need_w: u16, need_h: u16, have_w: u16, have_h: u16 },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Crossterm(#[from] crossterm::ErrorKind),
}

pub type Result<T> = std::result::Result<T, Error>;
