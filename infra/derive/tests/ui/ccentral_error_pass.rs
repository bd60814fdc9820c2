use ccentral_derive::ccentral_error;
use std::borrow::Cow;

#[ccentral_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing key '{key}'")]
    Missing { key: String },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, DemoError> {
    raw.parse::<u32>().context("Parsing demo value")
}

fn main() {
    let _ = parse("12");
    let _ = DemoError::Missing { key: "k".to_owned() };
}
