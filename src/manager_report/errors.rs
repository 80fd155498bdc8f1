use std::fmt;
use std::fmt::Formatter;

#[derive(Debug)]
pub struct ReportError(pub String);

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ReportError: {}", self.0)
    }
}
impl From<chrono::format::ParseError> for ReportError {
    fn from(err: chrono::format::ParseError) -> Self { ReportError(format!("invalid date: {}", err)) }
}
