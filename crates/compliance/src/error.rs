use std::fmt;

#[derive(Debug)]
pub enum ComplianceError {
    /// TOML parse / deserialization error.
    FixtureParse(String),
    /// Fixture validation error (empty store, blank donor, negative amounts).
    FixtureValidation(String),
    /// Two grants share an id.
    DuplicateGrant(u32),
    /// A grant claims more available money than it was awarded.
    BalanceExceedsTotal { id: u32, available_cents: i64, amount_cents: i64 },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ComplianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixtureParse(msg) => write!(f, "grant file parse error: {msg}"),
            Self::FixtureValidation(msg) => write!(f, "grant file validation error: {msg}"),
            Self::DuplicateGrant(id) => write!(f, "duplicate grant id: {id}"),
            Self::BalanceExceedsTotal { id, available_cents, amount_cents } => {
                write!(
                    f,
                    "grant {id}: available {available_cents} cents exceeds total {amount_cents} cents"
                )
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ComplianceError {}
