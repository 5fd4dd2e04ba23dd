use core::fmt;

/// Wrapper for account number and sequence number.
///
/// Sourced fresh for every signing attempt: the sequence advances with
/// each confirmed transaction, and signing over a stale value produces a
/// transaction the chain rejects, so values are never cached across
/// attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub number: AccountNumber,
    pub sequence: AccountSequence,
}

impl Account {
    pub fn new(number: u64, sequence: u64) -> Self {
        Self {
            number: AccountNumber::new(number),
            sequence: AccountSequence::new(sequence),
        }
    }
}

/// Newtype for account numbers
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountNumber(u64);

impl AccountNumber {
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    pub fn to_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Newtype for account sequence numbers
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountSequence(u64);

impl AccountSequence {
    pub fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub fn to_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
